use crate::config::Settings;
use crate::quiz::QuizController;

pub struct AppState {
    pub settings: Settings,
    pub quiz: QuizController,
}
