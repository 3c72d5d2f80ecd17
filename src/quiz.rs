use crate::error::QuizError;
use crate::generator::{generate_question, Question};
use crate::session::{SessionState, SessionStore, VisitorId};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::sync::{Arc, Mutex};

pub const EMPTY_ANSWER_FEEDBACK: &str = "Please enter an answer.";
pub const CORRECT_FEEDBACK: &str = "✅ Correct! Well done!";
pub const NO_QUESTION_FEEDBACK: &str = "❌ Incorrect. There is no question in progress.";

/// Outcome of asking for the practice view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    Question(String),
    /// Nothing stored for this visitor; send them back to the start.
    RedirectHome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    pub correct: bool,
    pub feedback: String,
}

impl Grade {
    fn correct() -> Self {
        Grade { correct: true, feedback: CORRECT_FEEDBACK.to_string() }
    }

    fn incorrect(feedback: impl Into<String>) -> Self {
        Grade { correct: false, feedback: feedback.into() }
    }
}

pub struct QuizController {
    store: Arc<dyn SessionStore>,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl QuizController {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    pub fn with_rng<R: RngCore + Send + 'static>(store: Arc<dyn SessionStore>, rng: R) -> Self {
        QuizController {
            store,
            rng: Mutex::new(Box::new(rng)),
        }
    }

    pub fn reset(&self, visitor: &VisitorId) -> Result<(), QuizError> {
        self.store.clear(visitor)
    }

    pub fn begin(&self, visitor: &VisitorId) -> Result<Question, QuizError> {
        let mut rng = self.rng.lock().map_err(|_| QuizError::RngPoisoned)?;
        self.begin_with(visitor, &mut *rng)
    }

    /// Like [`begin`](Self::begin) but draws from the caller's RNG.
    pub fn begin_with<R: Rng + ?Sized>(
        &self,
        visitor: &VisitorId,
        rng: &mut R,
    ) -> Result<Question, QuizError> {
        let question = generate_question(rng);
        self.store.set(visitor, SessionState::with_question(&question))?;
        Ok(question)
    }

    pub fn present(&self, visitor: &VisitorId) -> Result<Presentation, QuizError> {
        let state = self.store.get(visitor)?;
        Ok(match state.current_question() {
            Some(text) if !text.is_empty() => Presentation::Question(text.to_string()),
            _ => Presentation::RedirectHome,
        })
    }

    /// Grading leaves the stored question in place until the next reset.
    pub fn grade(&self, visitor: &VisitorId, submission: &str) -> Result<Grade, QuizError> {
        let submission = submission.trim();
        if submission.is_empty() {
            return Ok(Grade::incorrect(EMPTY_ANSWER_FEEDBACK));
        }

        let state = self.store.get(visitor)?;
        Ok(match state.correct_answer() {
            Some(answer) if answer == submission => Grade::correct(),
            Some(answer) => Grade::incorrect(format!(
                "❌ Incorrect. The correct answer was {}.",
                answer
            )),
            None => Grade::incorrect(NO_QUESTION_FEEDBACK),
        })
    }
}
