use env_logger::Env;
use math_practice::config::Settings;
use math_practice::quiz::QuizController;
use math_practice::run;
use math_practice::session::InMemorySessionStore;
use std::net::TcpListener;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    if settings.uses_fallback_secret() {
        log::warn!("SECRET_KEY not set, using the development fallback. Do not use in production.");
    }

    let store = InMemorySessionStore::with_ttl(settings.session_ttl());
    let quiz = QuizController::new(Arc::new(store));
    let address = settings.address();

    log::info!("Starting server at http://{}", address);
    log::info!("Swagger UI available at http://{}/swagger-ui/", address);

    let listener = TcpListener::bind(&address)?;
    run(listener, settings, quiz)?.await
}
