use actix_web::dev::Server;
use actix_web::{middleware, web, App, HttpServer};
use std::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod generator;
pub mod handlers;
pub mod quiz;
pub mod session;
pub mod state;
pub mod views;
pub mod visitor;

use config::Settings;
use handlers::AnswerForm;
use quiz::QuizController;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health_check,
        handlers::index,
        handlers::start_practice,
        handlers::practice,
        handlers::check_answer,
    ),
    components(
        schemas(AnswerForm)
    ),
    tags(
        (name = "Practice", description = "Arithmetic practice pages")
    )
)]
pub struct ApiDoc;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check))
        .route("/", web::get().to(handlers::index))
        .route("/start_practice", web::post().to(handlers::start_practice))
        .route("/practice", web::get().to(handlers::practice))
        .route("/check_answer", web::post().to(handlers::check_answer));
}

pub fn run(listener: TcpListener, settings: Settings, quiz: QuizController) -> Result<Server, std::io::Error> {
    let data = web::Data::new(AppState { settings, quiz });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(middleware::Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi())
            )
            .configure(routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
