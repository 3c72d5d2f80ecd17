use actix_web::http::header;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::QuizError;
use crate::quiz::Presentation;
use crate::state::AppState;
use crate::views;
use crate::visitor::Visitor;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnswerForm {
    #[serde(default)]
    pub answer: String,
}

fn html(data: &AppState, visitor: &Visitor, body: String) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    visitor.attach(&mut builder, &data.settings);
    builder.content_type("text/html; charset=utf-8").body(body)
}

fn redirect(data: &AppState, visitor: &Visitor, location: &str) -> HttpResponse {
    let mut builder = HttpResponse::Found();
    visitor.attach(&mut builder, &data.settings);
    builder.insert_header((header::LOCATION, location)).finish()
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health Check", body = String)
    )
)]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Home page; clears any question in progress", content_type = "text/html", body = String),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn index(data: web::Data<AppState>, visitor: Visitor) -> Result<HttpResponse, QuizError> {
    data.quiz.reset(&visitor.id)?;
    log::debug!("Visitor {} reset", visitor.id);
    Ok(html(&data, &visitor, views::home()))
}

#[utoipa::path(
    post,
    path = "/start_practice",
    responses(
        (status = 302, description = "New question stored; redirects to /practice"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn start_practice(data: web::Data<AppState>, visitor: Visitor) -> Result<HttpResponse, QuizError> {
    let question = data.quiz.begin(&visitor.id)?;
    log::info!("Visitor {} started: {}", visitor.id, question.text);
    Ok(redirect(&data, &visitor, "/practice"))
}

#[utoipa::path(
    get,
    path = "/practice",
    responses(
        (status = 200, description = "Current question", content_type = "text/html", body = String),
        (status = 302, description = "No question in progress; redirects to /"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn practice(data: web::Data<AppState>, visitor: Visitor) -> Result<HttpResponse, QuizError> {
    match data.quiz.present(&visitor.id)? {
        Presentation::Question(text) => Ok(html(&data, &visitor, views::practice(&text))),
        Presentation::RedirectHome => {
            log::debug!("Visitor {} has no question, redirecting home", visitor.id);
            Ok(redirect(&data, &visitor, "/"))
        }
    }
}

#[utoipa::path(
    post,
    path = "/check_answer",
    request_body(content = AnswerForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Grading feedback", content_type = "text/html", body = String),
        (status = 400, description = "Malformed form body"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn check_answer(
    data: web::Data<AppState>,
    visitor: Visitor,
    form: web::Form<AnswerForm>,
) -> Result<HttpResponse, QuizError> {
    let grade = data.quiz.grade(&visitor.id, &form.answer)?;
    log::info!("Visitor {} answered {:?}: correct={}", visitor.id, form.answer.trim(), grade.correct);
    Ok(html(&data, &visitor, views::results(&grade.feedback, grade.correct)))
}
