use crate::config::Settings;
use crate::error::QuizError;
use crate::session::VisitorId;
use crate::state::AppState;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest, HttpResponseBuilder};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};

pub const SESSION_COOKIE: &str = "quiz_session";

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: usize,
}

pub fn create_token(visitor: &VisitorId, settings: &Settings) -> Result<String, QuizError> {
    let expiration = Duration::try_hours(settings.session_ttl_hours)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .ok_or_else(|| QuizError::SessionToken("expiry out of range".to_string()))?
        .timestamp() as usize;

    let claims = SessionClaims {
        sub: visitor.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.secret_key.as_bytes()),
    )
    .map_err(|e| QuizError::SessionToken(e.to_string()))
}

/// `None` for expired, tampered or otherwise unreadable tokens.
pub fn decode_token(token: &str, settings: &Settings) -> Option<VisitorId> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(settings.secret_key.as_bytes()),
        &Validation::default(),
    )
    .ok()?;
    data.claims.sub.parse().ok()
}

/// The visitor behind a request. A request without a valid session cookie
/// gets a fresh id, and the token to hand back in `Set-Cookie`.
pub struct Visitor {
    pub id: VisitorId,
    issued: Option<String>,
}

impl Visitor {
    fn resolve(req: &HttpRequest, settings: &Settings) -> Self {
        if let Some(cookie) = req.cookie(SESSION_COOKIE) {
            if let Some(id) = decode_token(cookie.value(), settings) {
                return Visitor { id, issued: None };
            }
            log::debug!("Discarding invalid session cookie");
        }

        let id = VisitorId::new();
        let issued = match create_token(&id, settings) {
            Ok(token) => Some(token),
            Err(e) => {
                log::error!("{}", e);
                None
            }
        };
        log::debug!("New visitor {}", id);
        Visitor { id, issued }
    }

    /// Adds the session cookie to `builder` when this visitor was just minted.
    pub fn attach(&self, builder: &mut HttpResponseBuilder, settings: &Settings) {
        if let Some(token) = &self.issued {
            let cookie = Cookie::build(SESSION_COOKIE, token.clone())
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(settings.environment.is_production())
                .finish();
            builder.cookie(cookie);
        }
    }
}

impl FromRequest for Visitor {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let data = match req.app_data::<web::Data<AppState>>() {
            Some(d) => d,
            None => return ready(Err(actix_web::error::ErrorInternalServerError("State not found"))),
        };

        ready(Ok(Visitor::resolve(req, &data.settings)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn settings() -> Settings {
        Settings::development("unit-test-secret")
    }

    #[test]
    fn token_round_trips_visitor_id() {
        let id = VisitorId::new();
        let token = create_token(&id, &settings()).unwrap();
        assert_eq!(decode_token(&token, &settings()), Some(id));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let id = VisitorId::new();
        let token = create_token(&id, &Settings::development("another-secret")).unwrap();
        assert_eq!(decode_token(&token, &settings()), None);
    }

    #[test]
    fn unrepresentable_expiry_is_an_error() {
        let mut settings = settings();
        settings.session_ttl_hours = 10_000_000_000;
        let result = create_token(&VisitorId::new(), &settings);
        assert!(matches!(result, Err(QuizError::SessionToken(_))));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert_eq!(decode_token("invalid_token", &settings()), None);
    }

    #[test]
    fn request_with_valid_cookie_keeps_its_visitor() {
        let id = VisitorId::new();
        let token = create_token(&id, &settings()).unwrap();
        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_http_request();

        let visitor = Visitor::resolve(&req, &settings());
        assert_eq!(visitor.id, id);
        assert!(visitor.issued.is_none());
    }

    #[test]
    fn request_without_cookie_gets_new_visitor() {
        let req = TestRequest::default().to_http_request();
        let visitor = Visitor::resolve(&req, &settings());
        assert!(visitor.issued.is_some());
    }

    #[test]
    fn tampered_cookie_gets_new_visitor() {
        let id = VisitorId::new();
        let mut token = create_token(&id, &settings()).unwrap();
        token.push('x');
        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_http_request();

        let visitor = Visitor::resolve(&req, &settings());
        assert_ne!(visitor.id, id);
        assert!(visitor.issued.is_some());
    }
}
