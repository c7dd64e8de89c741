use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Identity;
use crate::error::AppError;

/// Extracts the verified [`Identity`] from request extensions.
///
/// Intended for routes behind `AuthMiddleware`, which verifies the bearer
/// token and inserts the Identity. If no Identity is present the middleware
/// did not run; rejecting with 401 is the safe default.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl FromRequest for AuthUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Identity>().cloned() {
            Some(identity) => ready(Ok(AuthUser(identity))),
            None => {
                let err = AppError::Unauthorized("authentication required".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
