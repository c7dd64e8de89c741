use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::sync::Arc;

use crate::auth::token::TokenService;
use crate::error::AppError;

/// Identity extraction middleware.
///
/// Wraps the protected route scope: reads the `Authorization: Bearer <token>`
/// header, verifies the token against the shared [`TokenService`], and on
/// success inserts the resolved [`crate::auth::Identity`] into request
/// extensions for downstream extractors. Rejections are 401s with
/// deliberately generic messages; the verification error subtype is logged
/// but never sent to the client.
///
/// The middleware performs no I/O and never touches the user store; it is
/// stateless across requests apart from the read-only token service.
pub struct AuthMiddleware {
    tokens: Arc<TokenService>,
}

impl AuthMiddleware {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            tokens: Arc::clone(&self.tokens),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    tokens: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let bearer = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .filter(|token| !token.is_empty());

        let token = match bearer {
            Some(token) => token,
            None => {
                let app_err = AppError::Unauthorized(
                    "authorization header missing or malformed".into(),
                );
                return Box::pin(async move { Err(app_err.into()) });
            }
        };

        match self.tokens.verify(token) {
            Ok(identity) => {
                req.extensions_mut().insert(identity);
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(verification_err) => {
                log::debug!(
                    "rejected bearer token for {}: {}",
                    req.path(),
                    verification_err
                );
                let app_err = AppError::Unauthorized("invalid or expired token".into());
                Box::pin(async move { Err(app_err.into()) })
            }
        }
    }
}
