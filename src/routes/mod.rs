pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;
use std::sync::Arc;

use crate::auth::{AuthMiddleware, TokenService};

/// Mounts the API routes under the caller's scope.
///
/// The auth endpoints are public; the task endpoints sit behind
/// [`AuthMiddleware`], which needs the shared token service.
pub fn config(cfg: &mut web::ServiceConfig, tokens: Arc<TokenService>) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login),
    )
    .service(
        web::scope("/tasks")
            .wrap(AuthMiddleware::new(tokens))
            .service(tasks::create_task)
            .service(tasks::get_tasks),
    );
}
