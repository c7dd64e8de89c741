use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;
use std::sync::Arc;

use tasklane::auth::{AuthService, TokenService};
use tasklane::config::Config;
use tasklane::routes;
use tasklane::store::UserStore;

/// Composition root: all configuration is read and all services are
/// constructed exactly once here, then handed to the app factory. No other
/// part of the codebase reads the environment or resolves dependencies.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    let tokens = Arc::new(TokenService::new(&config.jwt_secret));
    let auth_service = web::Data::new(AuthService::new(
        UserStore::new(pool.clone()),
        Arc::clone(&tokens),
    ));

    log::info!("Starting tasklane server at {}", config.server_url());

    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        let tokens = Arc::clone(&tokens);
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(auth_service.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(web::scope("/api").configure(|cfg| routes::config(cfg, tokens)))
    })
    .bind(bind_addr)?
    .run()
    .await
}
