use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use serde_json::{json, Value};
use sqlx::PgPool;
use std::sync::Arc;
use tasklane::auth::{AuthService, TokenService};
use tasklane::routes;
use tasklane::routes::health;
use tasklane::store::UserStore;

const TEST_SECRET: &str = "integration-test-secret";

async fn build_app(
    pool: PgPool,
    tokens: Arc<TokenService>,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse<
        impl actix_web::body::MessageBody<Error = actix_http::Error>,
    >,
    Error = actix_web::Error,
> {
    let auth_service = web::Data::new(AuthService::new(
        UserStore::new(pool.clone()),
        Arc::clone(&tokens),
    ));

    test::init_service(
        App::new()
            .app_data(web::Data::new(pool))
            .app_data(auth_service)
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(web::scope("/api").configure(|cfg| routes::config(cfg, tokens))),
    )
    .await
}

/// Registers and logs in a user, returning the bearer token.
async fn register_and_login(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    name: &str,
    email: &str,
    password: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "name": name, "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201, "registration failed for {}", email);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 200, "login failed for {}", email);

    let body: Value = test::read_body_json(resp).await;
    body["token"].as_str().unwrap().to_string()
}

async fn cleanup_user(pool: &PgPool, email: &str) {
    // Tasks cascade with the owning user.
    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await;
}

#[actix_rt::test]
async fn test_task_routes_require_auth() {
    let pool = PgPool::connect_lazy("postgres://localhost/tasklane_test").unwrap();
    let app = build_app(pool, Arc::new(TokenService::new(TEST_SECRET))).await;

    let create_req = test::TestRequest::post()
        .uri("/api/tasks")
        .set_json(json!({ "title": "Unauthorized Task" }))
        .to_request();
    let err = test::try_call_service(&app, create_req).await.unwrap_err();
    assert_eq!(err.error_response().status(), 401);

    let list_req = test::TestRequest::get().uri("/api/tasks").to_request();
    let err = test::try_call_service(&app, list_req).await.unwrap_err();
    assert_eq!(err.error_response().status(), 401);
}

// Requires a provisioned Postgres: DATABASE_URL=... cargo test -- --ignored
#[ignore]
#[actix_rt::test]
async fn test_create_and_list_tasks() {
    dotenv::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");

    cleanup_user(&pool, "tasks-owner@example.com").await;

    let app = build_app(pool.clone(), Arc::new(TokenService::new(TEST_SECRET))).await;
    let token = register_and_login(&app, "Owner", "tasks-owner@example.com", "Password123!").await;

    // Create two tasks
    for title in ["First task", "Second task"] {
        let req = test::TestRequest::post()
            .uri("/api/tasks")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "title": title, "status": "pending" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["title"], title);
        assert_eq!(body["status"], "pending");
    }

    // List them back, newest first
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let tasks: Value = test::read_body_json(resp).await;
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["title"], "Second task");
    assert_eq!(tasks[1]["title"], "First task");

    cleanup_user(&pool, "tasks-owner@example.com").await;
}

// Requires a provisioned Postgres: DATABASE_URL=... cargo test -- --ignored
#[ignore]
#[actix_rt::test]
async fn test_task_listing_is_scoped_to_owner() {
    dotenv::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");

    cleanup_user(&pool, "owner-a@example.com").await;
    cleanup_user(&pool, "owner-b@example.com").await;

    let app = build_app(pool.clone(), Arc::new(TokenService::new(TEST_SECRET))).await;
    let token_a = register_and_login(&app, "Owner A", "owner-a@example.com", "Password123!").await;
    let token_b = register_and_login(&app, "Owner B", "owner-b@example.com", "Password123!").await;

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(("Authorization", format!("Bearer {}", token_a)))
        .set_json(json!({ "title": "A's private task" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    // B sees none of A's tasks
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(("Authorization", format!("Bearer {}", token_b)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let tasks: Value = test::read_body_json(resp).await;
    assert_eq!(tasks.as_array().unwrap().len(), 0);

    cleanup_user(&pool, "owner-a@example.com").await;
    cleanup_user(&pool, "owner-b@example.com").await;
}
