use crate::{
    auth::AuthUser,
    error::AppError,
    models::{Task, TaskInput},
};
use actix_web::{get, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Creates a new task for the authenticated user.
///
/// The task's owner is always the identity resolved by the auth middleware;
/// the client cannot create tasks on behalf of another user.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object as JSON.
/// - `400 Bad Request`: If input validation on `TaskInput` fails.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `500 Internal Server Error`: For database errors.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
    auth: AuthUser,
) -> Result<impl Responder, AppError> {
    // Validate input
    task_data.validate()?;

    let task = Task::new(task_data.into_inner(), auth.0.id);

    let result = sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (id, title, description, status, user_id, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING id, title, description, status, user_id, created_at, updated_at",
    )
    .bind(task.id)
    .bind(task.title)
    .bind(task.description)
    .bind(task.status)
    .bind(task.user_id)
    .bind(task.created_at)
    .bind(task.updated_at)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(result))
}

/// Retrieves the authenticated user's tasks, newest first.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `500 Internal Server Error`: For database errors.
#[get("")]
pub async fn get_tasks(
    pool: web::Data<PgPool>,
    auth: AuthUser,
) -> Result<impl Responder, AppError> {
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, status, user_id, created_at, updated_at \
         FROM tasks WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(auth.0.id)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(tasks))
}
