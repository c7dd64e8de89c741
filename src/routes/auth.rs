use crate::{
    auth::{AuthService, LoginRequest, LoginResponse, RegisterRequest},
    error::AppError,
    models::UserResponse,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns it with the password stripped.
#[post("/register")]
pub async fn register(
    auth_service: web::Data<AuthService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;

    let user = auth_service.register(&register_data).await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Login user
///
/// Authenticates a user and returns a bearer token alongside the user.
#[post("/login")]
pub async fn login(
    auth_service: web::Data<AuthService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    let (token, user) = auth_service.login(&login_data).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        user: UserResponse::from(user),
    }))
}
