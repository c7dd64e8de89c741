use std::sync::Arc;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::{Identity, TokenService};
use crate::auth::{LoginRequest, RegisterRequest};
use crate::error::AppError;
use crate::models::User;
use crate::store::UserStore;

/// Orchestrates the register and login flows.
///
/// Composes the credential hasher, the token service, and the user store.
/// Constructed once at startup with its collaborators passed in explicitly;
/// holds no mutable state.
pub struct AuthService {
    users: UserStore,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: UserStore, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Registers a new user.
    ///
    /// Fails with `Conflict` if the email is already taken (checked up front
    /// and again by the store's unique constraint, which settles concurrent
    /// registrations). The returned record still carries the password digest;
    /// routes render it through `UserResponse`.
    pub async fn register(&self, input: &RegisterRequest) -> Result<User, AppError> {
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict(
                "user with this email already exists".into(),
            ));
        }

        let password_hash = hash_password(&input.password)?;
        let user = User::new(input.name.clone(), input.email.clone(), password_hash);

        self.users.insert(&user).await
    }

    /// Authenticates a user and issues a token for `{id, email}`.
    ///
    /// Unknown email and wrong password produce the identical
    /// `Unauthorized("invalid credentials")` so error text cannot be used to
    /// enumerate accounts. Performs no writes.
    pub async fn login(&self, input: &LoginRequest) -> Result<(String, User), AppError> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid credentials".into()))?;

        if !verify_password(&input.password, &user.password_hash) {
            return Err(AppError::Unauthorized("invalid credentials".into()));
        }

        let token = self.tokens.issue(&Identity {
            id: user.id,
            email: user.email.clone(),
        })?;

        Ok((token, user))
    }
}
