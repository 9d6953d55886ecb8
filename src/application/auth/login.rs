use crate::application::auth::token_utils::{TokenResponse, generate_and_store_tokens};
use crate::domain::auth::{AuthService, RefreshTokenRepository};
use crate::domain::password::PasswordHashingService;
use crate::domain::users::UserRepository;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "marco")]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "wanderlust-2024")]
    pub password: String,
}

pub type LoginResponse = TokenResponse;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub struct LoginUseCase {
    user_repo: Arc<dyn UserRepository>,
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    auth_service: Arc<dyn AuthService>,
    password_service: Arc<dyn PasswordHashingService>,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl LoginUseCase {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        refresh_token_repo: Arc<dyn RefreshTokenRepository>,
        auth_service: Arc<dyn AuthService>,
        password_service: Arc<dyn PasswordHashingService>,
        access_token_expiry: i64,
        refresh_token_expiry: i64,
    ) -> Self {
        Self {
            user_repo,
            refresh_token_repo,
            auth_service,
            password_service,
            access_token_expiry,
            refresh_token_expiry,
        }
    }

    #[tracing::instrument(skip(self, req), fields(username = %req.username))]
    pub async fn execute(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let Some(user) = self.user_repo.find_by_username(&req.username).await? else {
            // Unknown usernames cost one argon2 run, like a wrong password
            let _ = self.password_service.hash_password(&req.password);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        let valid_password = self
            .password_service
            .verify_password(&req.password, &user.password_hash)?;

        if !valid_password {
            tracing::info!("rejected login with wrong password");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        generate_and_store_tokens(
            user.id,
            &self.auth_service,
            &self.refresh_token_repo,
            self.access_token_expiry,
            self.refresh_token_expiry,
        )
        .await
    }
}
