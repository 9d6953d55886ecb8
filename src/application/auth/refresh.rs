use crate::application::auth::token_utils::{TokenResponse, hash_token, issue_token_pair};
use crate::domain::auth::{AuthService, RefreshTokenRepository};
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

pub type RefreshTokenResponse = TokenResponse;

pub struct RefreshTokenUseCase {
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    auth_service: Arc<dyn AuthService>,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl RefreshTokenUseCase {
    pub fn new(
        refresh_token_repo: Arc<dyn RefreshTokenRepository>,
        auth_service: Arc<dyn AuthService>,
        access_token_expiry: i64,
        refresh_token_expiry: i64,
    ) -> Self {
        Self {
            refresh_token_repo,
            auth_service,
            access_token_expiry,
            refresh_token_expiry,
        }
    }

    #[tracing::instrument(skip_all)]
    pub async fn execute(
        &self,
        req: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, AppError> {
        let claims = self
            .auth_service
            .validate_token(&req.refresh_token)
            .map_err(|_| AppError::Unauthorized("Invalid refresh token".to_string()))?;

        if !claims.is_refresh() {
            return Err(AppError::Unauthorized("Invalid token type".to_string()));
        }

        let token_hash = hash_token(&req.refresh_token);

        let stored_token = self
            .refresh_token_repo
            .find_by_hash(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized("Refresh token not found or expired".to_string())
            })?;

        let user_id = claims.user_id()?;

        if stored_token.user_id != user_id {
            return Err(AppError::Unauthorized("Token user mismatch".to_string()));
        }

        let issued = issue_token_pair(
            user_id,
            &self.auth_service,
            self.access_token_expiry,
            self.refresh_token_expiry,
        )?;

        // Lost a race with a concurrent refresh or logout of the same token
        self.refresh_token_repo
            .rotate(&token_hash, issued.record)
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized("Refresh token not found or expired".to_string())
            })?;

        tracing::debug!(%user_id, "rotated refresh token");

        Ok(issued.response)
    }
}
