use crate::application::auth::token_utils::hash_token;
use crate::domain::auth::RefreshTokenRepository;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate, utoipa::ToSchema)]
pub struct LogoutRequest {
    /// Falls back to the `refresh_token` cookie when omitted
    #[validate(length(min = 1, message = "Refresh token must not be empty"))]
    pub refresh_token: Option<String>,
}

/// Revokes the presented refresh token.
///
/// Logging out is idempotent: a missing, unknown or already revoked token is
/// not an error, the caller only learns whether something was revoked.
pub struct LogoutUseCase {
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
}

impl LogoutUseCase {
    pub fn new(refresh_token_repo: Arc<dyn RefreshTokenRepository>) -> Self {
        Self { refresh_token_repo }
    }

    #[tracing::instrument(skip_all)]
    pub async fn execute(&self, refresh_token: Option<&str>) -> Result<bool, AppError> {
        let Some(token) = refresh_token.filter(|t| !t.is_empty()) else {
            return Ok(false);
        };

        let revoked = self
            .refresh_token_repo
            .delete_by_hash(&hash_token(token))
            .await?;

        tracing::debug!(revoked, "logout");
        Ok(revoked)
    }
}
