use crate::domain::auth::{AuthService, NewRefreshToken, RefreshTokenRepository};
use crate::shared::error::AppError;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

/// Common response structure for token operations
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// A freshly signed token pair and the row that must be stored for its refresh half
pub struct IssuedTokens {
    pub response: TokenResponse,
    pub record: NewRefreshToken,
}

/// Generate SHA-256 hash of a token string
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sign an access/refresh pair without persisting anything
pub fn issue_token_pair(
    user_id: Uuid,
    auth_service: &Arc<dyn AuthService>,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
) -> Result<IssuedTokens, AppError> {
    let access_token = auth_service.generate_access_token(user_id)?;
    let refresh_token = auth_service.generate_refresh_token(user_id)?;

    let record = NewRefreshToken {
        user_id,
        token_hash: hash_token(&refresh_token),
        expires_at: OffsetDateTime::now_utc() + time::Duration::seconds(refresh_token_expiry),
    };

    Ok(IssuedTokens {
        response: TokenResponse {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: access_token_expiry,
        },
        record,
    })
}

/// Generate and store a complete token pair (access + refresh tokens)
pub async fn generate_and_store_tokens(
    user_id: Uuid,
    auth_service: &Arc<dyn AuthService>,
    refresh_token_repo: &Arc<dyn RefreshTokenRepository>,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
) -> Result<TokenResponse, AppError> {
    let issued = issue_token_pair(
        user_id,
        auth_service,
        access_token_expiry,
        refresh_token_expiry,
    )?;

    refresh_token_repo.create(issued.record).await?;

    Ok(issued.response)
}
