use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub const ACCESS_TOKEN_TYPE: &str = "access";
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

/// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Unique token ID, keeps two tokens issued in the same second apart
    pub jti: String,
    /// Token type: "access" or "refresh"
    #[serde(rename = "type")]
    pub token_type: String,
}

impl Claims {
    fn issue(user_id: Uuid, token_type: &str, expiry_seconds: i64) -> Self {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        Self {
            sub: user_id.to_string(),
            iat: now,
            exp: now + expiry_seconds,
            jti: Uuid::new_v4().to_string(),
            token_type: token_type.to_string(),
        }
    }

    pub fn new_access_token(user_id: Uuid, expiry_seconds: i64) -> Self {
        Self::issue(user_id, ACCESS_TOKEN_TYPE, expiry_seconds)
    }

    pub fn new_refresh_token(user_id: Uuid, expiry_seconds: i64) -> Self {
        Self::issue(user_id, REFRESH_TOKEN_TYPE, expiry_seconds)
    }

    pub fn is_access(&self) -> bool {
        self.token_type == ACCESS_TOKEN_TYPE
    }

    pub fn is_refresh(&self) -> bool {
        self.token_type == REFRESH_TOKEN_TYPE
    }

    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|e| anyhow::anyhow!("Invalid user ID in claims: {}", e))
    }
}

/// Refresh token entity
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

/// New refresh token for creation
#[derive(Debug, Clone)]
pub struct NewRefreshToken {
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: OffsetDateTime,
}

/// Repository trait for refresh tokens.
///
/// Only hashes are stored. Removing a row is how a refresh token gets revoked.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Create a new refresh token
    async fn create(&self, token: NewRefreshToken) -> Result<RefreshToken>;

    /// Atomically replace an unexpired token with a new one.
    ///
    /// Returns `None` when `old_hash` was already gone, so a refresh token
    /// can only ever be exchanged once.
    async fn rotate(
        &self,
        old_hash: &str,
        replacement: NewRefreshToken,
    ) -> Result<Option<RefreshToken>>;

    /// Find an unexpired refresh token by its hash
    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>>;

    /// Delete expired refresh tokens
    async fn delete_expired(&self) -> Result<u64>;

    /// Delete a specific refresh token by hash
    async fn delete_by_hash(&self, token_hash: &str) -> Result<bool>;
}

/// Auth service trait for JWT operations
pub trait AuthService: Send + Sync {
    /// Generate an access token for a user
    fn generate_access_token(&self, user_id: Uuid) -> Result<String>;

    /// Generate a refresh token for a user
    fn generate_refresh_token(&self, user_id: Uuid) -> Result<String>;

    /// Validate and decode a token
    fn validate_token(&self, token: &str) -> Result<Claims>;
}
