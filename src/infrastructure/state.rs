use crate::domain::auth::RefreshTokenRepository;
use crate::domain::password::PasswordHashingService;
use crate::domain::users::UserRepository;
use crate::infrastructure::auth::JwtAuthService;
use crate::infrastructure::config::AuthConfig;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::password::PasswordService;
use crate::infrastructure::repositories::refresh_tokens::PostgresRefreshTokenRepository;
use crate::infrastructure::repositories::users::PostgresUserRepository;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub auth_service: Arc<JwtAuthService>,
    pub auth_config: AuthConfig,
    pub user_repo: Arc<dyn UserRepository>,
    pub refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    pub password_service: Arc<dyn PasswordHashingService>,
}

impl AppState {
    /// State backed by Postgres repositories on `pool`
    pub fn new(pool: DbPool, auth_service: Arc<JwtAuthService>, auth_config: AuthConfig) -> Self {
        Self {
            user_repo: Arc::new(PostgresUserRepository::new(pool.clone())),
            refresh_token_repo: Arc::new(PostgresRefreshTokenRepository::new(pool.clone())),
            password_service: Arc::new(PasswordService::new()),
            pool,
            auth_service,
            auth_config,
        }
    }

    pub fn with_user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = repo;
        self
    }

    pub fn with_refresh_token_repo(mut self, repo: Arc<dyn RefreshTokenRepository>) -> Self {
        self.refresh_token_repo = repo;
        self
    }

    pub fn with_password_service(mut self, service: Arc<dyn PasswordHashingService>) -> Self {
        self.password_service = service;
        self
    }
}
