use crate::domain::password::PasswordHashingService;
use crate::domain::users::{DuplicateUser, NewUser, User, UserRepository};
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    #[schema(example = "marco", max_length = 150)]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "marco@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "wanderlust-2024", min_length = 8)]
    pub password: String,
}

impl RegisterRequest {
    /// Reject usernames and emails that are already taken
    pub async fn validate_unique(&self, repo: &Arc<dyn UserRepository>) -> Result<(), AppError> {
        if repo.find_by_username(&self.username).await?.is_some() {
            return Err(AppError::ValidationError(
                DuplicateUser::Username.to_string(),
            ));
        }
        if repo.find_by_email(&self.email).await?.is_some() {
            return Err(AppError::ValidationError(DuplicateUser::Email.to_string()));
        }
        Ok(())
    }
}

pub struct RegisterUseCase {
    repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHashingService>,
}

impl RegisterUseCase {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHashingService>,
    ) -> Self {
        Self {
            repo,
            password_hasher,
        }
    }

    #[tracing::instrument(skip(self, req), fields(username = %req.username))]
    pub async fn execute(&self, req: RegisterRequest) -> Result<User, AppError> {
        req.validate_unique(&self.repo).await?;

        let password_hash = self.password_hasher.hash_password(&req.password)?;

        let user = self
            .repo
            .create(NewUser {
                username: req.username,
                email: req.email,
                password_hash,
            })
            .await
            .map_err(|e| match e.downcast::<DuplicateUser>() {
                Ok(conflict) => AppError::ValidationError(conflict.to_string()),
                Err(e) => AppError::InternalServerError(e),
            })?;

        tracing::info!(user_id = %user.id, "registered user");
        Ok(user)
    }
}
