use crate::domain::users::{DuplicateUser, NewUser, User, UserRepository};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::UserDbModel;
use async_trait::async_trait;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";
const EMAIL_CONSTRAINT: &str = "users_email_key";

fn map_insert_error(err: sqlx::Error) -> anyhow::Error {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            if db.constraint() == Some(EMAIL_CONSTRAINT) {
                DuplicateUser::Email.into()
            } else {
                DuplicateUser::Username.into()
            }
        }
        other => other.into(),
    }
}

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: DbPool,
}

impl PostgresUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &'static str, value: &str) -> Result<Option<User>, anyhow::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        let user = sqlx::query_as::<_, UserDbModel>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user.map(Into::into))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, anyhow::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, UserDbModel>(&query)
            .bind(new_user.username)
            .bind(new_user.email)
            .bind(new_user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(map_insert_error)?;

        Ok(user.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, anyhow::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, UserDbModel>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, anyhow::Error> {
        self.find_one("username", username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, anyhow::Error> {
        self.find_one("email", email).await
    }
}
