//! In-memory repositories backing unit tests and database-free router tests.

use crate::domain::auth::{NewRefreshToken, RefreshToken, RefreshTokenRepository};
use crate::domain::users::{DuplicateUser, NewUser, User, UserRepository};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use time::OffsetDateTime;
use uuid::Uuid;

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| anyhow::anyhow!("in-memory repository lock poisoned"))
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn len(&self) -> usize {
        self.users.lock().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        let mut users = lock(&self.users)?;

        if users.iter().any(|u| u.username == new_user.username) {
            return Err(DuplicateUser::Username.into());
        }
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(DuplicateUser::Email.into());
        }

        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(lock(&self.users)?.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(lock(&self.users)?
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(lock(&self.users)?.iter().find(|u| u.email == email).cloned())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: Arc<Mutex<Vec<RefreshToken>>>,
}

impl InMemoryRefreshTokenRepository {
    /// Number of stored rows, expired ones included
    pub fn len(&self) -> usize {
        self.tokens.lock().map(|tokens| tokens.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn to_row(token: NewRefreshToken) -> RefreshToken {
        RefreshToken {
            id: Uuid::new_v4(),
            user_id: token.user_id,
            token_hash: token.token_hash,
            expires_at: token.expires_at,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn create(&self, token: NewRefreshToken) -> Result<RefreshToken> {
        let row = Self::to_row(token);
        lock(&self.tokens)?.push(row.clone());
        Ok(row)
    }

    async fn rotate(
        &self,
        old_hash: &str,
        replacement: NewRefreshToken,
    ) -> Result<Option<RefreshToken>> {
        let mut tokens = lock(&self.tokens)?;
        let now = OffsetDateTime::now_utc();

        let Some(index) = tokens
            .iter()
            .position(|t| t.token_hash == old_hash && t.expires_at > now)
        else {
            return Ok(None);
        };

        tokens.remove(index);
        let row = Self::to_row(replacement);
        tokens.push(row.clone());
        Ok(Some(row))
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>> {
        let now = OffsetDateTime::now_utc();
        Ok(lock(&self.tokens)?
            .iter()
            .find(|t| t.token_hash == token_hash && t.expires_at > now)
            .cloned())
    }

    async fn delete_expired(&self) -> Result<u64> {
        let mut tokens = lock(&self.tokens)?;
        let now = OffsetDateTime::now_utc();
        let before = tokens.len();
        tokens.retain(|t| t.expires_at > now);
        Ok((before - tokens.len()) as u64)
    }

    async fn delete_by_hash(&self, token_hash: &str) -> Result<bool> {
        let mut tokens = lock(&self.tokens)?;
        let before = tokens.len();
        tokens.retain(|t| t.token_hash != token_hash);
        Ok(tokens.len() < before)
    }
}
