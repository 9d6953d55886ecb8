use crate::domain::auth::RefreshTokenRepository;
use std::sync::Arc;
use std::time::Duration;

/// Remove refresh tokens past their expiry
pub async fn purge_expired_tokens(repo: &Arc<dyn RefreshTokenRepository>) -> anyhow::Result<u64> {
    let purged = repo.delete_expired().await?;
    if purged > 0 {
        tracing::info!(purged, "purged expired refresh tokens");
    }
    Ok(purged)
}

/// Run [`purge_expired_tokens`] every `interval` until the task is dropped
pub async fn run_purge_loop(repo: Arc<dyn RefreshTokenRepository>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        if let Err(e) = purge_expired_tokens(&repo).await {
            tracing::warn!("Failed to purge expired refresh tokens: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::NewRefreshToken;
    use crate::infrastructure::repositories::memory::InMemoryRefreshTokenRepository;
    use time::OffsetDateTime;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_purge_expired_tokens() {
        let memory = InMemoryRefreshTokenRepository::default();
        for offset in [-60, -1, 3600] {
            memory
                .create(NewRefreshToken {
                    user_id: Uuid::new_v4(),
                    token_hash: format!("hash{offset}"),
                    expires_at: OffsetDateTime::now_utc() + time::Duration::seconds(offset),
                })
                .await
                .unwrap();
        }

        let repo: Arc<dyn RefreshTokenRepository> = Arc::new(memory.clone());
        assert_eq!(purge_expired_tokens(&repo).await.unwrap(), 2);
        assert_eq!(memory.len(), 1);
    }
}
