use crate::shared::error::AppError;
use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::ValidationError(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        Ok(ValidatedJson(value))
    }
}

/// Parse a body that may legitimately be empty.
///
/// Token endpoints also accept their token from a cookie, so a missing body
/// is `Ok(None)` rather than a rejection.
pub fn parse_optional_json<T>(body: &Bytes) -> Result<Option<T>, AppError>
where
    T: DeserializeOwned + Validate,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let value: T = serde_json::from_slice(body)
        .map_err(|e| AppError::ValidationError(format!("Invalid JSON body: {}", e)))?;

    value
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    Ok(Some(value))
}
