use crate::domain::auth::{AuthService, Claims};
use crate::infrastructure::state::AppState;
use crate::presentation::cookies::{ACCESS_TOKEN_COOKIE, cookie_value};
use crate::shared::error::AppError;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use axum_extra::extract::CookieJar;

/// Authenticated user extractor.
///
/// Reads the access token from `Authorization: Bearer ...`, falling back to
/// the `access_token` cookie set at login.
pub struct AuthUser {
    pub claims: Claims,
}

fn bearer_token(parts: &Parts) -> Result<Option<String>, AppError> {
    let Some(value) = parts.headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|token| Some(token.trim().to_string()))
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization header format".to_string()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match bearer_token(parts)? {
            Some(token) => token,
            None => cookie_value(&CookieJar::from_headers(&parts.headers), ACCESS_TOKEN_COOKIE)
                .ok_or_else(|| {
                    AppError::Unauthorized(
                        "Authentication credentials were not provided".to_string(),
                    )
                })?,
        };

        let claims = state
            .auth_service
            .validate_token(&token)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        if !claims.is_access() {
            return Err(AppError::Unauthorized("Invalid token type".to_string()));
        }

        Ok(AuthUser { claims })
    }
}
