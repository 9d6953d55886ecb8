use crate::application::auth::login::{LoginRequest, LoginResponse, LoginUseCase};
use crate::application::auth::logout::{LogoutRequest, LogoutUseCase};
use crate::application::auth::refresh::{
    RefreshTokenRequest, RefreshTokenResponse, RefreshTokenUseCase,
};
use crate::application::auth::register::{RegisterRequest, RegisterUseCase};
use crate::domain::users::User;
use crate::infrastructure::state::AppState;
use crate::presentation::cookies::{
    REFRESH_TOKEN_COOKIE, clear_token_cookies, cookie_value, set_token_cookies,
};
use crate::presentation::extractors::AuthUser;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::ApiResponse;
use crate::shared::validation::{ValidatedJson, parse_optional_json};
use axum::{Json, body::Bytes, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Public view of a registered user
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResource {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for UserResource {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub success: bool,
    /// Whether a stored refresh token was revoked
    pub revoked: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    pub user_id: Uuid,
    pub username: String,
}

/// Login handler (`token_obtain_pair`)
#[utoipa::path(
    post,
    path = "/api/login/",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, tokens also set as cookies", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let config = &state.auth_config;
    let use_case = LoginUseCase::new(
        state.user_repo.clone(),
        state.refresh_token_repo.clone(),
        state.auth_service.clone(),
        state.password_service.clone(),
        config.access_token_expiry,
        config.refresh_token_expiry,
    );

    let tokens = use_case.execute(req).await?;
    let jar = set_token_cookies(jar, &tokens, config);

    Ok((StatusCode::OK, jar, Json(ApiResponse::new(tokens))))
}

/// Refresh token handler (`token_refresh`)
#[utoipa::path(
    post,
    path = "/api/token/refresh/",
    request_body(content = RefreshTokenRequest, description = "Optional when the refresh_token cookie is present"),
    responses(
        (status = 200, description = "Token refreshed successfully", body = ApiResponse<RefreshTokenResponse>),
        (status = 401, description = "Missing, invalid or revoked refresh token", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let refresh_token = parse_optional_json::<RefreshTokenRequest>(&body)?
        .map(|req| req.refresh_token)
        .or_else(|| cookie_value(&jar, REFRESH_TOKEN_COOKIE))
        .ok_or_else(|| AppError::Unauthorized("Refresh token not provided".to_string()))?;

    let config = &state.auth_config;
    let use_case = RefreshTokenUseCase::new(
        state.refresh_token_repo.clone(),
        state.auth_service.clone(),
        config.access_token_expiry,
        config.refresh_token_expiry,
    );

    let tokens = use_case
        .execute(RefreshTokenRequest { refresh_token })
        .await?;
    let jar = set_token_cookies(jar, &tokens, config);

    Ok((StatusCode::OK, jar, Json(ApiResponse::new(tokens))))
}

/// Logout handler (`logout`): revokes the refresh token and clears the cookies
#[utoipa::path(
    post,
    path = "/api/logout/",
    request_body(content = LogoutRequest, description = "Optional when the refresh_token cookie is present"),
    responses(
        (status = 200, description = "Logged out", body = ApiResponse<LogoutResponse>),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let refresh_token = parse_optional_json::<LogoutRequest>(&body)?
        .and_then(|req| req.refresh_token)
        .or_else(|| cookie_value(&jar, REFRESH_TOKEN_COOKIE));

    let revoked = LogoutUseCase::new(state.refresh_token_repo.clone())
        .execute(refresh_token.as_deref())
        .await?;

    Ok((
        StatusCode::OK,
        clear_token_cookies(jar),
        Json(ApiResponse::new(LogoutResponse {
            success: true,
            revoked,
        })),
    ))
}

/// Authentication status handler (`is_authenticated`)
#[utoipa::path(
    get,
    path = "/api/authenticated/",
    responses(
        (status = 200, description = "Caller holds a valid access token", body = ApiResponse<AuthStatusResponse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
pub async fn is_authenticated(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let user_id = auth_user
        .claims
        .user_id()
        .map_err(|e| AppError::Unauthorized(e.to_string()))?;

    let user = state
        .user_repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

    Ok(Json(ApiResponse::new(AuthStatusResponse {
        authenticated: true,
        user_id: user.id,
        username: user.username,
    })))
}

/// Registration handler (`register`)
#[utoipa::path(
    post,
    path = "/api/register/",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<UserResource>),
        (status = 422, description = "Validation error or username/email taken", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = RegisterUseCase::new(state.user_repo.clone(), state.password_service.clone());
    let user = use_case.execute(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(UserResource::from(user))),
    ))
}
