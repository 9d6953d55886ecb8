use crate::application::auth::login::{LoginRequest, LoginResponse};
use crate::application::auth::logout::LogoutRequest;
use crate::application::auth::refresh::{RefreshTokenRequest, RefreshTokenResponse};
use crate::application::auth::register::RegisterRequest;
use crate::presentation::handlers::auth::{AuthStatusResponse, LogoutResponse, UserResource};
use crate::shared::error::{ApiError, ErrorResponse};
use crate::shared::response::ApiResponse;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Travel Planner Users API",
        version = "0.1.0",
        description = "Authentication endpoints of the travel planner.\n\nTokens are returned in the body and also set as HttpOnly `access_token` / `refresh_token` cookies."
    ),
    paths(
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::auth::refresh_token,
        crate::presentation::handlers::auth::logout,
        crate::presentation::handlers::auth::is_authenticated,
        crate::presentation::handlers::auth::register,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            RefreshTokenRequest,
            RefreshTokenResponse,
            LogoutRequest,
            RegisterRequest,
            UserResource,
            LogoutResponse,
            AuthStatusResponse,
            ApiResponse<LoginResponse>,
            ApiResponse<UserResource>,
            ApiResponse<LogoutResponse>,
            ApiResponse<AuthStatusResponse>,
            ErrorResponse,
            ApiError,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::urls::{URLPATTERNS, UrlConf};

    #[test]
    fn test_every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let urls = UrlConf::new(&URLPATTERNS).unwrap();

        for route in urls.routes() {
            let url = urls.url_for(route.name).unwrap();
            assert!(
                doc.paths.paths.contains_key(&url),
                "{} ({}) missing from OpenAPI document",
                url,
                route.name
            );
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
