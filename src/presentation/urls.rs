//! URL configuration of the user authentication endpoints.
//!
//! [`URLPATTERNS`] binds each path pattern to the view serving it and to a
//! symbolic name. Other code builds links with [`reverse`] / [`UrlConf::url_for`]
//! instead of hardcoding paths. The table is a `static`: it is never mutated,
//! so request tasks read it concurrently without locking.

use crate::infrastructure::state::AppState;
use crate::presentation::handlers::auth;
use axum::Router;
use axum::routing::{MethodRouter, get, post};
use std::collections::HashMap;
use thiserror::Error;

/// Prefix the table is nested under
pub const MOUNT_POINT: &str = "/api";

/// Builds the method router serving one pattern
pub type View = fn() -> MethodRouter<AppState>;

/// Binding of a path pattern to a view and a symbolic name
#[derive(Debug, Clone, Copy)]
pub struct Route {
    /// Pattern relative to the mount point, always with a trailing slash
    pub path: &'static str,
    pub view: View,
    pub name: &'static str,
}

impl Route {
    pub const fn new(path: &'static str, view: View, name: &'static str) -> Self {
        Self { path, view, name }
    }

    /// Path in the form axum expects (leading slash)
    pub fn router_path(&self) -> String {
        format!("/{}", self.path)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("route name '{0}' is declared more than once")]
    DuplicateName(&'static str),
    #[error("path '{path}' is bound to both '{first}' and '{second}'")]
    DuplicatePath {
        path: &'static str,
        first: &'static str,
        second: &'static str,
    },
    #[error("malformed route pattern '{path}': {reason}")]
    MalformedPattern {
        path: &'static str,
        reason: &'static str,
    },
    #[error("reverse for '{0}' not found")]
    NoReverseMatch(String),
}

fn token_obtain_pair_view() -> MethodRouter<AppState> {
    post(auth::login)
}

fn token_refresh_view() -> MethodRouter<AppState> {
    post(auth::refresh_token)
}

fn logout_view() -> MethodRouter<AppState> {
    post(auth::logout)
}

fn is_authenticated_view() -> MethodRouter<AppState> {
    get(auth::is_authenticated)
}

fn register_view() -> MethodRouter<AppState> {
    post(auth::register)
}

pub static URLPATTERNS: [Route; 5] = [
    Route::new("login/", token_obtain_pair_view, "token_obtain_pair"),
    Route::new("token/refresh/", token_refresh_view, "token_refresh"),
    Route::new("logout/", logout_view, "logout"),
    Route::new("authenticated/", is_authenticated_view, "is_authenticated"),
    Route::new("register/", register_view, "register"),
];

fn check_pattern(path: &'static str) -> Result<(), UrlError> {
    let malformed = |reason| Err(UrlError::MalformedPattern { path, reason });

    if path.is_empty() {
        return malformed("pattern is empty");
    }
    if path.starts_with('/') {
        return malformed("pattern must be relative to the mount point");
    }
    if !path.ends_with('/') {
        return malformed("pattern must end with a slash");
    }
    if path.contains("//") {
        return malformed("pattern contains an empty segment");
    }
    if !path
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.'))
    {
        return malformed("pattern may only contain letters, digits, '-', '_', '.' and '/'");
    }
    Ok(())
}

/// A validated route table
#[derive(Debug, Clone, Copy)]
pub struct UrlConf {
    routes: &'static [Route],
}

impl UrlConf {
    /// Validate `routes`, rejecting malformed patterns and duplicate names or paths
    pub fn new(routes: &'static [Route]) -> Result<Self, UrlError> {
        let mut names = HashMap::with_capacity(routes.len());
        let mut paths: HashMap<&'static str, &'static str> = HashMap::with_capacity(routes.len());

        for route in routes {
            check_pattern(route.path)?;

            if names.insert(route.name, route.path).is_some() {
                return Err(UrlError::DuplicateName(route.name));
            }
            if let Some(first) = paths.insert(route.path, route.name) {
                return Err(UrlError::DuplicatePath {
                    path: route.path,
                    first,
                    second: route.name,
                });
            }
        }

        Ok(Self { routes })
    }

    pub fn routes(&self) -> &'static [Route] {
        self.routes
    }

    /// Pattern registered under `name`, relative to the mount point
    pub fn reverse(&self, name: &str) -> Result<&'static str, UrlError> {
        self.routes
            .iter()
            .find(|route| route.name == name)
            .map(|route| route.path)
            .ok_or_else(|| UrlError::NoReverseMatch(name.to_string()))
    }

    /// Absolute path of `name`, mount point included
    pub fn url_for(&self, name: &str) -> Result<String, UrlError> {
        self.reverse(name)
            .map(|path| format!("{}/{}", MOUNT_POINT, path))
    }

    /// Axum router serving every binding, meant to be nested at [`MOUNT_POINT`]
    pub fn router(&self) -> Router<AppState> {
        self.routes.iter().fold(Router::new(), |router, route| {
            router.route(&route.router_path(), (route.view)())
        })
    }
}

/// Reverse lookup against [`URLPATTERNS`]
pub fn reverse(name: &str) -> Result<&'static str, UrlError> {
    UrlConf { routes: &URLPATTERNS }.reverse(name)
}
