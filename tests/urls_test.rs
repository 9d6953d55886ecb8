mod common;

use axum::http::StatusCode;
use std::collections::HashSet;
use tower::ServiceExt;
use travel_planner::presentation::router;
use travel_planner::presentation::urls::{MOUNT_POINT, URLPATTERNS, UrlConf, UrlError, reverse};

#[test]
fn test_reverse_returns_literal_paths() {
    let expected = [
        ("token_obtain_pair", "login/"),
        ("token_refresh", "token/refresh/"),
        ("logout", "logout/"),
        ("is_authenticated", "authenticated/"),
        ("register", "register/"),
    ];

    for (name, path) in expected {
        assert_eq!(reverse(name), Ok(path), "reverse({})", name);
    }
}

#[test]
fn test_table_has_five_unique_routes() {
    assert_eq!(URLPATTERNS.len(), 5);

    let names: HashSet<_> = URLPATTERNS.iter().map(|r| r.name).collect();
    let paths: HashSet<_> = URLPATTERNS.iter().map(|r| r.path).collect();
    assert_eq!(names.len(), 5);
    assert_eq!(paths.len(), 5);
}

#[test]
fn test_unknown_name_has_no_reverse() {
    assert!(matches!(reverse("admin"), Err(UrlError::NoReverseMatch(_))));
}

#[tokio::test]
async fn test_every_route_is_served() {
    let app = router::app(common::create_memory_app().state).unwrap();
    let urls = UrlConf::new(&URLPATTERNS).unwrap();

    for route in urls.routes() {
        let uri = urls.url_for(route.name).unwrap();
        assert!(uri.starts_with(MOUNT_POINT));

        // GET hits every binding: POST-only views answer 405, the
        // authentication check answers 401 without credentials.
        let response = app
            .clone()
            .oneshot(common::empty_request("GET", &uri))
            .await
            .unwrap();

        assert_ne!(
            response.status(),
            StatusCode::NOT_FOUND,
            "{} ({}) is not routed",
            uri,
            route.name
        );
    }
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let app = router::app(common::create_memory_app().state).unwrap();

    let response = app
        .clone()
        .oneshot(common::empty_request("GET", "/api/login/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = app
        .oneshot(common::empty_request("POST", "/api/authenticated/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unlisted_paths_are_not_found() {
    let app = router::app(common::create_memory_app().state).unwrap();

    for uri in ["/api/login", "/api/signup/", "/login/", "/api/token/"] {
        let response = app
            .clone()
            .oneshot(common::empty_request("POST", uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = router::app(common::create_memory_app().state).unwrap();

    let response = app
        .oneshot(common::empty_request("GET", "/api-docs/openapi.json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let doc = common::body_json(response).await;
    for route in URLPATTERNS.iter() {
        let path = format!("{}/{}", MOUNT_POINT, route.path);
        assert!(doc["paths"].get(&path).is_some(), "{} undocumented", path);
    }
}

#[tokio::test]
async fn test_health_reports_unavailable_database() {
    let app = router::app(common::create_memory_app().state).unwrap();

    let response = app
        .oneshot(common::empty_request("GET", "/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
