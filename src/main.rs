use travel_planner::application::auth::purge::run_purge_loop;
use travel_planner::infrastructure::auth::JwtAuthService;
use travel_planner::infrastructure::config::AppConfig;
use travel_planner::infrastructure::db;
use travel_planner::infrastructure::state::AppState;
use travel_planner::presentation;

use dotenvy::dotenv;
use std::env;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_with_signal().await
}

async fn run_with_signal() -> anyhow::Result<()> {
    run(async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run<F>(shutdown_signal: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    dotenv().ok();

    // Tests call this more than once per process
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG")
                .unwrap_or_else(|_| "travel_planner=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    let config = AppConfig::from_env()?;
    let (listener, app) = bootstrap(&config).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn bootstrap(config: &AppConfig) -> anyhow::Result<(tokio::net::TcpListener, axum::Router)> {
    let pool = db::create_pool(&config.database_url).await?;
    db::migrate(&pool).await?;

    let auth_service = Arc::new(JwtAuthService::from_config(&config.auth)?);
    let state = AppState::new(pool, auth_service, config.auth.clone());

    tokio::spawn(run_purge_loop(
        state.refresh_token_repo.clone(),
        Duration::from_secs(config.token_purge_interval_secs.max(1)),
    ));

    let app = presentation::router::app(state)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    Ok((listener, app))
}
