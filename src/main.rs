use interview_backend::{
    build_router,
    config::{get_config, init_config},
    AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("interview_backend=info,tower_http=info")),
        )
        .init();
    init_config()?;
    let config = get_config();

    let app_state = AppState::new(config)?;
    info!(
        url = %config.inference_url,
        retries = config.inference_max_retries,
        "Inference client configured"
    );

    let app = build_router(app_state)
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(ConcurrencyLimitLayer::new(config.max_concurrent_requests.max(1)))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
