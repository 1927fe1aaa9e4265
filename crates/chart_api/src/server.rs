use std::net::SocketAddr;

use crate::{router::create_router, state::AppState};

/// Install the global tracing subscriber, honouring `RUST_LOG` when set
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "chart_api=debug,chart_engine=debug,ephemeris=info,tower_http=debug".into()
            }),
        )
        .init();
}

/// Run the API server
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    if !state.engine.is_ready() {
        tracing::warn!("Starting without an ephemeris engine; chart requests will fail with 500");
    }

    let app = create_router(state);

    let addr = format!("{}:{}", host, port).parse::<SocketAddr>()?;
    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
