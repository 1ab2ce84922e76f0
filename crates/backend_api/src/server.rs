use std::net::SocketAddr;

use crate::{router::create_router, state::SharedState};

const DEFAULT_LOG_FILTER: &str =
    "backend_api=debug,life_cost=info,city_store=info,settings_loader=info,tower_http=debug";

/// Install the global tracing subscriber, honouring RUST_LOG
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();
}

/// Run the API server
pub async fn run_server(state: SharedState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("{}:{}", host, port).parse::<SocketAddr>()?;
    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
