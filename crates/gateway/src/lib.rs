//! API Gateway Library
//!
//! HTTP REST API over the embedded account service.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use tracing::info;

use account_service_lib::config::AccountServiceConfig;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Connect the account service and serve HTTP until shutdown.
///
/// Pending migrations (including the administrator seed) are applied on
/// startup.
pub async fn run_server(
    config: GatewayConfig,
    accounts: AccountServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let (db, service) = account_service_lib::connect(&accounts).await?;

    let state = AppState::new(service, Some(db));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
