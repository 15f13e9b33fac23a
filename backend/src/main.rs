//! Standalone HTTP server for the facet filter API.

use std::sync::Arc;

use anyhow::Context;
use backend::{
    config::filter_config,
    listing::listing_fields::InMemoryListingStore,
    server_extra::{FilterApiState, router},
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,backend=debug".into()),
        )
        .init();

    let bind_addr = std::env::var("FACET_FILTERS_BIND_ADDR").unwrap_or("0.0.0.0:8081".to_string());
    let state = FilterApiState {
        config: Arc::new(filter_config()?.clone()),
        store: Arc::new(InMemoryListingStore::default()),
    };

    let listener = TcpListener::bind(&bind_addr).await.with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!("facet filter api listening on {}", bind_addr);
    axum::serve(listener, router(state)).await.context("serving facet filter api")?;
    Ok(())
}
