//! Frontend application entry point.

use frontend::app::App;

fn main() {
    #[cfg(not(feature = "server"))]
    dioxus::launch(App);

    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        use std::sync::Arc;

        use axum::{extract::Request, middleware::Next};
        use backend::{
            config::filter_config,
            listing::listing_fields::InMemoryListingStore,
            server_extra::{FilterApiState, router},
        };
        use dioxus::logger::tracing::debug;
        use dioxus::server::axum;

        let state = FilterApiState {
            config: Arc::new(filter_config()?.clone()),
            store: Arc::new(InMemoryListingStore::default()),
        };

        Ok(dioxus::server::router(App)
            .merge(router(state))
            .layer(axum::middleware::from_fn(
                |request: Request, next: Next| async move {
                    let method = request.method().clone();
                    let path = request.uri().path().to_string();
                    let res = next.run(request).await;
                    debug!("{} {} -> {}", method, path, res.status());
                    res
                },
            )))
    });
}
