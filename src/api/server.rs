use std::future::Future;
use std::net::SocketAddr;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};
use tracing::{info, error};

use crate::api::{routes, state::ApiState};

/// Start the API server and serve until `shutdown` resolves
pub async fn start_api_server<F>(
    state: ApiState,
    host: &str,
    port: u16,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_app(state);

    let addr = format!("{}:{}", host, port);
    let socket_addr: SocketAddr = addr.parse()?;

    let listener = TcpListener::bind(socket_addr).await?;

    info!(address = %addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| {
            error!(error = %e, "API server error");
            e.into()
        })
}

/// Create the Axum application with middleware
fn create_app(state: ApiState) -> Router {
    let router = routes::create_router(state);

    router
        // The portfolio frontend calls from a different origin
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .layer(TraceLayer::new_for_http())
}
