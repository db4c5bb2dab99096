//! axum surface over [`CatalogueService`].
//!
//! | Route                  | Success | Failure                 |
//! |------------------------|---------|-------------------------|
//! | `GET /recipes`         | 200     | 500                     |
//! | `POST /recipes`        | 201     | 400, 500                |
//! | `PUT /recipes/{id}`    | 200     | 400, 404, 500           |
//! | `DELETE /recipes/{id}` | 200     | 404, 500                |

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::core::catalogue::CatalogueService;
use crate::core::{RecipeRepository, ReferenceLookup};
use handlers::{create_recipe, delete_recipe, hello_handler, replace_recipe, search_recipes};

pub fn build_router<L, R>(service: Arc<CatalogueService<L, R>>) -> Router
where
    L: ReferenceLookup + 'static,
    R: RecipeRepository + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/test", get(hello_handler))
        .route(
            "/recipes",
            get(search_recipes::<L, R>).post(create_recipe::<L, R>),
        )
        .route(
            "/recipes/{id}",
            put(replace_recipe::<L, R>).delete(delete_recipe::<L, R>),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service)
}

/// Serve until Ctrl+C or SIGTERM.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    if let Ok(address) = listener.local_addr() {
        info!("Server running on {}", address);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
