//! # Shop Store
//!
//! Serves the product and cart API over HTTP.
//!
//! ## Core Components
//!
//! - **[collection_actor]**: The generic single-writer [`ResourceActor`](collection_actor::ResourceActor) and its JSON collection files.
//! - **model**: Pure data structures (`Product`, `Cart`) that implement the `ActorEntity` trait.
//! - **clients**: Type-safe wrappers (`ProductClient`, `CartClient`) that hide the message passing.
//! - **lifecycle**: Starts and stops the actors.
//! - **http**: The axum router.
//!
//! Configuration comes from `SHOP_*` environment variables, see `shop_store::config`.

use shop_store::config::StoreConfig;
use shop_store::http::{self, AppState};
use shop_store::lifecycle::{setup_tracing, ShopSystem};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = StoreConfig::from_env().map_err(|e| e.to_string())?;

    // Setup tracing once for the entire application
    setup_tracing(config.environment.default_log_directive());
    info!(?config, "Starting shop store");

    let system = ShopSystem::new(&config);
    let app = http::router(AppState {
        products: system.product_client.clone(),
        carts: system.cart_client.clone(),
    });

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {addr}: {e}"))?;
    info!(%addr, "listening");

    // The router (and its client clones) is dropped when serve returns
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server error");
    }

    system.shutdown().await?;
    info!("Shop store stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
