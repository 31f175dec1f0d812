use tracing::{error, info};

use crate::clients::{CartClient, ProductClient};
use crate::config::StoreConfig;

/// The runtime orchestrator for the product and cart stores.
///
/// `ShopSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping both actors
/// - **Wiring**: Handing each actor its collection file and mailbox size
///
/// # Architecture
///
/// The system consists of two independent actors:
/// - **Product Actor**: Owns the product collection file
/// - **Cart Actor**: Owns the cart collection file
///
/// Neither depends on the other; a cart line item stores only a product id.
///
/// # Example
///
/// ```ignore
/// let system = ShopSystem::new(&StoreConfig::from_env()?);
///
/// let cart = system.cart_client.create_cart().await?;
/// let product = system.product_client.add_product(draft).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct ShopSystem {
    /// Client for interacting with the Product actor
    pub product_client: ProductClient,

    /// Client for interacting with the Cart actor
    pub cart_client: CartClient,

    /// Task handles for the running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ShopSystem {
    /// Spawns both actors on the current Tokio runtime.
    ///
    /// The collection files are not touched until the first request; a missing file
    /// is created empty then.
    pub fn new(config: &StoreConfig) -> Self {
        let (product_actor, product_client) =
            crate::product_actor::new(&config.products_file, config.channel_capacity);
        let (cart_actor, cart_client) =
            crate::cart_actor::new(&config.carts_file, config.channel_capacity);

        let product_handle = tokio::spawn(product_actor.run());
        let cart_handle = tokio::spawn(cart_actor.run());

        Self {
            product_client: ProductClient::new(product_client),
            cart_client: CartClient::new(cart_client),
            handles: vec![product_handle, cart_handle],
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the clients closes the channels; each actor finishes the requests
    /// already queued and exits. Clones of the clients held elsewhere (for example
    /// by the HTTP router) must be dropped first or this waits for them.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if both actors shut down cleanly
    /// - `Err(String)` if an actor task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.product_client);
        drop(self.cart_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
