//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global `tracing` subscriber: compact format, no
//! module prefix (`with_target(false)`), filtered by `RUST_LOG` when it is set and by
//! the profile's default directive otherwise.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: `Actor started` with the collection path, `Shutdown`
//! - **Mutations**: `Created`, `Updated`, `Deleted`, `Action ok` at info with the record id
//! - **Requests**: client calls and actor requests at debug, with full payloads
//! - **Failures**: rejected operations at warn, 5xx HTTP responses at error
//!
//! ## Usage Examples
//!
//! ```bash
//! # Profile default (development => debug)
//! cargo run
//!
//! # Only mutations and lifecycle
//! RUST_LOG=info cargo run
//!
//! # Production profile, quiet unless something breaks
//! SHOP_ENV=production cargo run
//! ```
//!
//! With `RUST_LOG=info` adding a product to a cart looks like:
//!
//! ```text
//! INFO Actor started entity_type="Product" path="data/products.json"
//! INFO Actor started entity_type="Cart" path="data/carts.json"
//! INFO listening addr=127.0.0.1:8080
//! INFO Action ok entity_type="Cart" id=5c1f...
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Call once, at startup.
///
/// `default_directive` is used when `RUST_LOG` is unset or invalid.
pub fn setup_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type identifies the actor instead
        .compact()
        .init();
}
