//! # System Lifecycle
//!
//! This module starts the actors, hands out their clients and shuts them down.
//!
//! ## The ShopSystem Pattern
//!
//! [`ShopSystem::new`] spawns one actor per collection file and wraps each generic
//! `ResourceClient` in its typed client. The clients are cheap to clone; the HTTP
//! layer keeps its own clones in the router state.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - Closes the sender side of channels
//! 2. **Actors detect closure** - `receiver.recv()` returns `None` once the queue is drained
//! 3. **Await completion** - [`ShopSystem::shutdown`] waits for both actor tasks
//!
//! Every request accepted before shutdown is still written to its file.
//!
//! ## Observability
//!
//! [`setup_tracing`] initializes structured logging for the whole process. See the
//! [`tracing`](self::tracing) module for what gets logged at which level.

pub mod shop_system;
pub mod tracing;

pub use self::shop_system::*;
pub use self::tracing::*;
