//! # Collection Actor
//!
//! Building blocks for storing records in flat JSON files without ever losing a write.
//!
//! Each collection file is owned by exactly one [`ResourceActor`]. The actor runs in its
//! own Tokio task and is the only code that touches the file; everyone else talks to it
//! through a cloneable [`ResourceClient`]. Because the actor handles one request at a
//! time, every request's read-modify-write of the file is serialized, and two
//! concurrent updates to the same collection can't overwrite each other.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the record type and its validation hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing and the load/save cycle
//! 3. **Storage Layer** ([`JsonCollection`]) - whole-file JSON reads and atomic writes
//! 4. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - type-safe requests
//!
//! ## Example
//!
//! ```rust
//! use collection_actor::{ActorEntity, JsonCollection, ResourceActor};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Debug, Serialize, Deserialize)]
//! struct Tag { id: u32, name: String }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("duplicate tag {0}")]
//! struct TagError(String);
//!
//! impl ActorEntity for Tag {
//!     type Id = u32; type Create = String; type Update = String;
//!     type Action = (); type ActionResult = (); type Query = (); type Page = Vec<Tag>;
//!     type Error = TagError;
//!
//!     fn id(&self) -> &u32 { &self.id }
//!     fn from_create_params(id: u32, name: String, all: &[Self]) -> Result<Self, TagError> {
//!         if all.iter().any(|t| t.name == name) { return Err(TagError(name)); }
//!         Ok(Self { id, name })
//!     }
//!     fn on_update(&mut self, name: String, _: &[Self]) -> Result<(), TagError> { self.name = name; Ok(()) }
//!     fn handle_action(&mut self, _: ()) -> Result<(), TagError> { Ok(()) }
//!     fn query(all: Vec<Self>, _: ()) -> Result<Vec<Self>, TagError> { Ok(all) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let dir = tempfile::tempdir().unwrap();
//!     let next = std::sync::atomic::AtomicU32::new(1);
//!     let (actor, client) = ResourceActor::<Tag>::new(
//!         8,
//!         JsonCollection::new(dir.path().join("tags.json")),
//!         move || next.fetch_add(1, std::sync::atomic::Ordering::SeqCst),
//!     );
//!     tokio::spawn(actor.run());
//!
//!     let tag = client.create("rust".to_string()).await.unwrap();
//!     assert!(client.create("rust".to_string()).await.is_err());
//!     assert_eq!(client.list(()).await.unwrap().len(), 1);
//!     assert_eq!(client.get(tag.id).await.unwrap().unwrap().name, "rust");
//! }
//! ```
//!
//! ## Testing
//!
//! The [`mock`] module answers client requests from a queue of expectations, so code
//! built on top of a client can be tested without an actor or a file.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod persistence;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use persistence::{JsonCollection, StorageError};
