//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract every persisted record type (Product,
//! Cart, …) implements to be managed by the generic `ResourceActor`. It names the
//! payloads for each operation and provides the hooks the actor calls while it holds
//! the freshly loaded collection.
//!
//! Hooks receive the whole collection alongside the record they act on. That is how
//! collection-wide invariants, such as a field that must be unique across records, are
//! checked inside the single writer where no other request can interleave.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_delete`] defaults to allowing the delete.
//!
//! Every other hook must be implemented.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};

/// Trait that any persisted record must implement to be managed by ResourceActor.
///
/// # Atomicity
/// The actor runs `from_create_params`, `on_update` and `handle_action` against a
/// working copy. If the hook returns an error nothing is written, so a failed
/// operation never leaves a half-applied record in the collection file.
pub trait ActorEntity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The unique identifier stored inside each record.
    type Id: Eq + Clone + Send + Sync + Display + Debug + 'static;

    /// The data required to create a new record.
    type Create: Send + Sync + Debug + 'static;

    /// The data required to update an existing record.
    type Update: Send + Sync + Debug + 'static;

    /// Enum representing record-specific operations (e.g., `AddProduct`).
    type Action: Send + Sync + Debug + 'static;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug + 'static;

    /// Filter/sort/paging options accepted by a list request.
    type Query: Send + Sync + Debug + 'static;

    /// The result of a list request.
    type Page: Send + Sync + Debug + 'static;

    /// The error type for this entity.
    ///
    /// One enum covers every hook. The framework carries it boxed inside
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) and
    /// clients downcast it back to recover the concrete kind.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identifier of this record.
    fn id(&self) -> &Self::Id;

    /// Builds a new record from a freshly generated id and the create payload.
    ///
    /// `collection` is the current content of the collection file, not including
    /// the new record.
    fn from_create_params(
        id: Self::Id,
        params: Self::Create,
        collection: &[Self],
    ) -> Result<Self, Self::Error>;

    /// Applies an update in place.
    ///
    /// `collection` still contains the record as it was before the update.
    fn on_update(&mut self, update: Self::Update, collection: &[Self]) -> Result<(), Self::Error>;

    /// Called before the record is removed. Returning an error vetoes the delete.
    fn on_delete(&self, _collection: &[Self]) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a custom record-specific action.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;

    /// Answers a list request from the full collection, in stored order.
    fn query(collection: Vec<Self>, query: Self::Query) -> Result<Self::Page, Self::Error>;
}
