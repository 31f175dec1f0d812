//! # Generic Messages
//!
//! The request type sent from a `ResourceClient` to its `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants are the standard collection operations plus `Action` for
/// record-specific logic that doesn't fit the CRUD model:
///
/// - **List**: Runs [`ActorEntity::query`] over the whole collection.
/// - **Create**: Uses [`ActorEntity::Create`] to build and append a new record.
/// - **Get**: Fetches the current state of one record by ID.
/// - **Update**: Uses [`ActorEntity::Update`] to modify an existing record.
/// - **Delete**: Removes the record and returns it.
/// - **Action**: Executes a custom [`ActorEntity::Action`] against one record.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    List {
        query: T::Query,
        respond_to: Response<T::Page>,
    },
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<T>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
