//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the single writer for one collection file.
//! It processes requests sequentially, so every read-modify-write cycle on the file
//! runs to completion before the next one starts.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::persistence::JsonCollection;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns a collection file.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the collection file and
/// the receiver end of the channel.
///
/// **Concurrency Model**:
/// Any number of cloned `ResourceClient`s can send requests at the same time, but the
/// actor handles them one at a time in its own Tokio task. Each request loads the whole
/// collection, applies the change to it and writes it back before the next request is
/// taken off the channel. Two concurrent writers can therefore never overwrite each
/// other's changes, without a file lock or a `Mutex`.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Run**: Spawn `actor.run()` in a background task.
/// 3.  **Use**: Clone the client wherever requests are made.
///
/// ## Operations
///
/// * **List**: loads the collection and hands it to [`ActorEntity::query`].
/// * **Create**: generates an ID with `next_id_fn`, calls
///   [`ActorEntity::from_create_params`], appends the record and saves.
/// * **Get**: loads the collection and clones the matching record.
/// * **Update**: applies [`ActorEntity::on_update`] to a copy of the record, swaps it
///   in and saves.
/// * **Delete**: calls [`ActorEntity::on_delete`], removes the record and saves.
/// * **Action**: applies [`ActorEntity::handle_action`] to a copy of the record, swaps
///   it in and saves.
///
/// Nothing is written when a hook fails or the record is missing.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    collection: JsonCollection<T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    /// * `collection` - The file this actor exclusively owns.
    /// * `next_id_fn` - Generates the ID of each created record.
    pub fn new(
        buffer_size: usize,
        collection: JsonCollection<T>,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            collection,
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Cart" instead of "shop_store::model::cart::Cart")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        let path = self.collection.path().display().to_string();
        info!(entity_type, path = %path, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { query, respond_to } => {
                    debug!(entity_type, ?query, "List");
                    let _ = respond_to.send(self.list(query).await);
                }
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params).await;
                    match &result {
                        Ok(item) => info!(entity_type, id = %item.id(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let result = self.get(&id).await;
                    if let Ok(item) = &result {
                        debug!(entity_type, %id, found = item.is_some(), "Get");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(&id).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = self.action(&id, action).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, "Shutdown");
    }

    async fn list(&self, query: T::Query) -> Result<T::Page, FrameworkError> {
        let items = self.collection.load().await?;
        T::query(items, query).map_err(entity_error)
    }

    async fn create(&self, params: T::Create) -> Result<T, FrameworkError> {
        let mut items = self.collection.load().await?;
        let id = (self.next_id_fn)();
        let item = T::from_create_params(id, params, &items).map_err(entity_error)?;

        items.push(item.clone());
        let size = items.len();
        self.collection.save(items).await?;
        debug!(size, "Collection saved");
        Ok(item)
    }

    async fn get(&self, id: &T::Id) -> Result<Option<T>, FrameworkError> {
        let items = self.collection.load().await?;
        Ok(items.into_iter().find(|item| item.id() == id))
    }

    async fn update(&self, id: &T::Id, update: T::Update) -> Result<T, FrameworkError> {
        let mut items = self.collection.load().await?;
        let index = position(&items, id)?;

        let mut item = items[index].clone();
        item.on_update(update, &items).map_err(entity_error)?;

        items[index] = item.clone();
        self.collection.save(items).await?;
        Ok(item)
    }

    async fn delete(&self, id: &T::Id) -> Result<T, FrameworkError> {
        let mut items = self.collection.load().await?;
        let index = position(&items, id)?;

        items[index].on_delete(&items).map_err(entity_error)?;

        let removed = items.remove(index);
        let size = items.len();
        self.collection.save(items).await?;
        debug!(size, "Collection saved");
        Ok(removed)
    }

    async fn action(&self, id: &T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        let mut items = self.collection.load().await?;
        let index = position(&items, id)?;

        let mut item = items[index].clone();
        let result = item.handle_action(action).map_err(entity_error)?;

        items[index] = item;
        self.collection.save(items).await?;
        Ok(result)
    }
}

fn position<T: ActorEntity>(items: &[T], id: &T::Id) -> Result<usize, FrameworkError> {
    items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| FrameworkError::NotFound(id.to_string()))
}

fn entity_error<E>(e: E) -> FrameworkError
where
    E: std::error::Error + Send + Sync + 'static,
{
    FrameworkError::EntityError(Box::new(e))
}
