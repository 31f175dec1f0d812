//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from
//! a queue of expectations instead of by an actor. It lets you unit-test the logic that
//! wraps a client (input parsing, error mapping) without touching the filesystem.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but reads/writes a temp file) |
//! | **State** | No real state (expectations) | Real collection file |
//! | **Use Case** | Logic *around* the client | The entity hooks, persistence, full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires corrupting files) |
//!
//! ## Testing Failure Scenarios
//!
//! Storage failures are awkward to provoke with a real actor. With a mock they are one line:
//!
//! ```rust,ignore
//! let mut mock = MockClient::<Product>::new();
//! mock.expect_get(id).return_err(FrameworkError::ActorClosed);
//! let result = ProductClient::new(mock.client()).get_product(&id.to_string()).await;
//! assert!(matches!(result, Err(StoreError::Internal(_))));
//! mock.verify();
//! ```
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_client`] to get a client and a receiver and answer requests by hand,
//! or use the fluent [`MockClient`] API.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response to send back.
enum Expectation<T: ActorEntity> {
    List {
        response: Result<T::Page, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in the order they were registered. A request that does
/// not match the next expectation (wrong operation or wrong ID) is recorded as a
/// failure, its response channel is dropped (the caller sees
/// [`FrameworkError::ActorDropped`]) and [`verify`](Self::verify) panics later.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    failures: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let failures = Arc::new(Mutex::new(Vec::new()));

        let queue = expectations.clone();
        let failed = failures.clone();
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();
                if let Err(msg) = answer(request, expectation) {
                    lock(&failed).push(msg);
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            failures,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, T::Page> {
        self.builder(|response| Expectation::List { response })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Create { response })
    }

    /// Expects a `get` operation for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    /// Expects an `update` operation for `id`.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    /// Expects a `delete` operation for `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    /// Expects an `action` operation for `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Verifies that every expectation was met and no unexpected request arrived.
    pub fn verify(&self) {
        let failures = lock(&self.failures);
        if !failures.is_empty() {
            panic!("Unexpected requests: {}", failures.join("; "));
        }
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn builder<R>(
        &mut self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }
}

/// Registers the response for one expected request.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        lock(&self.expectations).push_back((self.make)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back((self.make)(Err(error)));
    }
}

fn answer<T: ActorEntity>(
    request: ResourceRequest<T>,
    expectation: Option<Expectation<T>>,
) -> Result<(), String> {
    fn reply<V>(respond_to: oneshot::Sender<Result<V, FrameworkError>>, response: Result<V, FrameworkError>) {
        let _ = respond_to.send(response);
    }

    fn check_id<I: PartialEq + std::fmt::Display>(op: &str, expected: &I, got: &I) -> Result<(), String> {
        if expected == got {
            Ok(())
        } else {
            Err(format!("{op}: expected id {expected}, got {got}"))
        }
    }

    match (request, expectation) {
        (ResourceRequest::List { respond_to, .. }, Some(Expectation::List { response })) => {
            reply(respond_to, response);
        }
        (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            reply(respond_to, response);
        }
        (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: expected, response })) => {
            check_id("get", &expected, &id)?;
            reply(respond_to, response);
        }
        (
            ResourceRequest::Update { id, respond_to, .. },
            Some(Expectation::Update { id: expected, response }),
        ) => {
            check_id("update", &expected, &id)?;
            reply(respond_to, response);
        }
        (
            ResourceRequest::Delete { id, respond_to },
            Some(Expectation::Delete { id: expected, response }),
        ) => {
            check_id("delete", &expected, &id)?;
            reply(respond_to, response);
        }
        (
            ResourceRequest::Action { id, respond_to, .. },
            Some(Expectation::Action { id: expected, response }),
        ) => {
            check_id("action", &expected, &id)?;
            reply(respond_to, response);
        }
        (request, None) => return Err(format!("no expectation left for {request:?}")),
        (request, Some(_)) => return Err(format!("expectation mismatch for {request:?}")),
    }
    Ok(())
}

// =============================================================================
// MANUAL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// Tests pull requests off the receiver with the `expect_*` helpers below and answer
/// them through the returned responder, which allows asserting on the payloads.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: u32,
        text: String,
    }

    #[derive(Debug)]
    struct NoteCreate {
        text: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Note error")]
    struct NoteError;

    impl ActorEntity for Note {
        type Id = u32;
        type Create = NoteCreate;
        type Update = String;
        type Action = ();
        type ActionResult = ();
        type Query = ();
        type Page = Vec<Note>;
        type Error = NoteError;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn from_create_params(id: u32, params: NoteCreate, _: &[Self]) -> Result<Self, NoteError> {
            Ok(Self {
                id,
                text: params.text,
            })
        }

        fn on_update(&mut self, text: String, _: &[Self]) -> Result<(), NoteError> {
            self.text = text;
            Ok(())
        }

        fn handle_action(&mut self, _: ()) -> Result<(), NoteError> {
            Ok(())
        }

        fn query(collection: Vec<Self>, _: ()) -> Result<Vec<Self>, NoteError> {
            Ok(collection)
        }
    }

    fn note(id: u32, text: &str) -> Note {
        Note {
            id,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_manual_create_round_trip() {
        let (client, mut receiver) = create_mock_client::<Note>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(NoteCreate {
                    text: "hello".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.text, "hello");
        responder.send(Ok(note(1, "hello"))).unwrap();

        let created = create_task.await.unwrap().unwrap();
        assert_eq!(created, note(1, "hello"));
    }

    #[tokio::test]
    async fn test_expectations_answer_in_order() {
        let mut mock = MockClient::<Note>::new();
        mock.expect_create().return_ok(note(1, "a"));
        mock.expect_get(1).return_ok(Some(note(1, "a")));
        mock.expect_delete(1).return_err(FrameworkError::NotFound("1".into()));
        let client = mock.client();

        let created = client.create(NoteCreate { text: "a".into() }).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(client.get(1).await.unwrap(), Some(note(1, "a")));
        assert!(matches!(
            client.delete(1).await,
            Err(FrameworkError::NotFound(id)) if id == "1"
        ));

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "expected id 1, got 2")]
    async fn test_wrong_id_fails_verification() {
        let mut mock = MockClient::<Note>::new();
        mock.expect_get(1).return_ok(None);
        let client = mock.client();

        let result = client.get(2).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "1 remaining")]
    async fn test_unused_expectation_fails_verification() {
        let mut mock = MockClient::<Note>::new();
        mock.expect_list().return_ok(vec![]);
        mock.verify();
    }
}
