use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Params, and Actions)
// =============================================================================

/// Trait that any domain entity must implement to be managed by [`ResourceActor`].
///
/// Hooks run against a scratch copy of the entity. The stored value is only
/// replaced when the hook succeeds, so a failed update or action never leaves a
/// half-applied change behind.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    type Error: std::error::Error + Clone + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;

    /// Construct the full entity from the generated ID and creation params.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;
    fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler ---

    /// Handle a custom domain-specific action.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Errors surfaced by the generic actor machinery.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError<E> {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Entity(E),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
    /// Stops the actor even while other client handles are still alive.
    Shutdown,
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    /// Insertion order, so listings are stable across calls.
    order: Vec<T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
    latency: Duration,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            order: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
            latency: Duration::ZERO,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Delay applied before every request is answered.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Pre-populate the store. Items whose ID is already present replace the old value.
    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = T>) -> Self {
        for item in items {
            self.insert(item);
        }
        self
    }

    fn insert(&mut self, item: T) {
        let id = item.id().clone();
        if self.store.insert(id.clone(), item).is_none() {
            self.order.push(id);
        }
    }

    #[instrument(name = "resource_actor", skip(self), fields(entity = std::any::type_name::<T>()))]
    pub async fn run(mut self) {
        info!(items = self.store.len(), "ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::List { respond_to } => {
                    let items = self
                        .order
                        .iter()
                        .filter_map(|id| self.store.get(id).cloned())
                        .collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(&id, patch));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(&id));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let _ = respond_to.send(self.handle_action(&id, action));
                }
                ResourceRequest::Shutdown => {
                    info!("ResourceActor shutting down");
                    break;
                }
            }
        }
        info!("ResourceActor stopped");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T::Id, FrameworkError<T::Error>> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create_params(id.clone(), params).map_err(FrameworkError::Entity)?;
        item.on_create().map_err(FrameworkError::Entity)?;
        self.insert(item);
        debug!(id = %id, "Created item");
        Ok(id)
    }

    fn handle_update(&mut self, id: &T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        let item = self
            .store
            .get_mut(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        let mut next = item.clone();
        next.on_update(patch).map_err(FrameworkError::Entity)?;
        *item = next.clone();
        debug!(id = %id, "Updated item");
        Ok(next)
    }

    fn handle_delete(&mut self, id: &T::Id) -> Result<(), FrameworkError<T::Error>> {
        let item = self
            .store
            .get(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete().map_err(FrameworkError::Entity)?;
        self.store.remove(id);
        self.order.retain(|existing| existing != id);
        debug!(id = %id, "Deleted item");
        Ok(())
    }

    fn handle_action(
        &mut self,
        id: &T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        let item = self
            .store
            .get_mut(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        let mut next = item.clone();
        match next.handle_action(action) {
            Ok(result) => {
                *item = next;
                Ok(result)
            }
            Err(e) => {
                warn!(id = %id, error = %e, "Action rejected");
                Err(FrameworkError::Entity(e))
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Manual impl: deriving would require `T: Clone` on the handle, not just the entity.
impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn call<R>(
        &self,
        build: impl FnOnce(Response<R, T::Error>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, FrameworkError<T::Error>> {
        self.call(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError<T::Error>> {
        self.call(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError<T::Error>> {
        self.call(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        self.call(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        self.call(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        self.call(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }

    /// No response: the actor stops after the requests already queued ahead of this one.
    pub async fn shutdown(&self) -> Result<(), FrameworkError<T::Error>> {
        self.sender
            .send(ResourceRequest::Shutdown)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Jar {
        id: String,
        label: String,
        pieces: u32,
    }

    #[derive(Debug)]
    struct JarCreate {
        label: String,
        pieces: u32,
    }

    #[derive(Debug)]
    struct JarPatch {
        label: Option<String>,
        pieces: Option<u32>,
    }

    #[derive(Debug)]
    enum JarAction {
        Take(u32),
    }

    #[derive(Debug, Clone, PartialEq, Error)]
    enum JarError {
        #[error("only {0} pieces left")]
        TooFew(u32),
        #[error("label must not be empty")]
        EmptyLabel,
    }

    impl Entity for Jar {
        type Id = String;
        type CreateParams = JarCreate;
        type Patch = JarPatch;
        type Action = JarAction;
        type ActionResult = u32;
        type Error = JarError;

        fn id(&self) -> &String {
            &self.id
        }

        fn from_create_params(id: String, params: JarCreate) -> Result<Self, JarError> {
            if params.label.is_empty() {
                return Err(JarError::EmptyLabel);
            }
            Ok(Self {
                id,
                label: params.label,
                pieces: params.pieces,
            })
        }

        fn on_update(&mut self, patch: JarPatch) -> Result<(), JarError> {
            if let Some(pieces) = patch.pieces {
                self.pieces = pieces;
            }
            if let Some(label) = patch.label {
                if label.is_empty() {
                    return Err(JarError::EmptyLabel);
                }
                self.label = label;
            }
            Ok(())
        }

        fn handle_action(&mut self, action: JarAction) -> Result<u32, JarError> {
            match action {
                JarAction::Take(n) if n <= self.pieces => {
                    self.pieces -= n;
                    Ok(self.pieces)
                }
                JarAction::Take(_) => Err(JarError::TooFew(self.pieces)),
            }
        }
    }

    fn start() -> ResourceClient<Jar> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("jar_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let client = start();

        let id = client
            .create(JarCreate { label: "Mints".into(), pieces: 5 })
            .await
            .unwrap();
        assert_eq!(id, "jar_1");

        let left = client.perform_action(id.clone(), JarAction::Take(3)).await.unwrap();
        assert_eq!(left, 2);

        let err = client.perform_action(id.clone(), JarAction::Take(3)).await.unwrap_err();
        assert_eq!(err, FrameworkError::Entity(JarError::TooFew(2)));

        let jar = client.get(id).await.unwrap().unwrap();
        assert_eq!(jar.pieces, 2);
    }

    #[tokio::test]
    async fn test_failed_update_leaves_item_untouched() {
        let client = start();
        let id = client
            .create(JarCreate { label: "Mints".into(), pieces: 5 })
            .await
            .unwrap();

        let patch = JarPatch { label: Some(String::new()), pieces: Some(99) };
        let err = client.update(id.clone(), patch).await.unwrap_err();
        assert_eq!(err, FrameworkError::Entity(JarError::EmptyLabel));

        let jar = client.get(id).await.unwrap().unwrap();
        assert_eq!(jar.pieces, 5);
        assert_eq!(jar.label, "Mints");
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order_and_delete() {
        let client = start();
        for label in ["a", "b", "c"] {
            client.create(JarCreate { label: label.into(), pieces: 1 }).await.unwrap();
        }
        client.delete("jar_2".to_string()).await.unwrap();

        let labels: Vec<String> = client.list().await.unwrap().into_iter().map(|j| j.label).collect();
        assert_eq!(labels, vec!["a", "c"]);

        let err = client.delete("jar_2".to_string()).await.unwrap_err();
        assert_eq!(err, FrameworkError::NotFound("jar_2".to_string()));
    }

    #[tokio::test]
    async fn test_seeded_items_are_listed() {
        let seeded = vec![Jar { id: "x".into(), label: "Seed".into(), pieces: 7 }];
        let (actor, client) = ResourceActor::new(4, || "unused".to_string());
        tokio::spawn(actor.with_items(seeded.clone()).run());

        assert_eq!(client.list().await.unwrap(), seeded);
    }

    #[tokio::test]
    async fn test_shutdown_stops_actor_with_live_clones() {
        let (actor, client) = ResourceActor::<Jar>::new(4, || "unused".to_string());
        let handle = tokio::spawn(actor.run());
        let other = client.clone();

        client.shutdown().await.unwrap();
        handle.await.unwrap();

        assert_eq!(other.list().await.unwrap_err(), FrameworkError::ActorClosed);
    }
}
