use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Params, and Actions)
// =============================================================================

/// Errors raised by the generic actor layer itself, independent of any domain.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Debug;
    type Patch: Send + Debug;

    // --- Custom Actions ---
    type Action: Send + Debug;
    type ActionResult: Send + Debug;

    /// Domain error. Framework failures must convert into it so clients only
    /// ever see one error type per entity.
    type Error: std::error::Error + From<FrameworkError> + Send + 'static;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and creation parameters
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    /// Secondary key that no two stored items may share, checked by the actor
    /// on every insert and update.
    fn unique_key(&self) -> Option<String> {
        None
    }

    // --- Lifecycle Hooks ---

    /// Runs before an entity enters the store, both for created and seeded items.
    fn on_create(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;

    // --- Action Handler ---

    /// Handle a custom domain-specific action. On error the entity must be left untouched.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, E>>;

/// Read-only predicate evaluated inside the actor against every stored item.
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send>;

pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id, T::Error>,
    },
    /// Insert a fully formed entity that already carries its ID (fixture data).
    Seed {
        item: T,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        respond_to: Response<Vec<T>, T::Error>,
    },
    Query {
        predicate: Predicate<T>,
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
}

impl<T: Entity> Debug for ResourceRequest<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceRequest::Create { params, .. } => f.debug_struct("Create").field("params", params).finish(),
            ResourceRequest::Seed { item, .. } => f.debug_struct("Seed").field("id", item.id()).finish(),
            ResourceRequest::Get { id, .. } => f.debug_struct("Get").field("id", id).finish(),
            ResourceRequest::List { .. } => f.write_str("List"),
            ResourceRequest::Query { .. } => f.write_str("Query"),
            ResourceRequest::Update { id, patch, .. } => {
                f.debug_struct("Update").field("id", id).field("patch", patch).finish()
            }
            ResourceRequest::Action { id, action, .. } => {
                f.debug_struct("Action").field("id", id).field("action", action).finish()
            }
        }
    }
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns one collection. Items keep their insertion order; `index` maps an ID
/// to its slot in `items`. Every mutation republishes a snapshot on `snapshots`.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    items: Vec<T>,
    index: HashMap<T::Id, usize>,
    next_id_fn: Box<dyn FnMut() -> T::Id + Send>,
    snapshots: watch::Sender<Vec<T>>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl FnMut() -> T::Id + Send + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (snapshots, watcher) = watch::channel(Vec::new());
        let actor = Self {
            receiver,
            items: Vec::new(),
            index: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
            snapshots,
        };
        let client = ResourceClient::with_watcher(sender, watcher);
        (actor, client)
    }

    /// Runs until every client has been dropped.
    pub async fn run(mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let id = (self.next_id_fn)();
                    let result = T::from_create_params(id, params).and_then(|item| self.insert(item));
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Seed { item, respond_to } => {
                    let _ = respond_to.send(self.insert(item));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.index.get(&id).map(|&slot| self.items[slot].clone());
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.items.clone()));
                }
                ResourceRequest::Query { predicate, respond_to } => {
                    let matches = self.items.iter().filter(|item| predicate(*item)).cloned().collect();
                    let _ = respond_to.send(Ok(matches));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let result = match self.index.get(&id) {
                        Some(&slot) => {
                            // Patch a copy so a rejected patch leaves the stored item intact.
                            let mut updated = self.items[slot].clone();
                            updated
                                .on_update(patch)
                                .and_then(|()| self.check_unique(&updated, Some(slot)))
                                .map(|()| {
                                    self.items[slot] = updated.clone();
                                    updated
                                })
                        }
                        None => Err(FrameworkError::NotFound(id.to_string()).into()),
                    };
                    if result.is_ok() {
                        self.publish();
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let result = match self.index.get(&id) {
                        Some(&slot) => self.items[slot].handle_action(action),
                        None => Err(FrameworkError::NotFound(id.to_string()).into()),
                    };
                    if result.is_ok() {
                        self.publish();
                    }
                    let _ = respond_to.send(result);
                }
            }
        }
        debug!("Resource actor stopped: all clients dropped");
    }

    fn insert(&mut self, mut item: T) -> Result<T::Id, T::Error> {
        let id = item.id().clone();
        if self.index.contains_key(&id) {
            warn!(id = %id, "Refusing duplicate id");
            return Err(FrameworkError::AlreadyExists(id.to_string()).into());
        }
        item.on_create()?;
        self.check_unique(&item, None)?;
        self.index.insert(id.clone(), self.items.len());
        self.items.push(item);
        self.publish();
        Ok(id)
    }

    /// Fails when another item (not the one at `skip`) holds the same unique key.
    fn check_unique(&self, item: &T, skip: Option<usize>) -> Result<(), T::Error> {
        let Some(key) = item.unique_key() else {
            return Ok(());
        };
        let taken = self
            .items
            .iter()
            .enumerate()
            .any(|(slot, other)| Some(slot) != skip && other.unique_key().as_deref() == Some(key.as_str()));
        if taken {
            warn!(key = %key, "Refusing duplicate key");
            return Err(FrameworkError::AlreadyExists(key).into());
        }
        Ok(())
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.items.clone());
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    watcher: watch::Receiver<Vec<T>>,
}

impl<T: Entity> ResourceClient<T> {
    /// Client without a live actor behind its snapshot channel; used by mocks.
    #[cfg(test)]
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        let (_, watcher) = watch::channel(Vec::new());
        Self { sender, watcher }
    }

    fn with_watcher(sender: mpsc::Sender<ResourceRequest<T>>, watcher: watch::Receiver<Vec<T>>) -> Self {
        Self { sender, watcher }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R, T::Error>) -> ResourceRequest<T>,
    ) -> Result<R, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| T::Error::from(FrameworkError::ActorClosed))?;
        response.await.map_err(|_| T::Error::from(FrameworkError::ActorDropped))?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, T::Error> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn seed(&self, item: T) -> Result<T::Id, T::Error> {
        self.request(|respond_to| ResourceRequest::Seed { item, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, T::Error> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, T::Error> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn query(&self, predicate: impl Fn(&T) -> bool + Send + 'static) -> Result<Vec<T>, T::Error> {
        let predicate: Predicate<T> = Box::new(predicate);
        self.request(|respond_to| ResourceRequest::Query { predicate, respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, T::Error> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, T::Error> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }

    /// Snapshot feed for read-only views. The current value is the collection
    /// as of the last mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<T>> {
        self.watcher.clone()
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
