//! Optimistic mutation coordination for the cached todo collection.
//!
//! The coordinator owns a single cached snapshot of the collection and is its
//! sole writer. Mutations are applied to the cache immediately, before the
//! backing-store call resolves:
//!
//! - Create inserts a todo with a temporary client-generated id at the front.
//! - Update and delete may receive a temporary id (from an optimistic create)
//!   or a confirmed store id; a small mapping table populated on create
//!   success resolves one to the other before dispatch.
//! - Every optimistic apply bumps an epoch so that an in-flight refetch of
//!   the collection cannot overwrite the edit with stale data.
//! - Mutations are serialized through one FIFO scope; when the last issued
//!   mutation settles, one reconciling `list()` refetch replaces the cache
//!   with store truth. A failed mutation is not rolled back field by field;
//!   the settle refetch is the sole reconciliation mechanism.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use tokio::sync::watch;
use uuid::Uuid;

use crate::dtos::{NewTodoDto, TodoDto, UpdateTodoDto};
use crate::validation;

use super::error::ClientError;
use super::store::TodoStore;

/// Coordinates optimistic mutations against one cached todo collection.
///
/// Create one instance per session and pass it around explicitly. Readers
/// observe whole-snapshot replacements through [`subscribe`](Self::subscribe),
/// never a partially applied edit.
///
/// Mutation futures must be driven to completion: the settle bookkeeping that
/// triggers the reconciling refetch runs in the same future as the store call.
pub struct TodoCoordinator<S> {
    store: S,
    /// FIFO mutation scope: one mutation applies its optimistic edit and runs
    /// its store call at a time, in issue order.
    scope: tokio::sync::Mutex<()>,
    state: Mutex<CacheState>,
    /// Mutations issued but not yet settled.
    pending: AtomicUsize,
    snapshot_tx: watch::Sender<Vec<TodoDto>>,
}

struct CacheState {
    cache: Vec<TodoDto>,
    /// Bumped by every optimistic apply. A refetch commits its result only if
    /// the epoch is unchanged since it started, which cancels stale reads.
    epoch: u64,
    /// Temporary client id -> store-assigned id, recorded on create success.
    id_map: HashMap<Uuid, Uuid>,
}

impl<S: TodoStore> TodoCoordinator<S> {
    pub fn new(store: S) -> Self {
        let (snapshot_tx, _) = watch::channel(Vec::new());
        Self {
            store,
            scope: tokio::sync::Mutex::new(()),
            state: Mutex::new(CacheState {
                cache: Vec::new(),
                epoch: 0,
                id_map: HashMap::new(),
            }),
            pending: AtomicUsize::new(0),
            snapshot_tx,
        }
    }

    /// Current committed snapshot of the collection.
    pub fn snapshot(&self) -> Vec<TodoDto> {
        self.state.lock().unwrap().cache.clone()
    }

    /// Subscribe to snapshot replacements. Each received value is a complete,
    /// consistent view of the collection.
    pub fn subscribe(&self) -> watch::Receiver<Vec<TodoDto>> {
        self.snapshot_tx.subscribe()
    }

    /// Fetch the collection and replace the cache with the authoritative
    /// result, unless a mutation started an optimistic apply in the meantime
    /// (then the fetched data is stale and discarded).
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let started_epoch = self.state.lock().unwrap().epoch;
        let todos = self.store.list().await?;

        let mut st = self.state.lock().unwrap();
        if st.epoch == started_epoch {
            st.cache = todos;
            self.snapshot_tx.send_replace(st.cache.clone());
        } else {
            log::debug!("Discarding stale collection refetch");
        }
        Ok(())
    }

    /// Create a todo. The draft appears in the cache under a temporary id
    /// before the store confirms; the store's id is recorded against it so
    /// later mutations issued with the temporary id still reach the right row.
    pub async fn create(&self, draft: NewTodoDto) -> Result<TodoDto, ClientError> {
        validation::validate_new_todo(&draft)
            .map_err(|e| ClientError::Validation(validation::join_errors(&e)))?;

        self.pending.fetch_add(1, Ordering::SeqCst);
        let result = self.run_create(draft).await;
        self.settle().await;
        result
    }

    /// Apply a partial patch. `id` may be a temporary id from an optimistic
    /// create; it is resolved to the confirmed id before dispatch.
    pub async fn update(&self, id: Uuid, patch: UpdateTodoDto) -> Result<TodoDto, ClientError> {
        validation::validate_update_todo(&patch)
            .map_err(|e| ClientError::Validation(validation::join_errors(&e)))?;

        self.pending.fetch_add(1, Ordering::SeqCst);
        let result = self.run_update(id, patch).await;
        self.settle().await;
        result
    }

    /// Delete a todo. `id` may be a temporary id, resolved like in `update`.
    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        self.pending.fetch_add(1, Ordering::SeqCst);
        let result = self.run_delete(id).await;
        self.settle().await;
        result
    }

    async fn run_create(&self, draft: NewTodoDto) -> Result<TodoDto, ClientError> {
        let _scope = self.scope.lock().await;

        let temp_id = Uuid::new_v4();
        {
            let mut st = self.state.lock().unwrap();
            st.epoch += 1;
            let now = Utc::now();
            st.cache.insert(
                0,
                TodoDto {
                    id: temp_id,
                    title: draft.title.clone(),
                    description: draft.description.clone(),
                    status: draft.status,
                    due_date: draft.due_date,
                    created_at: now,
                    updated_at: now,
                },
            );
            self.snapshot_tx.send_replace(st.cache.clone());
        }

        let created = self.store.create(draft).await?;
        self.state.lock().unwrap().id_map.insert(temp_id, created.id);
        Ok(created)
    }

    async fn run_update(&self, id: Uuid, patch: UpdateTodoDto) -> Result<TodoDto, ClientError> {
        let _scope = self.scope.lock().await;

        let target = {
            let mut st = self.state.lock().unwrap();
            st.epoch += 1;
            let target = st.id_map.get(&id).copied().unwrap_or(id);
            // The cache may still hold the temporary id while the store
            // already knows the confirmed one (or vice versa after a
            // refetch), so match both.
            for t in st.cache.iter_mut() {
                if t.id == id || t.id == target {
                    apply_patch(t, &patch);
                }
            }
            self.snapshot_tx.send_replace(st.cache.clone());
            target
        };

        self.store.update(target, patch).await
    }

    async fn run_delete(&self, id: Uuid) -> Result<(), ClientError> {
        let _scope = self.scope.lock().await;

        let target = {
            let mut st = self.state.lock().unwrap();
            st.epoch += 1;
            let target = st.id_map.get(&id).copied().unwrap_or(id);
            st.cache.retain(|t| t.id != id && t.id != target);
            self.snapshot_tx.send_replace(st.cache.clone());
            target
        };

        self.store.delete(target).await
    }

    /// Settle bookkeeping: when the last issued mutation settles, refetch the
    /// collection once to reconcile the cache with store truth. Bursts of
    /// mutations trigger exactly one refetch, after the final settle.
    async fn settle(&self) {
        if self.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            if let Err(e) = self.refresh().await {
                log::warn!("Reconciling refetch failed: {}", e);
            }
        }
    }
}

fn apply_patch(t: &mut TodoDto, patch: &UpdateTodoDto) {
    if let Some(ref title) = patch.title {
        t.title = title.clone();
    }
    if let Some(ref description) = patch.description {
        t.description = description.clone();
    }
    if let Some(status) = patch.status {
        t.status = status;
    }
    if let Some(due_date) = patch.due_date {
        t.due_date = due_date;
    }
    t.updated_at = Utc::now();
}
