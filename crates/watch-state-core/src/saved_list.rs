use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use watch_state_models::{CatalogEntry, MediaKind, SavedItem, UserSession};
use watch_state_remote::RemoteListApi;

use crate::error::StoreError;

/// Lifecycle of the store across one logical account session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Loading,
    Ready,
}

struct Inner {
    state: SessionState,
    user: Option<UserSession>,
    items: Vec<SavedItem>,
}

/// Reconciled cache of the user's saved titles, backed by the authoritative
/// remote table.
///
/// The split surface is the point of this type: membership checks
/// (`contains`) are synchronous reads of the in-memory cache because they run
/// on every rendered card, while mutations are async remote writes that only
/// touch the cache after the backend confirms them. A failed save therefore
/// never renders as saved.
///
/// Mutations on the same `media_id` are serialized through a per-key guard so
/// a slow `add` resolving after a fast subsequent `remove` cannot resurrect a
/// deleted entry.
pub struct SavedListStore {
    remote: Arc<dyn RemoteListApi>,
    inner: RwLock<Inner>,
    guards: Mutex<HashMap<u64, Arc<Mutex<()>>>>,
}

impl SavedListStore {
    pub fn new(remote: Arc<dyn RemoteListApi>) -> Self {
        Self {
            remote,
            inner: RwLock::new(Inner {
                state: SessionState::Unauthenticated,
                user: None,
                items: Vec::new(),
            }),
            guards: Mutex::new(HashMap::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn state(&self) -> SessionState {
        self.read().state
    }

    /// Synchronous membership check against the cache. Never touches the
    /// network; always `false` while unauthenticated.
    pub fn contains(&self, media_id: u64) -> bool {
        self.read().items.iter().any(|i| i.media_id == media_id)
    }

    /// Snapshot of the cached list, newest first.
    pub fn items(&self) -> Vec<SavedItem> {
        self.read().items.clone()
    }

    /// Drive the session state machine. Sign-in triggers a full reload keyed
    /// by the user id; sign-out discards the cache without any remote call.
    pub async fn handle_auth_change(&self, session: Option<UserSession>) {
        let Some(session) = session else {
            let mut inner = self.write();
            if inner.user.is_some() {
                info!("signed out, discarding saved-list cache");
            }
            inner.state = SessionState::Unauthenticated;
            inner.user = None;
            inner.items.clear();
            return;
        };

        {
            let mut inner = self.write();
            inner.state = SessionState::Loading;
            inner.user = Some(session.clone());
            inner.items.clear();
        }

        let items = match self.remote.query(&session.user_id).await {
            Ok(items) => items,
            Err(e) => {
                warn!("saved-list reload failed, starting empty: {}", e);
                Vec::new()
            }
        };

        let mut inner = self.write();
        // The session may have changed while the reload was in flight; a
        // stale response must not overwrite the newer state.
        if inner.user.as_ref().map(|u| u.user_id.as_str()) != Some(session.user_id.as_str()) {
            debug!("discarding stale saved-list reload for {}", session.user_id);
            return;
        }
        inner.items = dedup_by_media_id(items);
        inner.state = SessionState::Ready;
        info!(
            "saved list ready: {} items for {}",
            inner.items.len(),
            session.user_id
        );
    }

    /// Save a title. Upsert on (user_id, media_id), so re-adding an
    /// already-saved title is idempotent.
    pub async fn add(&self, title: &CatalogEntry, kind: MediaKind) -> Result<(), StoreError> {
        let user = self.read().user.clone().ok_or(StoreError::Unauthenticated)?;
        let item = SavedItem::from_catalog(&user.user_id, title, kind);

        let guard = self.mutation_guard(item.media_id).await;
        let _held = guard.lock().await;

        self.remote
            .upsert(&item)
            .await
            .map_err(StoreError::RemoteWrite)?;

        let mut inner = self.write();
        if inner.user.as_ref().map(|u| u.user_id.as_str()) == Some(user.user_id.as_str()) {
            inner.items.retain(|i| i.media_id != item.media_id);
            inner.items.insert(0, item);
        }
        Ok(())
    }

    /// Unsave a title. The cache is only filtered after the remote delete
    /// confirms.
    pub async fn remove(&self, media_id: u64) -> Result<(), StoreError> {
        let user = self.read().user.clone().ok_or(StoreError::Unauthenticated)?;

        let guard = self.mutation_guard(media_id).await;
        let _held = guard.lock().await;

        self.remote
            .delete(&user.user_id, media_id)
            .await
            .map_err(StoreError::RemoteWrite)?;

        let mut inner = self.write();
        if inner.user.as_ref().map(|u| u.user_id.as_str()) == Some(user.user_id.as_str()) {
            inner.items.retain(|i| i.media_id != media_id);
        }
        Ok(())
    }

    /// Forward auth-change notifications into the store until the channel
    /// closes.
    pub fn spawn_auth_listener(
        self: &Arc<Self>,
        mut rx: watch::Receiver<Option<UserSession>>,
    ) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                let current = rx.borrow_and_update().clone();
                store.handle_auth_change(current).await;
                if rx.changed().await.is_err() {
                    break;
                }
            }
        })
    }

    async fn mutation_guard(&self, media_id: u64) -> Arc<Mutex<()>> {
        let mut guards = self.guards.lock().await;
        guards
            .entry(media_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

fn dedup_by_media_id(items: Vec<SavedItem>) -> Vec<SavedItem> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|i| seen.insert(i.media_id))
        .collect()
}
