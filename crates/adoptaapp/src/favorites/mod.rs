//! # Favorites
//!
//! [`FavoriteSet`] keeps an optimistic local copy of the user's favorite IDs
//! consistent with a [`FavoritesRemote`] while the user toggles hearts faster than
//! the remote answers.
//!
//! ## Toggle Lifecycle
//!
//! 1. Wait for this ID's turn: same-ID operations run one after another, different
//!    IDs never wait on each other
//! 2. Flip the local state immediately and mark it pending
//! 3. Call the remote
//! 4. On success keep the flip; on failure revert it, record the error and notify
//!
//! Once a toggle future resolves, its ID is never left pending. A toggle future
//! dropped before resolving reverts its flip, but the remote may already have
//! applied it: the ID keeps a [`FailureRecord`] and is marked `needs_sync` until
//! the next [`FavoriteSet::refresh`] adopts the remote's answer.
//!
//! ## Lifecycle
//!
//! The set starts uninitialized and refuses toggles until [`FavoriteSet::initialize`]
//! has hydrated it from the remote. [`FavoriteSet::dispose`] tears it down for good;
//! calls still in flight resolve without touching state.
//!
//! Share one set across views as `Arc<FavoriteSet>`.

mod notify;
mod state;

pub use notify::{NotificationKind, Notifier};
pub use state::{FailureRecord, FavoriteState, FavoriteStatus};

use crate::error::{AdoptaError, Result};
use crate::model::EntityId;
use crate::remote::FavoritesRemote;
use chrono::Utc;
use parking_lot::Mutex;
use state::FavoriteEntry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

/// How a toggle/add/remove call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// The remote accepted the flip.
    Committed { favorite: bool },
    /// The remote failed; the flip was reverted.
    RolledBack { favorite: bool, error: String },
    /// Nothing to do (add of a favorite, remove of a non-favorite).
    Unchanged { favorite: bool },
    /// Refused: the set has not been hydrated yet.
    NotInitialized,
    /// Refused, or resolved after the set was disposed.
    Disposed,
}

impl ToggleOutcome {
    /// Resulting membership, when the set was live.
    pub fn favorite(&self) -> Option<bool> {
        match self {
            ToggleOutcome::Committed { favorite }
            | ToggleOutcome::RolledBack { favorite, .. }
            | ToggleOutcome::Unchanged { favorite } => Some(*favorite),
            ToggleOutcome::NotInitialized | ToggleOutcome::Disposed => None,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, ToggleOutcome::Committed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Ready,
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Toggle,
    Add,
    Remove,
}

struct Inner {
    phase: Phase,
    entries: HashMap<EntityId, FavoriteEntry>,
    /// Bumped every time a flip settles.
    revision: u64,
    /// A refresh fetch is in flight; settled entries must keep their revision.
    refreshing: bool,
}

impl Inner {
    fn check_ready(&self) -> Result<()> {
        match self.phase {
            Phase::Ready => Ok(()),
            Phase::Uninitialized => Err(AdoptaError::NotInitialized),
            Phase::Disposed => Err(AdoptaError::Disposed),
        }
    }
}

pub struct FavoriteSet {
    remote: Arc<dyn FavoritesRemote>,
    notifier: Option<Arc<dyn Notifier>>,
    notify_success: bool,
    inner: Mutex<Inner>,
    /// Serializes remote list fetches (initialize, refresh).
    fetch_gate: AsyncMutex<()>,
    /// Per-ID gates; an entry exists only while someone holds or waits on it.
    gates: Mutex<HashMap<EntityId, Arc<AsyncMutex<()>>>>,
}

impl FavoriteSet {
    pub fn new(remote: Arc<dyn FavoritesRemote>) -> Self {
        Self {
            remote,
            notifier: None,
            notify_success: false,
            inner: Mutex::new(Inner {
                phase: Phase::Uninitialized,
                entries: HashMap::new(),
                revision: 0,
                refreshing: false,
            }),
            fetch_gate: AsyncMutex::new(()),
            gates: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Arc::new(notifier));
        self
    }

    /// Also notify when a flip is committed. Failures are always notified.
    pub fn with_success_notifications(mut self, enabled: bool) -> Self {
        self.notify_success = enabled;
        self
    }

    /// Hydrate from the remote. Idempotent; concurrent callers share one fetch.
    ///
    /// On failure the set stays uninitialized and the call may be retried.
    pub async fn initialize(&self) -> Result<()> {
        if self.already_initialized()? {
            return Ok(());
        }

        let _fetch = self.fetch_gate.lock().await;
        if self.already_initialized()? {
            return Ok(());
        }

        let ids = self.remote.list_favorite_ids().await.map_err(|e| {
            warn!(error = %e, "failed to load favorites");
            e
        })?;

        let mut inner = self.inner.lock();
        if inner.phase == Phase::Disposed {
            return Err(AdoptaError::Disposed);
        }
        inner.entries = ids
            .iter()
            .map(|id| (*id, FavoriteEntry::settled(true)))
            .collect();
        inner.phase = Phase::Ready;
        info!(count = inner.entries.len(), "favorites hydrated");
        Ok(())
    }

    /// `Ok(true)` when already initialized, `Ok(false)` when hydration is needed.
    fn already_initialized(&self) -> Result<bool> {
        match self.inner.lock().phase {
            Phase::Ready => Ok(true),
            Phase::Uninitialized => Ok(false),
            Phase::Disposed => Err(AdoptaError::Disposed),
        }
    }

    /// Re-fetch the remote list and adopt it for every settled ID.
    ///
    /// Pending IDs are left alone, as are IDs whose flip settled while the fetch
    /// was in flight. IDs whose call was cancelled always take the remote's answer.
    pub async fn refresh(&self) -> Result<()> {
        self.inner.lock().check_ready()?;

        let _fetch = self.fetch_gate.lock().await;
        let since = {
            let mut inner = self.inner.lock();
            inner.check_ready()?;
            inner.refreshing = true;
            inner.revision
        };
        let _refreshing = Refreshing(self);
        let remote_ids: HashSet<EntityId> = self
            .remote
            .list_favorite_ids()
            .await
            .map_err(|e| {
                warn!(error = %e, "failed to refresh favorites");
                e
            })?
            .into_iter()
            .collect();

        let mut guard = self.inner.lock();
        guard.check_ready()?;
        let now = Utc::now();
        for (id, entry) in guard.entries.iter_mut() {
            if entry.state.is_pending() || (entry.revision > since && !entry.needs_sync) {
                continue;
            }
            let favorite = remote_ids.contains(id);
            if entry.state.is_favorite() != favorite {
                entry.state = FavoriteState::from_membership(favorite);
                entry.committed_at = Some(now);
            }
            if entry.needs_sync {
                debug!(id, favorite, "cancelled favorite call reconciled");
                entry.needs_sync = false;
                entry.last_error = None;
            }
        }
        for id in &remote_ids {
            guard
                .entries
                .entry(*id)
                .or_insert_with(|| FavoriteEntry::settled(true));
        }
        guard.refreshing = false;
        guard.entries.retain(|_, entry| !entry.is_idle());
        debug!(count = remote_ids.len(), "favorites refreshed");
        Ok(())
    }

    /// Flip `id`: add it when not favorited, remove it when favorited.
    pub async fn toggle_favorite(&self, id: EntityId) -> ToggleOutcome {
        self.flip(id, Intent::Toggle).await
    }

    /// Add `id` unless it is already favorited.
    pub async fn add_to_favorites(&self, id: EntityId) -> ToggleOutcome {
        self.flip(id, Intent::Add).await
    }

    /// Remove `id` if it is currently favorited.
    pub async fn remove_from_favorites(&self, id: EntityId) -> ToggleOutcome {
        self.flip(id, Intent::Remove).await
    }

    async fn flip(&self, id: EntityId, intent: Intent) -> ToggleOutcome {
        if let Err(refusal) = self.inner.lock().check_ready() {
            return refused(refusal);
        }

        let gate = IdGate::acquire(self, id);
        let _turn = gate.lock.lock().await;

        let adding = {
            let mut inner = self.inner.lock();
            if let Err(refusal) = inner.check_ready() {
                return refused(refusal);
            }
            let current = inner
                .entries
                .get(&id)
                .is_some_and(|e| e.state.is_favorite());
            let adding = match intent {
                Intent::Toggle => !current,
                Intent::Add if current => return ToggleOutcome::Unchanged { favorite: true },
                Intent::Add => true,
                Intent::Remove if !current => return ToggleOutcome::Unchanged { favorite: false },
                Intent::Remove => false,
            };
            let entry = inner.entries.entry(id).or_default();
            entry.state = entry.state.begin();
            adding
        };
        debug!(id, adding, "optimistic favorite flip");

        let mut in_flight = InFlight { set: self, id, armed: true };
        let result = if adding {
            self.remote.add_favorite(id).await
        } else {
            self.remote.remove_favorite(id).await
        };
        in_flight.armed = false;

        self.settle(id, adding, result)
    }

    fn settle(&self, id: EntityId, adding: bool, result: Result<()>) -> ToggleOutcome {
        let (outcome, message, kind) = {
            let mut guard = self.inner.lock();
            if guard.phase == Phase::Disposed {
                debug!(id, "favorite call resolved after dispose");
                return ToggleOutcome::Disposed;
            }
            guard.revision += 1;
            let revision = guard.revision;
            let refreshing = guard.refreshing;
            let entry = guard.entries.entry(id).or_default();
            entry.revision = revision;

            let settled = match result {
                Ok(()) => {
                    entry.state = entry.state.settle(true);
                    entry.last_error = None;
                    entry.needs_sync = false;
                    entry.committed_at = Some(Utc::now());
                    let message = if adding {
                        "Added to favorites"
                    } else {
                        "Removed from favorites"
                    };
                    (
                        ToggleOutcome::Committed {
                            favorite: entry.state.is_favorite(),
                        },
                        message.to_string(),
                        NotificationKind::Success,
                    )
                }
                Err(e) => {
                    entry.state = entry.state.settle(false);
                    let error = e.to_string();
                    entry.last_error = Some(FailureRecord::now(error.clone()));
                    warn!(id, adding, error = %error, "favorite update failed, rolled back");
                    let message = if adding {
                        format!("Could not add to favorites: {}", error)
                    } else {
                        format!("Could not remove from favorites: {}", error)
                    };
                    (
                        ToggleOutcome::RolledBack {
                            favorite: entry.state.is_favorite(),
                            error,
                        },
                        message,
                        NotificationKind::Error,
                    )
                }
            };

            // A refresh in flight still compares against this entry's revision
            let prune = !refreshing && entry.is_idle();
            if prune {
                guard.entries.remove(&id);
            }
            settled
        };

        let wanted = kind == NotificationKind::Error || self.notify_success;
        if let (true, Some(notifier)) = (wanted, &self.notifier) {
            notifier.notify(&message, kind);
        }
        outcome
    }

    /// Drop all state. Every later call is refused; calls in flight resolve
    /// without touching state.
    pub fn dispose(&self) {
        let mut inner = self.inner.lock();
        if inner.phase == Phase::Disposed {
            return;
        }
        inner.phase = Phase::Disposed;
        inner.entries.clear();
        info!("favorites disposed");
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.lock().phase == Phase::Ready
    }

    /// Current (possibly optimistic) membership. Unknown IDs are not favorites.
    pub fn is_favorite(&self, id: EntityId) -> bool {
        self.inner
            .lock()
            .entries
            .get(&id)
            .is_some_and(|e| e.state.is_favorite())
    }

    pub fn is_pending(&self, id: EntityId) -> bool {
        self.inner
            .lock()
            .entries
            .get(&id)
            .is_some_and(|e| e.state.is_pending())
    }

    pub fn has_pending(&self) -> bool {
        self.inner
            .lock()
            .entries
            .values()
            .any(|e| e.state.is_pending())
    }

    /// Currently favorited IDs, sorted.
    pub fn favorite_ids(&self) -> Vec<EntityId> {
        let inner = self.inner.lock();
        let mut ids: Vec<_> = inner
            .entries
            .iter()
            .filter(|(_, e)| e.state.is_favorite())
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn status(&self, id: EntityId) -> FavoriteStatus {
        FavoriteStatus::of(id, self.inner.lock().entries.get(&id))
    }

    pub fn last_error(&self, id: EntityId) -> Option<FailureRecord> {
        self.inner
            .lock()
            .entries
            .get(&id)
            .and_then(|e| e.last_error.clone())
    }
}

fn refused(err: AdoptaError) -> ToggleOutcome {
    match err {
        AdoptaError::Disposed => ToggleOutcome::Disposed,
        _ => ToggleOutcome::NotInitialized,
    }
}

/// A handle on one ID's gate. Removes the gate from the map once nobody else
/// holds or waits on it.
struct IdGate<'a> {
    set: &'a FavoriteSet,
    id: EntityId,
    lock: Arc<AsyncMutex<()>>,
}

impl<'a> IdGate<'a> {
    fn acquire(set: &'a FavoriteSet, id: EntityId) -> Self {
        let lock = Arc::clone(
            set.gates
                .lock()
                .entry(id)
                .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
        );
        Self { set, id, lock }
    }
}

impl Drop for IdGate<'_> {
    fn drop(&mut self) {
        let mut gates = self.set.gates.lock();
        // The map's copy plus ours: nobody else is waiting
        if Arc::strong_count(&self.lock) == 2 {
            gates.remove(&self.id);
        }
    }
}

/// Clears `Inner::refreshing` however the refresh ends.
struct Refreshing<'a>(&'a FavoriteSet);

impl Drop for Refreshing<'_> {
    fn drop(&mut self) {
        self.0.inner.lock().refreshing = false;
    }
}

/// Reverts an optimistic flip if its future is dropped before the remote answers.
///
/// The remote may have applied the call anyway, so the ID is left with an error
/// and flagged for the next refresh.
struct InFlight<'a> {
    set: &'a FavoriteSet,
    id: EntityId,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.set.inner.lock();
        if let Some(entry) = inner.entries.get_mut(&self.id) {
            entry.state = entry.state.settle(false);
            entry.needs_sync = true;
            entry.last_error = Some(FailureRecord::now(
                "cancelled before the remote answered; outcome unknown",
            ));
            warn!(id = self.id, "favorite call cancelled, flip reverted until next refresh");
        }
    }
}
