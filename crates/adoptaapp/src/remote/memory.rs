//! In-memory favorites remote for testing.
//!
//! Besides storing IDs, [`InMemoryRemote`] can simulate the two things that make
//! optimistic updates interesting: calls that fail, and calls that have not
//! answered yet.
//!
//! ```rust
//! use adoptaapp::remote::{FavoritesRemote, InMemoryRemote};
//!
//! let remote = InMemoryRemote::with_ids([1, 2]);
//! remote.set_fail_adds(true);
//! // every add_favorite now returns Err until switched back
//! ```

use super::FavoritesRemote;
use crate::error::{AdoptaError, Result};
use crate::model::EntityId;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::watch;

pub struct InMemoryRemote {
    ids: Mutex<BTreeSet<EntityId>>,
    fail_list: AtomicBool,
    fail_adds: AtomicBool,
    fail_removes: AtomicBool,
    /// Apply add/remove before waiting, like a server whose reply is slow.
    commit_before_ack: AtomicBool,
    /// While `true`, every call waits before answering.
    held: watch::Sender<bool>,
    list_calls: AtomicUsize,
    add_calls: AtomicUsize,
    remove_calls: AtomicUsize,
}

impl Default for InMemoryRemote {
    fn default() -> Self {
        Self {
            ids: Mutex::new(BTreeSet::new()),
            fail_list: AtomicBool::new(false),
            fail_adds: AtomicBool::new(false),
            fail_removes: AtomicBool::new(false),
            commit_before_ack: AtomicBool::new(false),
            held: watch::Sender::new(false),
            list_calls: AtomicUsize::new(0),
            add_calls: AtomicUsize::new(0),
            remove_calls: AtomicUsize::new(0),
        }
    }
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(ids: impl IntoIterator<Item = EntityId>) -> Self {
        let remote = Self::default();
        remote.ids.lock().extend(ids);
        remote
    }

    /// IDs the remote currently considers favorited, sorted.
    pub fn ids(&self) -> Vec<EntityId> {
        self.ids.lock().iter().copied().collect()
    }

    pub fn set_fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_adds(&self, fail: bool) {
        self.fail_adds.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_removes(&self, fail: bool) {
        self.fail_removes.store(fail, Ordering::SeqCst);
    }

    /// Apply add/remove as soon as they arrive, then wait while held. The change
    /// lands even when the call later reports a simulated failure.
    pub fn set_commit_before_ack(&self, early: bool) {
        self.commit_before_ack.store(early, Ordering::SeqCst);
    }

    /// Make every call wait until [`release`](Self::release). Held list calls
    /// answer with the IDs as they were when the call arrived.
    pub fn hold(&self) {
        self.held.send_replace(true);
    }

    /// Let every waiting (and future) call proceed.
    pub fn release(&self) {
        self.held.send_replace(false);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn add_calls(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }

    pub fn remove_calls(&self) -> usize {
        self.remove_calls.load(Ordering::SeqCst)
    }

    async fn wait_while_held(&self) {
        let mut rx = self.held.subscribe();
        // Err only when the sender is gone, which cannot happen while &self lives
        let _ = rx.wait_for(|held| !*held).await;
    }
}

#[async_trait]
impl FavoritesRemote for InMemoryRemote {
    async fn list_favorite_ids(&self) -> Result<Vec<EntityId>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let ids = self.ids();
        // Yield once so concurrent initializers actually overlap
        tokio::task::yield_now().await;
        self.wait_while_held().await;
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(AdoptaError::Remote("simulated list failure".to_string()));
        }
        Ok(ids)
    }

    async fn add_favorite(&self, id: EntityId) -> Result<()> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        let early = self.commit_before_ack.load(Ordering::SeqCst);
        if early {
            self.ids.lock().insert(id);
        }
        self.wait_while_held().await;
        if self.fail_adds.load(Ordering::SeqCst) {
            return Err(AdoptaError::Remote(format!("simulated add failure for {}", id)));
        }
        if !early {
            self.ids.lock().insert(id);
        }
        Ok(())
    }

    async fn remove_favorite(&self, id: EntityId) -> Result<()> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        let early = self.commit_before_ack.load(Ordering::SeqCst);
        if early {
            self.ids.lock().remove(&id);
        }
        self.wait_while_held().await;
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(AdoptaError::Remote(format!(
                "simulated remove failure for {}",
                id
            )));
        }
        if !early {
            self.ids.lock().remove(&id);
        }
        Ok(())
    }
}
