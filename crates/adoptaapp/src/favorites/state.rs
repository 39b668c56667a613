//! Per-ID favorite state machine.
//!
//! | State | `begin` | settle ok | settle failed |
//! |-------|---------|-----------|---------------|
//! | `Unfavorited` | `PendingAdd` | | |
//! | `PendingAdd` | | `Favorited` | `Unfavorited` |
//! | `Favorited` | `PendingRemove` | | |
//! | `PendingRemove` | | `Unfavorited` | `Favorited` |
//!
//! Unknown IDs are `Unfavorited`. There is no terminal state.

use crate::model::EntityId;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteState {
    #[default]
    Unfavorited,
    PendingAdd,
    Favorited,
    PendingRemove,
}

impl FavoriteState {
    pub fn from_membership(favorite: bool) -> Self {
        if favorite {
            FavoriteState::Favorited
        } else {
            FavoriteState::Unfavorited
        }
    }

    /// Current membership, including optimistic flips.
    pub fn is_favorite(self) -> bool {
        matches!(self, FavoriteState::Favorited | FavoriteState::PendingAdd)
    }

    /// Membership last confirmed by the remote.
    pub fn committed(self) -> bool {
        matches!(self, FavoriteState::Favorited | FavoriteState::PendingRemove)
    }

    pub fn is_pending(self) -> bool {
        matches!(self, FavoriteState::PendingAdd | FavoriteState::PendingRemove)
    }

    /// Flip optimistically. A pending state is returned unchanged.
    pub fn begin(self) -> Self {
        match self {
            FavoriteState::Unfavorited => FavoriteState::PendingAdd,
            FavoriteState::Favorited => FavoriteState::PendingRemove,
            pending => pending,
        }
    }

    /// Resolve a pending flip: keep it on success, revert it on failure.
    pub fn settle(self, succeeded: bool) -> Self {
        match (self, succeeded) {
            (FavoriteState::PendingAdd, true) => FavoriteState::Favorited,
            (FavoriteState::PendingAdd, false) => FavoriteState::Unfavorited,
            (FavoriteState::PendingRemove, true) => FavoriteState::Unfavorited,
            (FavoriteState::PendingRemove, false) => FavoriteState::Favorited,
            (settled, _) => settled,
        }
    }
}

/// Why the last remote call for an ID failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureRecord {
    pub message: String,
    pub at: DateTime<Utc>,
}

impl FailureRecord {
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FavoriteEntry {
    pub state: FavoriteState,
    pub last_error: Option<FailureRecord>,
    pub committed_at: Option<DateTime<Utc>>,
    /// Settle counter value when this entry last settled a flip.
    pub revision: u64,
    /// A call was cancelled mid-flight; the remote may disagree with `state`.
    pub needs_sync: bool,
}

impl FavoriteEntry {
    pub fn settled(favorite: bool) -> Self {
        Self {
            state: FavoriteState::from_membership(favorite),
            last_error: None,
            committed_at: Some(Utc::now()),
            revision: 0,
            needs_sync: false,
        }
    }

    /// Nothing worth keeping: settled unfavorited, in sync, with no error to report.
    pub fn is_idle(&self) -> bool {
        self.state == FavoriteState::Unfavorited && self.last_error.is_none() && !self.needs_sync
    }
}

/// Snapshot of one ID, for hosts rendering a favorite toggle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FavoriteStatus {
    pub id: EntityId,
    pub state: FavoriteState,
    pub favorite: bool,
    pub committed: bool,
    pub pending: bool,
    /// Membership is unconfirmed until the next refresh.
    pub needs_sync: bool,
    pub last_error: Option<FailureRecord>,
    pub committed_at: Option<DateTime<Utc>>,
}

impl FavoriteStatus {
    pub(crate) fn of(id: EntityId, entry: Option<&FavoriteEntry>) -> Self {
        let state = entry.map(|e| e.state).unwrap_or_default();
        Self {
            id,
            state,
            favorite: state.is_favorite(),
            committed: state.committed(),
            pending: state.is_pending(),
            needs_sync: entry.is_some_and(|e| e.needs_sync),
            last_error: entry.and_then(|e| e.last_error.clone()),
            committed_at: entry.and_then(|e| e.committed_at),
        }
    }
}
