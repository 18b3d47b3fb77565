//! Drag reorder engine
//!
//! One gesture at a time moves through
//!
//! ```text
//! Idle ──begin_drag──▶ Dragging ──drop_at(Some)──▶ Dropped ──commit──▶ Idle
//!                         └──────drop_at(None)─────────────────────────▶ Idle
//! ```
//!
//! Indices arrive in the visible page's local coordinates and are mapped to
//! the full collection as `(page - 1) * PAGE_SIZE + local` before anything
//! is spliced.
//!
//! Committing is optimistic: the move and full renumbering are applied to
//! the collection first, then one `PATCH` per record in the affected range
//! is sent concurrently. If any of them fails the collection is restored
//! from the pre-move snapshot and no further requests are made. Requests
//! that already succeeded are not undone on the backend.

pub mod error;

pub use error::ReorderError;

use crate::api::{ApiError, RecipeBackend};
use crate::pipeline::PAGE_SIZE;
use crate::recipe::RecipeId;
use crate::store::{OrderChange, RecipeCollection, affected_range};
use futures_util::future::join_all;
use std::ops::RangeInclusive;
use tracing::{debug, warn};

/// Map a page-local index to the full collection
///
/// `None` if the position does not fit in a `usize`.
#[must_use]
pub const fn global_index(page: usize, local: usize) -> Option<usize> {
    match page.saturating_sub(1).checked_mul(PAGE_SIZE) {
        Some(base) => base.checked_add(local),
        None => None,
    }
}

/// A validated move in collection coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePlan {
    pub source: usize,
    pub destination: usize,
}

impl MovePlan {
    /// Build a plan from page-local indices
    ///
    /// `None` if either position does not fit in a `usize`.
    #[must_use]
    pub fn from_local(page: usize, local_source: usize, local_destination: usize) -> Option<Self> {
        Some(Self {
            source: global_index(page, local_source)?,
            destination: global_index(page, local_destination)?,
        })
    }

    /// Inclusive range of collection indices whose order changes
    #[must_use]
    pub fn affected(&self) -> RangeInclusive<usize> {
        affected_range(self.source, self.destination)
    }

    /// True if the record is dropped back onto its own slot
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.source == self.destination
    }
}

/// Where the current gesture stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReorderPhase {
    #[default]
    Idle,
    /// Drag started; `source` is a collection index
    Dragging { page: usize, source: usize },
    /// Drop accepted, waiting for `commit`
    Dropped { plan: MovePlan },
}

/// Result of committing a reorder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// Every affected record was persisted
    Committed { changes: Vec<OrderChange> },

    /// At least one request failed; the pre-move order was restored
    RolledBack {
        succeeded: usize,
        failures: Vec<(RecipeId, ApiError)>,
    },

    /// Dropped onto the source slot; nothing to do
    Unchanged,
}

impl ReorderOutcome {
    /// True if the new order stuck
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    /// Number of `PATCH` requests that were sent
    #[must_use]
    pub fn requests_sent(&self) -> usize {
        match self {
            Self::Committed { changes } => changes.len(),
            Self::RolledBack {
                succeeded,
                failures,
            } => succeeded + failures.len(),
            Self::Unchanged => 0,
        }
    }
}

/// Drives one reorder gesture at a time
#[derive(Debug, Default)]
pub struct ReorderEngine {
    phase: ReorderPhase,
}

impl ReorderEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn phase(&self) -> ReorderPhase {
        self.phase
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.phase, ReorderPhase::Idle)
    }

    /// Capture the drag source on the given page
    ///
    /// # Errors
    ///
    /// Returns `ReorderError::Busy` unless the engine is idle and
    /// `ReorderError::Unaddressable` if the slot lies beyond any possible
    /// collection position.
    pub fn begin_drag(&mut self, page: usize, local_source: usize) -> Result<(), ReorderError> {
        if !self.is_idle() {
            return Err(ReorderError::Busy);
        }
        let page = page.max(1);
        let source = global_index(page, local_source).ok_or(ReorderError::Unaddressable {
            page,
            local: local_source,
        })?;
        self.phase = ReorderPhase::Dragging { page, source };
        Ok(())
    }

    /// Capture the drop target
    ///
    /// `None` means the drag ended outside any valid slot: the engine goes
    /// back to idle and nothing is planned. `len` is the size of the full
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns `ReorderError::NotDragging` without a drag in progress, and
    /// `ReorderError::OutOfRange` or `ReorderError::Unaddressable` if either
    /// index falls outside the collection; the engine is idle afterwards in
    /// the latter cases.
    pub fn drop_at(
        &mut self,
        local_destination: Option<usize>,
        len: usize,
    ) -> Result<Option<MovePlan>, ReorderError> {
        let ReorderPhase::Dragging { page, source } = self.phase else {
            return Err(ReorderError::NotDragging);
        };
        self.phase = ReorderPhase::Idle;

        let Some(local_destination) = local_destination else {
            debug!("drag cancelled");
            return Ok(None);
        };
        let destination =
            global_index(page, local_destination).ok_or(ReorderError::Unaddressable {
                page,
                local: local_destination,
            })?;
        let plan = MovePlan {
            source,
            destination,
        };
        for index in [plan.source, plan.destination] {
            if index >= len {
                return Err(ReorderError::OutOfRange { index, len });
            }
        }

        self.phase = ReorderPhase::Dropped { plan };
        Ok(Some(plan))
    }

    /// Abandon the current gesture
    pub fn reset(&mut self) {
        self.phase = ReorderPhase::Idle;
    }

    /// Apply the dropped move and persist the affected range
    ///
    /// The engine is idle when this returns.
    ///
    /// # Errors
    ///
    /// Returns `ReorderError::NotDragging` if no drop is pending and
    /// `ReorderError::OutOfRange` if the collection shrank since the drop.
    pub async fn commit<B>(
        &mut self,
        collection: &mut RecipeCollection,
        backend: &B,
    ) -> Result<ReorderOutcome, ReorderError>
    where
        B: RecipeBackend + ?Sized,
    {
        let ReorderPhase::Dropped { plan } = std::mem::take(&mut self.phase) else {
            return Err(ReorderError::NotDragging);
        };
        if plan.is_noop() {
            return Ok(ReorderOutcome::Unchanged);
        }

        let before = collection.snapshot();
        let len = collection.len();
        let changes = collection
            .apply_move(plan.source, plan.destination)
            .ok_or(ReorderError::OutOfRange {
                index: plan.source.max(plan.destination),
                len,
            })?;
        debug!(
            "moved {} -> {}, persisting {} records",
            plan.source,
            plan.destination,
            changes.len()
        );

        let results = join_all(
            changes
                .iter()
                .map(|change| backend.patch_order(&change.id, change.order)),
        )
        .await;

        let failures: Vec<(RecipeId, ApiError)> = changes
            .iter()
            .zip(results)
            .filter_map(|(change, result)| result.err().map(|e| (change.id.clone(), e)))
            .collect();

        if failures.is_empty() {
            return Ok(ReorderOutcome::Committed { changes });
        }

        for (id, error) in &failures {
            warn!("failed to persist order of recipe {id}: {error}");
        }
        collection.restore(&before);
        Ok(ReorderOutcome::RolledBack {
            succeeded: changes.len() - failures.len(),
            failures,
        })
    }
}
