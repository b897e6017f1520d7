//! Resume context carried by the caller across re-invocations
//!
//! The poller is externally resumed, so everything it needs between
//! steps must live in a value the embedding service can persist and
//! replay: which phase is in flight, the batches still to submit, the
//! outstanding poll state, and the busy-collision count for the current
//! submission. The context must round-trip through serde unchanged.

use crate::poller::{PollState, SubmitState};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use stratus_reconcile::{aggregate, ReconcilePlan};
use stratus_types::{OperationKind, PlacementGroup};

/// Reconciliation phase currently being driven.
///
/// Phases run in a fixed order: deletes first, then creates, then
/// updates, each phase's batches stabilizing one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Delete,
    Create,
    Update,
}

impl Phase {
    /// The operation kind submitted for batches of this phase
    pub fn kind(self) -> OperationKind {
        match self {
            Phase::Delete => OperationKind::Delete,
            Phase::Create => OperationKind::Create,
            Phase::Update => OperationKind::Update,
        }
    }

    fn next(self) -> Option<Phase> {
        match self {
            Phase::Delete => Some(Phase::Create),
            Phase::Create => Some(Phase::Update),
            Phase::Update => None,
        }
    }
}

/// Persistent state of one reconciliation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackContext {
    /// Phase whose batches are currently being submitted
    pub phase: Phase,

    /// Batches not yet submitted for the delete phase
    pub delete_batches: VecDeque<PlacementGroup>,

    /// Batches not yet submitted for the create phase
    pub create_batches: VecDeque<PlacementGroup>,

    /// Batches not yet submitted for the update phase
    pub update_batches: VecDeque<PlacementGroup>,

    /// Poll state of the operation currently stabilizing, if any
    pub in_flight: Option<PollState>,

    /// Bookkeeping for the submission currently absorbing busy
    /// collisions, if any
    pub submission: Option<SubmitState>,
}

impl CallbackContext {
    /// Build a context from a reconciliation plan, aggregating each
    /// partition into its batched form.
    pub fn for_plan(plan: &ReconcilePlan) -> Self {
        Self {
            phase: Phase::Delete,
            delete_batches: aggregate(&plan.to_delete).into(),
            create_batches: aggregate(&plan.to_create).into(),
            update_batches: aggregate(&plan.to_update).into(),
            in_flight: None,
            submission: None,
        }
    }

    /// Pop the next batch to submit, advancing the phase past any empty
    /// queues. Returns `None` when every partition has been drained.
    pub fn next_batch(&mut self) -> Option<(OperationKind, PlacementGroup)> {
        loop {
            if let Some(batch) = self.current_queue().pop_front() {
                return Some((self.phase.kind(), batch));
            }
            self.phase = self.phase.next()?;
        }
    }

    /// True when no batch remains and nothing is in flight
    pub fn is_complete(&self) -> bool {
        self.in_flight.is_none()
            && self.delete_batches.is_empty()
            && self.create_batches.is_empty()
            && self.update_batches.is_empty()
    }

    fn current_queue(&mut self) -> &mut VecDeque<PlacementGroup> {
        match self.phase {
            Phase::Delete => &mut self.delete_batches,
            Phase::Create => &mut self.create_batches,
            Phase::Update => &mut self.update_batches,
        }
    }
}
