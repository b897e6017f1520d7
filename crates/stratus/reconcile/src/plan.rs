//! Reconciliation plans and the model-level entry points
//!
//! A plan partitions the placement universe into create / delete /
//! update sets. The entry points mirror the three lifecycle analyses:
//! a fresh create and a full delete are one-sided diffs against an
//! empty set, an update diffs previous against desired.

use crate::diff::reconcile;
use crate::flatten::flatten_model;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use stratus_types::{Placement, PlacementGroup};
use tracing::debug;

/// The three flat partitions a reconciliation produces
///
/// Invariants: `to_create` and `to_delete` are disjoint by construction,
/// and `to_update` is a subset of the identity intersection of previous
/// and desired, restricted to members whose parameter payloads differ.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcilePlan {
    /// Placements desired but not previously present
    pub to_create: HashSet<Placement>,

    /// Placements previously present but no longer desired
    pub to_delete: HashSet<Placement>,

    /// Retained placements whose parameters changed, carrying the
    /// desired payload
    pub to_update: HashSet<Placement>,
}

impl ReconcilePlan {
    /// True when no partition requires any remote call
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_delete.is_empty() && self.to_update.is_empty()
    }
}

/// Plan for bringing a desired model into existence from nothing.
///
/// An absent group set is a no-op, not an error.
pub fn plan_create(desired: Option<&[PlacementGroup]>) -> Result<ReconcilePlan> {
    let Some(groups) = desired else {
        return Ok(ReconcilePlan::default());
    };
    let plan = ReconcilePlan {
        to_create: flatten_model(groups)?,
        ..ReconcilePlan::default()
    };
    debug!(create = plan.to_create.len(), "planned create");
    Ok(plan)
}

/// Plan for removing a model entirely.
pub fn plan_delete(previous: Option<&[PlacementGroup]>) -> Result<ReconcilePlan> {
    let Some(groups) = previous else {
        return Ok(ReconcilePlan::default());
    };
    let plan = ReconcilePlan {
        to_delete: flatten_model(groups)?,
        ..ReconcilePlan::default()
    };
    debug!(delete = plan.to_delete.len(), "planned delete");
    Ok(plan)
}

/// Plan the transition from a previous model to a desired one.
pub fn plan_update(
    previous: &[PlacementGroup],
    desired: &[PlacementGroup],
) -> Result<ReconcilePlan> {
    let previous_flat = flatten_model(previous)?;
    let desired_flat = flatten_model(desired)?;
    let plan = reconcile(&previous_flat, &desired_flat);
    debug!(
        create = plan.to_create.len(),
        delete = plan.to_delete.len(),
        update = plan.to_update.len(),
        "planned update"
    );
    Ok(plan)
}
