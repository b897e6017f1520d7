//! Diffing a previous flat placement set against a desired one
//!
//! Create and delete partitions fall out of identity-only set
//! differences. The retained intersection then gets a separate
//! parameter-equality pass: placement identity deliberately ignores
//! parameters, so updates are only visible by looking the previous
//! placement up by identity and comparing payloads explicitly.

use crate::plan::ReconcilePlan;
use std::collections::HashSet;
use stratus_types::Placement;

/// Partition desired placements against previous ones.
///
/// Read-only: neither input is mutated and the call cannot fail.
pub fn reconcile(
    previous: &HashSet<Placement>,
    desired: &HashSet<Placement>,
) -> ReconcilePlan {
    let to_create: HashSet<Placement> = desired.difference(previous).cloned().collect();
    let to_delete: HashSet<Placement> = previous.difference(desired).cloned().collect();

    // Identity-only Eq/Hash makes the previous set its own
    // identity -> placement index: `get` returns the stored placement,
    // parameters included. Iterate `desired` directly rather than
    // `intersection`, which walks the smaller set and would hand back
    // previous-side placements with stale payloads.
    let to_update: HashSet<Placement> = desired
        .iter()
        .filter(|retained| {
            previous
                .get(*retained)
                .is_some_and(|prev| !prev.parameters_match(retained))
        })
        .cloned()
        .collect();

    ReconcilePlan {
        to_create,
        to_delete,
        to_update,
    }
}
