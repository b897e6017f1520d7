//! Expansion of grouped declarations into flat placement sets
//!
//! A group expands to the cartesian product of its regions and targets,
//! with the group's parameter set broadcast onto every placement.
//! Duplicate identities are rejected at insertion time so the first
//! occurrence's parameters are never silently shadowed.

use crate::error::{ReconcileError, Result};
use std::collections::HashSet;
use stratus_types::{Placement, PlacementGroup};

/// Expand a single group into its flat placement set.
///
/// Fails with [`ReconcileError::EmptyTargets`] when the group declares no
/// deployment targets.
pub fn flatten_group(group: &PlacementGroup) -> Result<HashSet<Placement>> {
    let mut flat = HashSet::new();
    flatten_into(group, &mut flat)?;
    Ok(flat)
}

/// Expand a whole model (a set of groups) into one flat placement set.
///
/// Fails with [`ReconcileError::DuplicatePlacement`] when two groups
/// resolve to the same (target, region) identity, before any parameter
/// comparison is considered.
pub fn flatten_model(groups: &[PlacementGroup]) -> Result<HashSet<Placement>> {
    let mut flat = HashSet::new();
    for group in groups {
        flatten_into(group, &mut flat)?;
    }
    Ok(flat)
}

fn flatten_into(group: &PlacementGroup, flat: &mut HashSet<Placement>) -> Result<()> {
    if group.targets.is_empty() {
        return Err(ReconcileError::EmptyTargets);
    }

    for region in &group.regions {
        for target in &group.targets {
            let placement = Placement::new(
                target.clone(),
                region.clone(),
                group.parameters.clone(),
            );

            // Checked at insertion time: the set would otherwise keep the
            // first occurrence and drop the conflicting one silently.
            if flat.contains(&placement) {
                return Err(ReconcileError::DuplicatePlacement {
                    target: target.clone(),
                    region: region.clone(),
                });
            }
            flat.insert(placement);
        }
    }
    Ok(())
}
