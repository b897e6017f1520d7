//! Re-aggregation of flat placement sets into batched groups
//!
//! Two fixed-order merge passes: first group placements by
//! (target, parameters) and union their regions, then group those
//! partials by (region set, parameters) and union their targets.
//! Grouping by target first and merging identical region sets second is
//! what lets one batch span several targets; the result is the minimum
//! this strategy can reach, not a proven-minimal set partition.

use std::collections::{BTreeSet, HashMap, HashSet};
use stratus_types::{Parameter, Placement, PlacementGroup, RegionId};

/// Canonical, order-insensitive form of a parameter set, usable as a
/// grouping key. Matches the value equality used for update detection.
fn parameter_key(parameters: &[Parameter]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = parameters
        .iter()
        .map(|p| (p.key.clone(), p.value.clone()))
        .collect();
    key.sort();
    key
}

/// Merge a flat placement set into the fewest batched groups reachable
/// by the two-pass strategy. Applied independently to each plan
/// partition.
pub fn aggregate(flat: &HashSet<Placement>) -> Vec<PlacementGroup> {
    // Pass 1: same target and same parameters, union the regions.
    let mut by_target: HashMap<_, PlacementGroup> = HashMap::new();
    for placement in flat {
        let key = (
            placement.target().clone(),
            parameter_key(placement.parameters()),
        );
        by_target
            .entry(key)
            .and_modify(|group| {
                group.regions.insert(placement.region().clone());
            })
            .or_insert_with(|| {
                PlacementGroup::new(
                    [placement.region().clone()],
                    [placement.target().clone()],
                    placement.parameters().to_vec(),
                )
            });
    }

    // Pass 2: same region set and same parameters, union the targets.
    let mut by_regions: HashMap<(BTreeSet<RegionId>, Vec<(String, String)>), PlacementGroup> =
        HashMap::new();
    for ((_, params), group) in by_target {
        let key = (group.regions.clone(), params);
        by_regions
            .entry(key)
            .and_modify(|merged| {
                merged.targets.extend(group.targets.iter().cloned());
            })
            .or_insert(group);
    }

    by_regions.into_values().collect()
}
