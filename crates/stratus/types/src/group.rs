//! Grouped placement declarations
//!
//! The compact form of the placement model: a region set crossed with a
//! deployment-target set, sharing one parameter set. Groups are both the
//! declarative input (what the caller wants) and the batched output (what
//! the aggregator hands to the control plane in one call).

use crate::ids::{RegionId, TargetId};
use crate::parameter::Parameter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A set of placements declared as regions x targets with shared parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementGroup {
    /// Regions the group spans
    pub regions: BTreeSet<RegionId>,

    /// Deployment targets the group spans
    pub targets: BTreeSet<TargetId>,

    /// Parameter overrides applied to every implied placement
    pub parameters: Vec<Parameter>,
}

impl PlacementGroup {
    pub fn new(
        regions: impl IntoIterator<Item = RegionId>,
        targets: impl IntoIterator<Item = TargetId>,
        parameters: Vec<Parameter>,
    ) -> Self {
        Self {
            regions: regions.into_iter().collect(),
            targets: targets.into_iter().collect(),
            parameters,
        }
    }

    /// Number of placements this group expands to
    pub fn placement_count(&self) -> usize {
        self.regions.len() * self.targets.len()
    }
}
