//! The flat placement model
//!
//! A placement is identified by its (target, region) pair alone. The
//! parameter payload is excluded from equality and hashing on purpose:
//! two placements at the same coordinates are the same placement for
//! set-membership purposes even when their parameters differ, and that
//! difference is exactly what update detection looks for.

use crate::ids::{RegionId, TargetId};
use crate::parameter::{parameters_match, Parameter};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// One deployed unit at a (target, region) coordinate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    target: TargetId,
    region: RegionId,
    parameters: Vec<Parameter>,
}

impl Placement {
    pub fn new(target: TargetId, region: RegionId, parameters: Vec<Parameter>) -> Self {
        Self {
            target,
            region,
            parameters,
        }
    }

    pub fn target(&self) -> &TargetId {
        &self.target
    }

    pub fn region(&self) -> &RegionId {
        &self.region
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Compare parameter payloads by value, ignoring order.
    ///
    /// This is the explicit counterpart to the identity-only `Eq`:
    /// equal placements may still fail this check, which marks them as
    /// needing an update.
    pub fn parameters_match(&self, other: &Placement) -> bool {
        parameters_match(&self.parameters, &other.parameters)
    }
}

// Identity covers only (target, region); parameters are excluded.
impl PartialEq for Placement {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target && self.region == other.region
    }
}

impl Eq for Placement {}

impl Hash for Placement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.target.hash(state);
        self.region.hash(state);
    }
}
