//! Core types for the Stratus placement layer
//!
//! A placement is one unit of deployment, identified by a
//! (deployment target, region) pair and carrying a set of parameter
//! overrides. Placement groups are the compact declarative form:
//! a region set crossed with a target set sharing one parameter set.

#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod group;
pub mod ids;
pub mod operation;
pub mod parameter;
pub mod placement;

pub use group::PlacementGroup;
pub use ids::{OperationId, RegionId, TargetGroupId, TargetId};
pub use operation::{OperationHandle, OperationKind};
pub use parameter::{parameters_match, Parameter};
pub use placement::Placement;
