//! Control-plane operation references

use crate::ids::{OperationId, TargetGroupId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of batched mutation submitted to the control plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationKind {
    Create,
    Update,
    Delete,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Create => write!(f, "create"),
            OperationKind::Update => write!(f, "update"),
            OperationKind::Delete => write!(f, "delete"),
        }
    }
}

/// Reference to one in-flight operation, owned until it reaches a
/// terminal state and discarded afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationHandle {
    /// Operation token returned by the submission
    pub operation: OperationId,

    /// Target group the operation runs against
    pub group: TargetGroupId,
}

impl OperationHandle {
    pub fn new(operation: OperationId, group: TargetGroupId) -> Self {
        Self { operation, group }
    }
}
