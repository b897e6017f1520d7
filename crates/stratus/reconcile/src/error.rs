//! Reconciliation error types

use stratus_types::{RegionId, TargetId};
use thiserror::Error;

/// Errors raised while validating and expanding placement declarations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("no deployment targets specified for placement group")]
    EmptyTargets,

    #[error("placement [{target},{region}] is duplicated")]
    DuplicatePlacement { target: TargetId, region: RegionId },
}

/// Result type for reconciliation operations
pub type Result<T> = std::result::Result<T, ReconcileError>;
