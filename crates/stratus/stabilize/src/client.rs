//! Control-plane collaborator interface
//!
//! The core never talks to a wire format directly; it calls this trait
//! and lets the embedding service supply transport and credentials.

use crate::error::{ClientError, Result, StabilizeError};
use crate::status::OperationStatus;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stratus_types::{OperationId, OperationKind, PlacementGroup, TargetGroupId};
use thiserror::Error;
use tracing::{info, warn};

/// Submission errors, split so exactly one condition is retryable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Another operation is already running against the target group.
    /// The only retryable submission outcome.
    #[error("an operation is already in progress on {0}")]
    Busy(TargetGroupId),

    /// Any other rejection; fatal, never retried
    #[error("submission rejected: {0}")]
    Rejected(String),
}

/// Remote lifecycle state of a target group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupState {
    Active,
    Deleted,
}

/// What the control plane reports about a target group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetGroupDescription {
    /// The described group
    pub group: TargetGroupId,

    /// Reported lifecycle state
    pub state: GroupState,
}

/// Client surface of the remote control plane
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Submit one batched mutation; returns the operation token driving it
    async fn submit(
        &self,
        kind: OperationKind,
        group: &TargetGroupId,
        batch: &PlacementGroup,
    ) -> std::result::Result<OperationId, SubmitError>;

    /// Fetch the reported status of an in-flight operation
    async fn operation_status(
        &self,
        group: &TargetGroupId,
        operation: &OperationId,
    ) -> std::result::Result<OperationStatus, ClientError>;

    /// Describe a target group's remote state
    async fn describe_group(
        &self,
        group: &TargetGroupId,
    ) -> std::result::Result<TargetGroupDescription, ClientError>;
}

/// Describe a target group, translating a deleted group into the
/// distinct not-found error the read path expects.
pub async fn describe_group(
    client: &dyn ControlPlane,
    group: &TargetGroupId,
) -> Result<TargetGroupDescription> {
    let description = client.describe_group(group).await?;
    match description.state {
        GroupState::Deleted => {
            warn!(group = %group, "target group is deleted");
            Err(StabilizeError::GroupNotFound(group.clone()))
        }
        GroupState::Active => {
            info!(group = %group, "described target group");
            Ok(description)
        }
    }
}
