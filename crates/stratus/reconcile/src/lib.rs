//! Pure reconciliation engine for placement sets
//!
//! Expands grouped declarations into flat placement sets, diffs a
//! previous flat set against a desired one, and re-aggregates the delta
//! into the smallest batched groups this merge strategy can reach.
//!
//! Everything here is synchronous and side-effect free: callers own
//! their inputs, nothing is mutated, and the only failures are malformed
//! declarations.

#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod aggregate;
pub mod diff;
pub mod error;
pub mod flatten;
pub mod plan;

pub use aggregate::aggregate;
pub use diff::reconcile;
pub use error::{ReconcileError, Result};
pub use flatten::{flatten_group, flatten_model};
pub use plan::{plan_create, plan_delete, plan_update, ReconcilePlan};
