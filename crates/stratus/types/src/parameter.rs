//! Parameter overrides carried by a placement
//!
//! Parameter sets are compared by value, independent of ordering. The
//! comparison is deliberately separate from [`Placement`] equality:
//! placement identity never includes parameters.
//!
//! [`Placement`]: crate::placement::Placement

use serde::{Deserialize, Serialize};

/// One parameter override entry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter key
    pub key: String,

    /// Parameter value
    pub value: String,
}

impl Parameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Compare two parameter sets by value, ignoring order.
///
/// Two sets are equal iff they have the same cardinality and every entry
/// in one has an entry with the same key and the same value in the other.
pub fn parameters_match(left: &[Parameter], right: &[Parameter]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.iter().all(|param| {
        right
            .iter()
            .any(|other| other.key == param.key && other.value == param.value)
    })
}
