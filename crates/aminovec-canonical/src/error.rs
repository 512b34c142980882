use thiserror::Error;

use crate::registry::Capability;

/// Error returned when a value cannot be encoded.
///
/// Both kinds mean the catalog and the registry disagree; callers abort the
/// whole batch rather than skipping the value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The concrete type of a polymorphic value has no registered prefix.
    #[error("unregistered type: {name} is not registered as {capability} at {path}")]
    UnregisteredType {
        /// Capability the value was encoded as.
        capability: Capability,
        /// Concrete type name.
        name: &'static str,
        /// Location of the value inside the encoded structure.
        path: String,
    },
    /// A value lies outside the domain its type declares.
    #[error("value out of range: {value} at {path} ({reason})")]
    ValueOutOfRange {
        /// Location of the value inside the encoded structure.
        path: String,
        /// Offending value, rendered.
        value: String,
        /// Violated constraint.
        reason: &'static str,
    },
}

impl EncodeError {
    /// Creates an out-of-range error without location.
    pub fn out_of_range(value: impl ToString, reason: &'static str) -> Self {
        EncodeError::ValueOutOfRange {
            path: String::new(),
            value: value.to_string(),
            reason,
        }
    }

    /// Stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            EncodeError::UnregisteredType { .. } => "UnregisteredType",
            EncodeError::ValueOutOfRange { .. } => "ValueOutOfRange",
        }
    }

    /// Location of the offending value.
    pub fn path(&self) -> &str {
        match self {
            EncodeError::UnregisteredType { path, .. }
            | EncodeError::ValueOutOfRange { path, .. } => path,
        }
    }

    /// Fills in the location if it has not been set yet.
    pub(crate) fn at(mut self, location: impl ToString) -> Self {
        match &mut self {
            EncodeError::UnregisteredType { path, .. }
            | EncodeError::ValueOutOfRange { path, .. } => {
                if path.is_empty() {
                    *path = location.to_string();
                }
            }
        }
        self
    }
}
