//! Error types shared by every container in the crate.
//!
//! All of the structures are deterministic and in-memory, so every error is
//! a precondition violation reported straight back to the caller. Nothing
//! is retried and nothing is silently corrected.

use std::fmt;

// =============================================================================
// CollectionError
// =============================================================================

/// Errors reported by container operations and constructors.
///
/// # Examples
///
/// ```rust
/// use ordkit::error::CollectionError;
///
/// let error = CollectionError::InvalidConfiguration {
///     parameter: "bucket_count",
///     value: 0,
///     minimum: 1,
/// };
/// assert_eq!(
///     format!("{error}"),
///     "invalid configuration: bucket_count is 0, must be at least 1"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionError {
    /// A keyed lookup found no entry for the key.
    ///
    /// This is distinct from finding an entry whose value happens to be
    /// empty, zero, or otherwise "falsy".
    KeyNotFound,

    /// The front, top, or minimum of an empty structure was requested.
    EmptyStructureAccess {
        /// The structure that was empty (`"Queue"`, `"Stack"`, ...).
        structure: &'static str,
        /// The operation that needed an element.
        operation: &'static str,
    },

    /// A constructor parameter was below its allowed minimum.
    InvalidConfiguration {
        /// Name of the rejected parameter.
        parameter: &'static str,
        /// The value that was supplied.
        value: usize,
        /// The smallest accepted value.
        minimum: usize,
    },
}

impl CollectionError {
    /// Builds an [`CollectionError::EmptyStructureAccess`].
    #[inline]
    #[must_use]
    pub const fn empty(structure: &'static str, operation: &'static str) -> Self {
        Self::EmptyStructureAccess {
            structure,
            operation,
        }
    }

    /// Checks `value >= minimum`, returning [`CollectionError::InvalidConfiguration`]
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` when `value < minimum`.
    pub fn require_at_least(
        parameter: &'static str,
        value: usize,
        minimum: usize,
    ) -> Result<usize, Self> {
        if value < minimum {
            tracing::debug!(parameter, value, minimum, "rejected configuration");
            Err(Self::InvalidConfiguration {
                parameter,
                value,
                minimum,
            })
        } else {
            Ok(value)
        }
    }
}

impl fmt::Display for CollectionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyNotFound => write!(formatter, "key not found"),
            Self::EmptyStructureAccess {
                structure,
                operation,
            } => write!(formatter, "{structure}::{operation} called on an empty {structure}"),
            Self::InvalidConfiguration {
                parameter,
                value,
                minimum,
            } => write!(
                formatter,
                "invalid configuration: {parameter} is {value}, must be at least {minimum}"
            ),
        }
    }
}

impl std::error::Error for CollectionError {}

// =============================================================================
// InvariantViolation
// =============================================================================

/// A structural invariant found broken by a `validate()` self-check.
///
/// Produced by [`SearchTree::validate`](crate::tree::SearchTree::validate)
/// and [`BTree::validate`](crate::tree::BTree::validate). A correct
/// implementation never returns one; they exist so tests and debugging
/// sessions can check the shape of a tree after arbitrary mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// The structure that was checked.
    pub structure: &'static str,
    /// What was wrong.
    pub detail: String,
}

impl InvariantViolation {
    pub(crate) fn new(structure: &'static str, detail: impl Into<String>) -> Self {
        Self {
            structure,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} invariant violated: {}", self.structure, self.detail)
    }
}

impl std::error::Error for InvariantViolation {}
