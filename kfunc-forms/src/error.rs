//! Errors raised while binding form input.

use thiserror::Error;

use crate::record::NativeKind;

/// Result alias for form operations.
pub type FormResult<T> = Result<T, FormError>;

/// Errors surfaced by the binder and by type-erased instances.
///
/// A failed bind leaves the target partially populated: fields declared
/// before the failing one have already been written. Discard the instance
/// instead of binding it again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A form instance was not of the record type the caller expected.
    #[error("invalid form target: expected `{expected}`, found `{found}`")]
    InvalidTarget {
        /// Type name the caller asked for.
        expected: &'static str,
        /// Type name of the instance that was supplied.
        found: &'static str,
    },

    /// A submitted value could not be converted to the field's native type.
    #[error("cannot bind field `{field}`: `{value}` is not a valid {expected} ({reason})")]
    Coercion {
        /// External name of the field.
        field: String,
        /// Raw value that failed to convert.
        value: String,
        /// Native representation of the field.
        expected: NativeKind,
        /// Parser message.
        reason: String,
    },
}

impl FormError {
    /// Creates a coercion error for the supplied field.
    #[must_use]
    pub fn coercion(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: NativeKind,
        reason: impl Into<String>,
    ) -> Self {
        Self::Coercion {
            field: field.into(),
            value: value.into(),
            expected,
            reason: reason.into(),
        }
    }
}
