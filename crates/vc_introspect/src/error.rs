use alloc::string::String;

use thiserror::Error;

// -----------------------------------------------------------------------------
// IntrospectError

/// A configuration error found while introspecting annotations.
///
/// "No opinion" is never an error; every variant here means the metadata
/// itself is wrong and the member (or class) it was found on cannot be
/// processed. Whether to abort the whole pass or skip the member is up to
/// the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IntrospectError {
    #[error("invalid {annotation} annotation on `{element}`: class `{class}` is not a {required}")]
    InvalidConverter {
        annotation: &'static str,
        element: String,
        class: &'static str,
        required: &'static str,
    },

    #[error(
        "multiple methods of `{class}` have an active {annotation} annotation: \
         `{first}` and `{second}`"
    )]
    DuplicateAnnotation {
        class: String,
        annotation: &'static str,
        first: String,
        second: String,
    },
}

impl IntrospectError {
    /// Returns `true` for errors caused by a converter override.
    #[inline]
    pub fn is_invalid_converter(&self) -> bool {
        matches!(self, Self::InvalidConverter { .. })
    }
}
