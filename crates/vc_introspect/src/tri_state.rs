use core::fmt;

use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------
// TriState

/// A three-valued yes/no directive.
///
/// Every yes/no introspection query answers with a `TriState` instead of a
/// `bool`, because "the metadata says no" and "the metadata says nothing"
/// lead to different outcomes: a consumer receiving [`TriState::Unspecified`]
/// must apply its own default, while [`TriState::False`] actively disables
/// the behavior.
///
/// # Examples
///
/// ```
/// use vc_introspect::TriState;
///
/// assert_eq!(TriState::from(Some(false)), TriState::False);
/// assert_eq!(TriState::from(None), TriState::Unspecified);
///
/// // Defaulting is always explicit.
/// assert!(TriState::Unspecified.unwrap_or(true));
/// assert!(!TriState::False.unwrap_or(true));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriState {
    /// The metadata explicitly enables the behavior.
    True,
    /// The metadata explicitly disables the behavior.
    False,
    /// No metadata of a recognized convention is present.
    #[default]
    Unspecified,
}

impl TriState {
    /// Creates an explicit answer from a `bool`.
    #[inline]
    pub const fn explicit(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }

    /// Returns `true` for [`TriState::True`] and [`TriState::False`].
    #[inline]
    pub const fn is_specified(self) -> bool {
        !matches!(self, Self::Unspecified)
    }

    /// Returns `true` only for [`TriState::Unspecified`].
    #[inline]
    pub const fn is_unspecified(self) -> bool {
        matches!(self, Self::Unspecified)
    }

    /// Converts to `Option<bool>`, mapping `Unspecified` to `None`.
    #[inline]
    pub const fn to_option(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Unspecified => None,
        }
    }

    /// Resolves the flag with a caller-supplied default for `Unspecified`.
    #[inline]
    pub const fn unwrap_or(self, default: bool) -> bool {
        match self {
            Self::True => true,
            Self::False => false,
            Self::Unspecified => default,
        }
    }

    /// Returns `self` if specified, otherwise evaluates `f`.
    ///
    /// This is the first-match-wins step used when merging answers.
    #[inline]
    pub fn or_else(self, f: impl FnOnce() -> Self) -> Self {
        if self.is_specified() { self } else { f() }
    }
}

impl From<Option<bool>> for TriState {
    #[inline]
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(v) => Self::explicit(v),
            None => Self::Unspecified,
        }
    }
}

impl From<TriState> for Option<bool> {
    #[inline]
    fn from(value: TriState) -> Self {
        value.to_option()
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::True => "true",
            Self::False => "false",
            Self::Unspecified => "unspecified",
        })
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::TriState;

    #[test]
    fn false_is_not_unspecified() {
        assert_ne!(TriState::False, TriState::Unspecified);
        assert!(TriState::False.is_specified());
        assert!(!TriState::Unspecified.is_specified());
        assert_eq!(TriState::default(), TriState::Unspecified);
    }

    #[test]
    fn option_conversions() {
        for value in [Some(true), Some(false), None] {
            assert_eq!(TriState::from(value).to_option(), value);
        }
    }

    #[test]
    fn unwrap_or_only_defaults_unspecified() {
        assert!(TriState::True.unwrap_or(false));
        assert!(!TriState::False.unwrap_or(true));
        assert!(TriState::Unspecified.unwrap_or(true));
        assert!(!TriState::Unspecified.unwrap_or(false));
    }

    #[test]
    fn or_else_keeps_first_opinion() {
        assert_eq!(
            TriState::False.or_else(|| TriState::True),
            TriState::False
        );
        assert_eq!(
            TriState::Unspecified.or_else(|| TriState::True),
            TriState::True
        );
    }
}
