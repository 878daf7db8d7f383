use core::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------
// MethodRoles

bitflags! {
    /// The auto-detectable roles a method can play in a bean.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MethodRoles: u8 {
        const GETTER  = 1 << 0;
        const SETTER  = 1 << 1;
        const CREATOR = 1 << 2;
    }
}

impl MethodRoles {
    /// Reduces a role list to the set of enabled roles.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_introspect::{DetectRole, MethodRoles};
    ///
    /// let roles = MethodRoles::from_detect_roles(&[DetectRole::Getter, DetectRole::Creator]);
    /// assert_eq!(roles, MethodRoles::GETTER | MethodRoles::CREATOR);
    ///
    /// assert!(MethodRoles::from_detect_roles(&[DetectRole::None]).is_empty());
    /// ```
    pub fn from_detect_roles(roles: &[DetectRole]) -> Self {
        roles
            .iter()
            .fold(Self::empty(), |acc, role| acc | role.enabled_roles())
    }
}

// -----------------------------------------------------------------------------
// DetectRole

/// One entry of a class-level auto-detection role list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectRole {
    Getter,
    Setter,
    Creator,
    /// Enables every role.
    All,
    /// Enables no role.
    None,
}

impl DetectRole {
    /// Returns the roles this entry enables.
    #[inline]
    pub const fn enabled_roles(self) -> MethodRoles {
        match self {
            Self::Getter => MethodRoles::GETTER,
            Self::Setter => MethodRoles::SETTER,
            Self::Creator => MethodRoles::CREATOR,
            Self::All => MethodRoles::all(),
            Self::None => MethodRoles::empty(),
        }
    }

    #[inline]
    pub const fn getter_enabled(self) -> bool {
        self.enabled_roles().contains(MethodRoles::GETTER)
    }

    #[inline]
    pub const fn setter_enabled(self) -> bool {
        self.enabled_roles().contains(MethodRoles::SETTER)
    }

    #[inline]
    pub const fn creator_enabled(self) -> bool {
        self.enabled_roles().contains(MethodRoles::CREATOR)
    }
}

// -----------------------------------------------------------------------------
// AccessorRole

/// The accessor side a property name is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorRole {
    Getter,
    Setter,
}

impl fmt::Display for AccessorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Getter => "getter",
            Self::Setter => "setter",
        })
    }
}

// -----------------------------------------------------------------------------
// Tests
