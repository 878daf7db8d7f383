use alloc::string::ToString;
use core::any::{TypeId, type_name};
use core::fmt;

use bitflags::bitflags;

use crate::IntrospectError;
use crate::element::Annotated;

// -----------------------------------------------------------------------------
// Capabilities

bitflags! {
    /// What a converter class is able to do.
    ///
    /// An override annotation is only accepted if the named class has the
    /// capability the annotation requires.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Can write values of some type to the wire format.
        const SERIALIZER   = 1 << 0;
        /// Can read values of some type from the wire format.
        const DESERIALIZER = 1 << 1;
        /// Can map values to and from a bindable representation.
        const ADAPTER      = 1 << 2;
    }
}

impl Capabilities {
    /// Human-readable name, used in error messages.
    pub fn describe(self) -> &'static str {
        if self == Self::SERIALIZER {
            "serializer"
        } else if self == Self::DESERIALIZER {
            "deserializer"
        } else if self == Self::ADAPTER {
            "type adapter"
        } else if self.is_empty() {
            "plain class"
        } else {
            "converter"
        }
    }
}

// -----------------------------------------------------------------------------
// Converter

/// A type usable as a custom converter.
///
/// Implementing this trait does not instantiate anything, it only declares
/// which [`Capabilities`] a [`ClassRef`] to the type carries.
///
/// # Examples
///
/// ```
/// use vc_introspect::converter::{Capabilities, ClassRef, Converter};
///
/// struct RgbSerializer;
///
/// impl Converter for RgbSerializer {
///     const CAPABILITIES: Capabilities = Capabilities::SERIALIZER;
/// }
///
/// let class = ClassRef::of::<RgbSerializer>();
/// assert!(class.satisfies(Capabilities::SERIALIZER));
/// assert!(!class.satisfies(Capabilities::DESERIALIZER));
/// ```
pub trait Converter: 'static {
    const CAPABILITIES: Capabilities;
}

// -----------------------------------------------------------------------------
// ClassRef

/// A type handle naming a converter class.
#[derive(Clone, Copy)]
pub struct ClassRef {
    id: TypeId,
    path: &'static str,
    capabilities: Capabilities,
}

impl ClassRef {
    /// Returns a handle to a converter type.
    #[inline]
    pub fn of<T: Converter>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: type_name::<T>(),
            capabilities: T::CAPABILITIES,
        }
    }

    /// Returns a handle to an arbitrary type without any capability.
    ///
    /// Such a handle never passes a capability check.
    #[inline]
    pub fn plain<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: type_name::<T>(),
            capabilities: Capabilities::empty(),
        }
    }

    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[inline(always)]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    #[inline(always)]
    pub const fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Returns `true` if the class has every capability in `required`.
    #[inline]
    pub const fn satisfies(&self, required: Capabilities) -> bool {
        self.capabilities.contains(required)
    }

    /// Returns `true` if this is a handle to `T`.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for ClassRef {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ClassRef {}

impl fmt::Debug for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassRef")
            .field("path", &self.path)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ClassValue

/// The class argument of a converter annotation.
///
/// [`ClassValue::NoClass`] keeps the annotation present but inert, which is
/// how an element overrides a converter inherited from elsewhere without
/// naming a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassValue {
    Class(ClassRef),
    NoClass,
}

impl ClassValue {
    /// Shorthand for `ClassValue::Class(ClassRef::of::<T>())`.
    #[inline]
    pub fn of<T: Converter>() -> Self {
        Self::Class(ClassRef::of::<T>())
    }
}

// -----------------------------------------------------------------------------
// ConverterOverride

/// The answer of a converter override query.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ConverterOverride {
    /// Force-use this class.
    Present(ClassRef),
    /// An override annotation is present but names no class.
    ///
    /// This is an explicit answer: it stops a chain from consulting
    /// lower-priority introspectors.
    ExplicitlyNone,
    /// No override annotation (no opinion).
    #[default]
    Absent,
}

impl ConverterOverride {
    #[inline]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the class to force-use, if any.
    #[inline]
    pub const fn class(&self) -> Option<&ClassRef> {
        match self {
            Self::Present(class) => Some(class),
            _ => None,
        }
    }
}

/// Turns the argument of a converter annotation into an override,
/// checking the named class against `required`.
pub(crate) fn resolve_override(
    value: Option<&ClassValue>,
    annotation: &'static str,
    element: &dyn Annotated,
    required: Capabilities,
) -> Result<ConverterOverride, IntrospectError> {
    match value {
        None => Ok(ConverterOverride::Absent),
        Some(ClassValue::NoClass) => Ok(ConverterOverride::ExplicitlyNone),
        Some(ClassValue::Class(class)) if class.satisfies(required) => {
            Ok(ConverterOverride::Present(*class))
        }
        Some(ClassValue::Class(class)) => Err(IntrospectError::InvalidConverter {
            annotation,
            element: element.name().to_string(),
            class: class.path(),
            required: required.describe(),
        }),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Capabilities, ClassRef, ClassValue, Converter, ConverterOverride, resolve_override};
    use crate::IntrospectError;
    use crate::element::AnnotatedField;

    struct Both;

    impl Converter for Both {
        const CAPABILITIES: Capabilities =
            Capabilities::SERIALIZER.union(Capabilities::DESERIALIZER);
    }

    #[test]
    fn capability_check() {
        let class = ClassRef::of::<Both>();
        assert!(class.satisfies(Capabilities::SERIALIZER));
        assert!(class.satisfies(Capabilities::DESERIALIZER));
        assert!(!class.satisfies(Capabilities::ADAPTER));
        assert!(!ClassRef::plain::<u32>().satisfies(Capabilities::SERIALIZER));
        assert!(ClassRef::plain::<Both>() == class);
    }

    #[test]
    fn resolve_three_ways() {
        let field = AnnotatedField::new("value");
        let ser = Capabilities::SERIALIZER;

        assert_eq!(
            resolve_override(None, "JsonUseSerializer", &field, ser),
            Ok(ConverterOverride::Absent)
        );
        assert_eq!(
            resolve_override(Some(&ClassValue::NoClass), "JsonUseSerializer", &field, ser),
            Ok(ConverterOverride::ExplicitlyNone)
        );
        assert_eq!(
            resolve_override(Some(&ClassValue::of::<Both>()), "JsonUseSerializer", &field, ser),
            Ok(ConverterOverride::Present(ClassRef::of::<Both>()))
        );

        let plain = ClassValue::Class(ClassRef::plain::<u32>());
        let err = resolve_override(Some(&plain), "JsonUseSerializer", &field, ser).unwrap_err();
        assert!(matches!(
            err,
            IntrospectError::InvalidConverter { class: "u32", required: "serializer", .. }
        ));
    }
}
