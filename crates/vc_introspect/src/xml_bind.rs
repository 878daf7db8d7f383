//! The XML-binding annotation convention and its introspector.
//!
//! This convention describes documents in terms of elements and attributes.
//! [`XmlBindIntrospector`] maps that vocabulary onto the shared introspection
//! contract, so a class annotated for XML binding serializes the same way
//! through any wire format.
//!
//! Names equal to [`DEFAULT_NAME`] stand for "the natural name of the
//! member" and are reported as an explicit empty name.

use alloc::string::String;
use core::any::TypeId;

use crate::converter::{Capabilities, ClassValue, ConverterOverride, resolve_override};
use crate::element::{Annotated, AnnotatedClass, AnnotatedField, AnnotatedMethod, Annotation};
use crate::element::{AnnotationKind, Annotations, Member};
use crate::{AccessorRole, IntrospectError, Introspector, TriState};

/// Sentinel name meaning "derive the name from the member".
pub const DEFAULT_NAME: &str = "##default";

// -----------------------------------------------------------------------------
// Annotations

/// Tag marker of the XML-binding convention.
pub struct XmlBindTag;

macro_rules! xml_annotation {
    ($($ty:ident),* $(,)?) => {$(
        impl Annotation for $ty {
            const NAME: &'static str = stringify!($ty);

            #[inline]
            fn tag() -> Option<TypeId> {
                Some(TypeId::of::<XmlBindTag>())
            }
        }
    )*};
}

/// Which members of a class are bound by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlAccessType {
    /// Every getter/setter pair.
    Property,
    /// Every non-static, non-transient field.
    Field,
    /// Every public getter/setter pair and public field.
    PublicMember,
    /// Only explicitly annotated members.
    None,
}

/// Class-level default binding of members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlAccessorType(pub XmlAccessType);

/// The member is not bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlTransient;

/// Binds the member to a child element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    /// Null values are written as explicit nil elements.
    pub nillable: bool,
}

impl XmlElement {
    /// An element with an explicit name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nillable: false,
        }
    }
}

impl Default for XmlElement {
    fn default() -> Self {
        Self::named(DEFAULT_NAME)
    }
}

/// Binds the member to an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    pub name: String,
}

impl XmlAttribute {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for XmlAttribute {
    fn default() -> Self {
        Self::named(DEFAULT_NAME)
    }
}

/// Wraps a collection-valued member in an extra element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElementWrapper {
    pub name: String,
}

impl XmlElementWrapper {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for XmlElementWrapper {
    fn default() -> Self {
        Self::named(DEFAULT_NAME)
    }
}

/// Converts the member through a type adapter class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlTypeAdapter(pub ClassValue);

/// Wire name of an enum constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlEnumValue(pub String);

/// The member holds the text content of its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlValue;

xml_annotation!(
    XmlAccessorType,
    XmlTransient,
    XmlElement,
    XmlAttribute,
    XmlElementWrapper,
    XmlTypeAdapter,
    XmlEnumValue,
    XmlValue,
);

fn explicit_name(name: &str) -> String {
    if name == DEFAULT_NAME {
        String::new()
    } else {
        String::from(name)
    }
}

// A wrapped collection is bound under its wrapper name.
fn bound_name(annotations: &Annotations) -> Option<String> {
    if let Some(wrapper) = annotations.get::<XmlElementWrapper>() {
        return Some(explicit_name(&wrapper.name));
    }
    if let Some(element) = annotations.get::<XmlElement>() {
        return Some(explicit_name(&element.name));
    }
    annotations
        .get::<XmlAttribute>()
        .map(|attribute| explicit_name(&attribute.name))
}

// -----------------------------------------------------------------------------
// XmlBindIntrospector

/// [`Introspector`] for the XML-binding annotation convention.
///
/// # Examples
///
/// ```
/// use vc_introspect::element::AnnotatedMethod;
/// use vc_introspect::xml_bind::{XmlAttribute, XmlBindIntrospector, XmlElement};
/// use vc_introspect::{AccessorRole, Introspector};
///
/// let named = AnnotatedMethod::new("get_id", 0).with(XmlAttribute::named("id"));
/// let natural = AnnotatedMethod::new("get_body", 0).with(XmlElement::default());
///
/// let xml = XmlBindIntrospector;
/// assert_eq!(xml.property_name(&named, AccessorRole::Getter).as_deref(), Some("id"));
/// assert_eq!(xml.property_name(&natural, AccessorRole::Getter).as_deref(), Some(""));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlBindIntrospector;

impl XmlBindIntrospector {
    fn accessor_detection(class: &AnnotatedClass) -> TriState {
        match class.annotations().get::<XmlAccessorType>() {
            Some(XmlAccessorType(XmlAccessType::Property | XmlAccessType::PublicMember)) => {
                TriState::True
            }
            Some(XmlAccessorType(XmlAccessType::Field | XmlAccessType::None)) => TriState::False,
            None => TriState::Unspecified,
        }
    }

    fn adapter(element: &dyn Annotated) -> Result<ConverterOverride, IntrospectError> {
        let value = element.annotations().get::<XmlTypeAdapter>().map(|a| &a.0);
        resolve_override(value, XmlTypeAdapter::NAME, element, Capabilities::ADAPTER)
    }
}

impl Introspector for XmlBindIntrospector {
    fn name(&self) -> &'static str {
        "xml_bind"
    }

    fn is_handled(&self, kind: &AnnotationKind) -> bool {
        kind.is_tagged::<XmlBindTag>()
    }

    // The adapter converts in both directions.
    fn find_serializer(
        &self,
        element: &dyn Annotated,
    ) -> Result<ConverterOverride, IntrospectError> {
        Self::adapter(element)
    }

    fn find_deserializer(
        &self,
        element: &dyn Annotated,
    ) -> Result<ConverterOverride, IntrospectError> {
        Self::adapter(element)
    }

    // No disabling form exists.
    fn is_ignorable(&self, member: Member<'_>) -> TriState {
        if member.annotations().contains::<XmlTransient>() {
            TriState::True
        } else {
            TriState::Unspecified
        }
    }

    fn getter_auto_detection(&self, class: &AnnotatedClass) -> TriState {
        Self::accessor_detection(class)
    }

    fn setter_auto_detection(&self, class: &AnnotatedClass) -> TriState {
        Self::accessor_detection(class)
    }

    fn will_omit_nulls(&self, element: &dyn Annotated, default: bool) -> bool {
        match element.annotations().get::<XmlElement>() {
            Some(XmlElement { nillable: true, .. }) => false,
            _ => default,
        }
    }

    fn property_name(&self, method: &AnnotatedMethod, role: AccessorRole) -> Option<String> {
        let _ = role;
        bound_name(method.annotations())
    }

    fn field_property_name(&self, field: &AnnotatedField) -> Option<String> {
        bound_name(field.annotations())
    }

    fn wrapper_name(&self, member: Member<'_>) -> Option<String> {
        member
            .annotations()
            .get::<XmlElementWrapper>()
            .map(|wrapper| explicit_name(&wrapper.name))
    }

    fn enum_value_name(&self, constant: &AnnotatedField) -> Option<String> {
        constant
            .annotations()
            .get::<XmlEnumValue>()
            .map(|value| value.0.clone())
    }

    fn has_as_value(&self, method: &AnnotatedMethod) -> TriState {
        if method.annotations().contains::<XmlValue>() {
            TriState::True
        } else {
            TriState::Unspecified
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
