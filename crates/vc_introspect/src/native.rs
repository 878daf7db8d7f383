//! The native annotation convention and its introspector.
//!
//! ## Menu
//!
//! - [`NativeTag`]: The tag carried by every annotation below.
//! - Converters: [`JsonUseSerializer`], [`JsonUseDeserializer`].
//! - Membership: [`JsonIgnore`], [`JsonAutoDetect`], [`JsonWriteNullProperties`].
//! - Naming: [`JsonGetter`], [`JsonSetter`], [`JsonProperty`].
//! - Roles: [`JsonValue`], [`JsonAnySetter`], [`JsonCreator`].
//! - [`NativeIntrospector`]: Answers queries from the annotations above.

use alloc::string::String;
use alloc::vec::Vec;
use core::any::TypeId;

use crate::converter::{Capabilities, ClassValue, ConverterOverride, resolve_override};
use crate::element::{Annotated, AnnotatedClass, AnnotatedField, AnnotatedMethod, Annotation};
use crate::element::{AnnotationKind, Member};
use crate::{AccessorRole, DetectRole, IntrospectError, Introspector, MethodRoles, TriState};

// -----------------------------------------------------------------------------
// Annotations

/// Tag marker of the native convention.
pub struct NativeTag;

macro_rules! native_annotation {
    ($($ty:ident),* $(,)?) => {$(
        impl Annotation for $ty {
            const NAME: &'static str = stringify!($ty);

            #[inline]
            fn tag() -> Option<TypeId> {
                Some(TypeId::of::<NativeTag>())
            }
        }
    )*};
}

/// Force-use a serializer class for the annotated element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonUseSerializer(pub ClassValue);

/// Force-use a deserializer class for the annotated element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonUseDeserializer(pub ClassValue);

/// Marks a field or method as ignorable; `JsonIgnore(false)` explicitly
/// marks it as not ignorable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonIgnore(pub bool);

/// Lists the method roles auto-detected on the annotated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonAutoDetect(pub Vec<DetectRole>);

/// Whether properties with a null value are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonWriteNullProperties(pub bool);

/// Explicit property name of a getter; `""` keeps the natural name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonGetter(pub String);

/// Explicit property name of a setter; `""` keeps the natural name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSetter(pub String);

/// Explicit property name of a field; `""` keeps the natural name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonProperty(pub String);

/// The annotated method produces the whole serialized value;
/// `JsonValue(false)` disables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonValue(pub bool);

/// The annotated two-argument method receives every unknown property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonAnySetter;

/// The annotated method is a creator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonCreator;

native_annotation!(
    JsonUseSerializer,
    JsonUseDeserializer,
    JsonIgnore,
    JsonAutoDetect,
    JsonWriteNullProperties,
    JsonGetter,
    JsonSetter,
    JsonProperty,
    JsonValue,
    JsonAnySetter,
    JsonCreator,
);

// -----------------------------------------------------------------------------
// NativeIntrospector

/// [`Introspector`] for the native annotation convention.
///
/// # Examples
///
/// ```
/// use vc_introspect::element::{AnnotatedField, Member};
/// use vc_introspect::native::{JsonIgnore, NativeIntrospector};
/// use vc_introspect::{Introspector, TriState};
///
/// let field = AnnotatedField::new("secret").with(JsonIgnore(false));
///
/// let answer = NativeIntrospector.is_ignorable(Member::Field(&field));
/// assert_eq!(answer, TriState::False);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeIntrospector;

impl NativeIntrospector {
    // Presence of the annotation always yields an explicit answer,
    // even when its role list is empty.
    fn auto_detection(class: &AnnotatedClass, role: MethodRoles) -> TriState {
        match class.annotations().get::<JsonAutoDetect>() {
            Some(JsonAutoDetect(roles)) => TriState::explicit(
                roles.iter().any(|entry| entry.enabled_roles().contains(role)),
            ),
            None => TriState::Unspecified,
        }
    }
}

impl Introspector for NativeIntrospector {
    fn name(&self) -> &'static str {
        "native"
    }

    fn is_handled(&self, kind: &AnnotationKind) -> bool {
        kind.is_tagged::<NativeTag>()
    }

    fn find_serializer(
        &self,
        element: &dyn Annotated,
    ) -> Result<ConverterOverride, IntrospectError> {
        let value = element.annotations().get::<JsonUseSerializer>().map(|a| &a.0);
        resolve_override(value, JsonUseSerializer::NAME, element, Capabilities::SERIALIZER)
    }

    fn find_deserializer(
        &self,
        element: &dyn Annotated,
    ) -> Result<ConverterOverride, IntrospectError> {
        let value = element.annotations().get::<JsonUseDeserializer>().map(|a| &a.0);
        resolve_override(value, JsonUseDeserializer::NAME, element, Capabilities::DESERIALIZER)
    }

    fn is_ignorable(&self, member: Member<'_>) -> TriState {
        let ignore = member.annotations().get::<JsonIgnore>();
        TriState::from(ignore.map(|a| a.0))
    }

    fn getter_auto_detection(&self, class: &AnnotatedClass) -> TriState {
        Self::auto_detection(class, MethodRoles::GETTER)
    }

    fn setter_auto_detection(&self, class: &AnnotatedClass) -> TriState {
        Self::auto_detection(class, MethodRoles::SETTER)
    }

    fn creator_auto_detection(&self, class: &AnnotatedClass) -> TriState {
        Self::auto_detection(class, MethodRoles::CREATOR)
    }

    fn will_omit_nulls(&self, element: &dyn Annotated, default: bool) -> bool {
        match element.annotations().get::<JsonWriteNullProperties>() {
            Some(JsonWriteNullProperties(write)) => !*write,
            None => default,
        }
    }

    fn property_name(&self, method: &AnnotatedMethod, role: AccessorRole) -> Option<String> {
        let annotations = method.annotations();
        match role {
            AccessorRole::Getter => annotations.get::<JsonGetter>().map(|a| a.0.clone()),
            AccessorRole::Setter => annotations.get::<JsonSetter>().map(|a| a.0.clone()),
        }
    }

    fn field_property_name(&self, field: &AnnotatedField) -> Option<String> {
        field.annotations().get::<JsonProperty>().map(|a| a.0.clone())
    }

    fn has_as_value(&self, method: &AnnotatedMethod) -> TriState {
        let value = method.annotations().get::<JsonValue>();
        TriState::from(value.map(|a| a.0))
    }

    fn has_any_setter(&self, method: &AnnotatedMethod) -> bool {
        method.annotations().contains::<JsonAnySetter>()
    }

    fn has_creator(&self, method: &AnnotatedMethod) -> bool {
        method.annotations().contains::<JsonCreator>()
    }
}

// -----------------------------------------------------------------------------
// Tests
