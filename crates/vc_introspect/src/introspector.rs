use alloc::string::String;

use crate::converter::ConverterOverride;
use crate::element::{Annotated, AnnotatedClass, AnnotatedField, AnnotatedMethod};
use crate::element::{AnnotationKind, Member};
use crate::{AccessorRole, IntrospectError, TriState};

// -----------------------------------------------------------------------------
// Introspector

/// The introspection contract shared by every metadata convention.
///
/// An introspector answers one question per serialization decision point.
/// It recognizes only the annotations of its own convention; for anything
/// else it returns the query's no-opinion value (`Unspecified`, `None`,
/// [`ConverterOverride::Absent`], `false`, or the caller's default) and
/// never guesses a default of its own. Defaulting belongs to the caller or
/// to an [`IntrospectorChain`](crate::IntrospectorChain).
///
/// Every provided method already returns the no-opinion value, so an
/// implementation only overrides the queries its convention can answer.
///
/// Implementations hold no mutable state, every query is a pure function
/// of its arguments and may run concurrently.
///
/// # Ordering
///
/// [`has_any_setter`](Self::has_any_setter) and
/// [`has_creator`](Self::has_creator) have no disabling form. Suppressing
/// such a member is done with the ignore annotation, so callers must consult
/// [`is_ignorable`](Self::is_ignorable) first and only ask the role query for
/// members that are not ignored. The helpers in [`scan`](crate::scan) follow
/// this order.
pub trait Introspector: Send + Sync + 'static {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    // -------------------------------------------------------------------------
    // General

    /// Returns `true` if `kind` belongs to this introspector's convention.
    ///
    /// Lets a caller skip unrelated annotations cheaply.
    fn is_handled(&self, kind: &AnnotationKind) -> bool {
        let _ = kind;
        false
    }

    /// Returns the serializer class to force-use for `element`.
    ///
    /// # Errors
    ///
    /// [`IntrospectError::InvalidConverter`] if the named class is not a
    /// serializer.
    fn find_serializer(
        &self,
        element: &dyn Annotated,
    ) -> Result<ConverterOverride, IntrospectError> {
        let _ = element;
        Ok(ConverterOverride::Absent)
    }

    /// Returns the deserializer class to force-use for `element`.
    ///
    /// # Errors
    ///
    /// [`IntrospectError::InvalidConverter`] if the named class is not a
    /// deserializer.
    fn find_deserializer(
        &self,
        element: &dyn Annotated,
    ) -> Result<ConverterOverride, IntrospectError> {
        let _ = element;
        Ok(ConverterOverride::Absent)
    }

    /// Returns whether `member` must be left out of the wire format.
    fn is_ignorable(&self, member: Member<'_>) -> TriState {
        let _ = member;
        TriState::Unspecified
    }

    // -------------------------------------------------------------------------
    // Class

    /// Returns whether getters of `class` are auto-detected.
    fn getter_auto_detection(&self, class: &AnnotatedClass) -> TriState {
        let _ = class;
        TriState::Unspecified
    }

    /// Returns whether setters of `class` are auto-detected.
    fn setter_auto_detection(&self, class: &AnnotatedClass) -> TriState {
        let _ = class;
        TriState::Unspecified
    }

    /// Returns whether creators of `class` are auto-detected.
    fn creator_auto_detection(&self, class: &AnnotatedClass) -> TriState {
        let _ = class;
        TriState::Unspecified
    }

    /// Returns whether properties of `element` whose value is null are left
    /// out of the output.
    ///
    /// `default` is returned unchanged when this convention says nothing.
    fn will_omit_nulls(&self, element: &dyn Annotated, default: bool) -> bool {
        let _ = element;
        default
    }

    // -------------------------------------------------------------------------
    // Members

    /// Returns the explicit property name of a getter or setter.
    ///
    /// `Some("")` means "use the natural name, but the method is explicitly
    /// annotated", which is distinct from `None`.
    fn property_name(&self, method: &AnnotatedMethod, role: AccessorRole) -> Option<String> {
        let _ = (method, role);
        None
    }

    /// Returns the explicit property name of a field, with the same empty
    /// string rule as [`property_name`](Self::property_name).
    fn field_property_name(&self, field: &AnnotatedField) -> Option<String> {
        let _ = field;
        None
    }

    /// Returns the name of the element wrapping a collection-valued member.
    fn wrapper_name(&self, member: Member<'_>) -> Option<String> {
        let _ = member;
        None
    }

    /// Returns the wire name of an enum constant.
    fn enum_value_name(&self, constant: &AnnotatedField) -> Option<String> {
        let _ = constant;
        None
    }

    /// Returns whether `method` produces the whole serialized value of its
    /// instance.
    ///
    /// An explicit `False` actively suppresses the role.
    fn has_as_value(&self, method: &AnnotatedMethod) -> TriState {
        let _ = method;
        TriState::Unspecified
    }

    /// Returns `true` if `method` receives every otherwise unknown property.
    ///
    /// See the ordering note on [`Introspector`].
    fn has_any_setter(&self, method: &AnnotatedMethod) -> bool {
        let _ = method;
        false
    }

    /// Returns `true` if `method` is a creator (a factory building instances).
    ///
    /// See the ordering note on [`Introspector`].
    fn has_creator(&self, method: &AnnotatedMethod) -> bool {
        let _ = method;
        false
    }
}

// -----------------------------------------------------------------------------
// Tests
