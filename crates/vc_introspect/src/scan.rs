//! Class-level scans over candidate members.
//!
//! Some questions are asked about a class but answered by one of its
//! methods, e.g. "which method produces the serialized value?". These
//! helpers scan [`AnnotatedClass::methods`] in declaration order and apply
//! two rules:
//!
//! - A method the ignore query marks [`TriState::True`] is skipped before
//!   its role is consulted. Role annotations without a disabling form rely
//!   on this.
//! - Single-valued roles (as-value, any-setter) must be unique among the
//!   remaining methods; a second match is a configuration error.

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::element::{Annotated, AnnotatedClass, AnnotatedMethod, Member};
use crate::{IntrospectError, Introspector, TriState};

fn candidates<'c>(
    class: &'c AnnotatedClass,
    introspector: &'c dyn Introspector,
) -> impl Iterator<Item = &'c AnnotatedMethod> {
    class.methods().iter().filter(move |method| {
        let ignored = introspector.is_ignorable(Member::Method(*method)) == TriState::True;
        if ignored {
            log::trace!("skipping ignored method `{}` of `{}`", method.name(), class.name());
        }
        !ignored
    })
}

fn find_unique<'c>(
    class: &'c AnnotatedClass,
    introspector: &'c dyn Introspector,
    annotation: &'static str,
    has_role: impl Fn(&AnnotatedMethod) -> bool,
) -> Result<Option<&'c AnnotatedMethod>, IntrospectError> {
    let mut found: Option<&AnnotatedMethod> = None;
    for method in candidates(class, introspector).filter(|m| has_role(*m)) {
        if let Some(first) = found {
            return Err(IntrospectError::DuplicateAnnotation {
                class: class.name().to_string(),
                annotation,
                first: first.name().to_string(),
                second: method.name().to_string(),
            });
        }
        found = Some(method);
    }
    Ok(found)
}

/// Returns the method producing the whole serialized value of `class`.
///
/// Only an explicit [`TriState::True`] from
/// [`has_as_value`](Introspector::has_as_value) selects a method.
///
/// # Errors
///
/// [`IntrospectError::DuplicateAnnotation`] if two methods qualify.
///
/// # Examples
///
/// ```
/// use vc_introspect::element::{AnnotatedClass, AnnotatedMethod};
/// use vc_introspect::native::{JsonIgnore, JsonValue, NativeIntrospector};
/// use vc_introspect::scan;
///
/// let class = AnnotatedClass::new("demo::Token")
///     .with_method(AnnotatedMethod::new("raw", 0).with(JsonValue(true)).with(JsonIgnore(true)))
///     .with_method(AnnotatedMethod::new("as_str", 0).with(JsonValue(true)));
///
/// let method = scan::find_as_value_method(&class, &NativeIntrospector).unwrap();
/// assert_eq!(method.map(|m| m.param_count()), Some(0));
/// ```
pub fn find_as_value_method<'c>(
    class: &'c AnnotatedClass,
    introspector: &'c dyn Introspector,
) -> Result<Option<&'c AnnotatedMethod>, IntrospectError> {
    find_unique(class, introspector, "as-value", |method| {
        introspector.has_as_value(method) == TriState::True
    })
}

/// Returns the method receiving every unknown property of `class`.
///
/// # Errors
///
/// [`IntrospectError::DuplicateAnnotation`] if two methods qualify.
pub fn find_any_setter<'c>(
    class: &'c AnnotatedClass,
    introspector: &'c dyn Introspector,
) -> Result<Option<&'c AnnotatedMethod>, IntrospectError> {
    find_unique(class, introspector, "any-setter", |method| {
        introspector.has_any_setter(method)
    })
}

/// Returns the creator methods of `class` in declaration order.
pub fn find_creators<'c>(
    class: &'c AnnotatedClass,
    introspector: &'c dyn Introspector,
) -> Vec<&'c AnnotatedMethod> {
    candidates(class, introspector)
        .filter(|method| introspector.has_creator(method))
        .collect()
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;
    use crate::converter::ConverterOverride;
    use crate::element::AnnotatedField;
    use crate::native::{
        JsonAnySetter, JsonCreator, JsonGetter, JsonIgnore, JsonValue, NativeIntrospector,
    };
    use crate::xml_bind::{XmlBindIntrospector, XmlTransient, XmlValue};
    use crate::{AccessorRole, IntrospectorChain};

    #[test]
    fn as_value_skips_disabled_and_ignored() {
        let class = AnnotatedClass::new("demo::Id")
            .with_method(AnnotatedMethod::new("a", 0).with(JsonValue(false)))
            .with_method(AnnotatedMethod::new("b", 0).with(JsonValue(true)).with(JsonIgnore(true)))
            .with_method(AnnotatedMethod::new("c", 0).with(JsonValue(true)));

        let found = find_as_value_method(&class, &NativeIntrospector).unwrap();
        assert_eq!(found.map(|m| m.name()), Some("c"));

        let plain = AnnotatedClass::new("demo::Plain").with_method(AnnotatedMethod::new("a", 0));
        assert!(find_as_value_method(&plain, &NativeIntrospector).unwrap().is_none());
    }

    #[test]
    fn duplicate_as_value_is_an_error() {
        let class = AnnotatedClass::new("demo::Id")
            .with_method(AnnotatedMethod::new("first", 0).with(JsonValue(true)))
            .with_method(AnnotatedMethod::new("second", 0).with(JsonValue(true)));

        let err = find_as_value_method(&class, &NativeIntrospector).unwrap_err();
        assert_eq!(
            err,
            IntrospectError::DuplicateAnnotation {
                class: "demo::Id".into(),
                annotation: "as-value",
                first: "first".into(),
                second: "second".into(),
            }
        );
    }

    #[test]
    fn any_setter_respects_ignore() {
        let class = AnnotatedClass::new("demo::Bag")
            .with_method(
                AnnotatedMethod::new("put_old", 2)
                    .with(JsonAnySetter)
                    .with(JsonIgnore(true)),
            )
            .with_method(AnnotatedMethod::new("put", 2).with(JsonAnySetter));

        let found = find_any_setter(&class, &NativeIntrospector).unwrap();
        assert_eq!(found.map(|m| m.name()), Some("put"));

        let twice = AnnotatedClass::new("demo::Bag")
            .with_method(AnnotatedMethod::new("put_a", 2).with(JsonAnySetter))
            .with_method(AnnotatedMethod::new("put_b", 2).with(JsonAnySetter));
        assert!(find_any_setter(&twice, &NativeIntrospector).is_err());
    }

    #[test]
    fn creators_in_declaration_order() {
        let class = AnnotatedClass::new("demo::Point")
            .with_method(AnnotatedMethod::new("from_polar", 2).with(JsonCreator))
            .with_method(AnnotatedMethod::new("len", 0))
            .with_method(
                AnnotatedMethod::new("from_legacy", 1)
                    .with(JsonCreator)
                    .with(JsonIgnore(true)),
            )
            .with_method(AnnotatedMethod::new("from_xy", 2).with(JsonCreator));

        let names: Vec<_> = find_creators(&class, &NativeIntrospector)
            .into_iter()
            .map(|m| m.name())
            .collect();
        assert_eq!(names, ["from_polar", "from_xy"]);
    }

    #[test]
    fn ignore_from_another_convention_applies() {
        let chain = IntrospectorChain::pair(NativeIntrospector, XmlBindIntrospector);
        let class = AnnotatedClass::new("demo::Text")
            .with_method(AnnotatedMethod::new("raw", 0).with(XmlValue).with(XmlTransient))
            .with_method(AnnotatedMethod::new("text", 0).with(XmlValue));

        let found = find_as_value_method(&class, &chain).unwrap();
        assert_eq!(found.map(|m| m.name()), Some("text"));
    }

    #[test]
    fn one_field_one_getter_end_to_end() {
        let chain = IntrospectorChain::builder().push(NativeIntrospector).build();
        let class = AnnotatedClass::new("demo::Bean")
            .with_field(AnnotatedField::new("hidden").with(JsonIgnore(true)))
            .with_method(AnnotatedMethod::new("get_value", 0).with(JsonGetter("foo".into())));

        let field = class.field("hidden").unwrap();
        let getter = class.method("get_value").unwrap();

        // The field.
        assert_eq!(chain.is_ignorable(Member::Field(field)), TriState::True);
        assert_eq!(chain.find_serializer(field), Ok(ConverterOverride::Absent));
        assert_eq!(chain.find_deserializer(field), Ok(ConverterOverride::Absent));
        assert_eq!(chain.field_property_name(field), None);
        assert_eq!(chain.wrapper_name(Member::Field(field)), None);
        assert_eq!(chain.enum_value_name(field), None);
        assert!(chain.will_omit_nulls(field, true));

        // The getter.
        assert_eq!(
            chain.property_name(getter, AccessorRole::Getter),
            Some(String::from("foo"))
        );
        assert_eq!(chain.property_name(getter, AccessorRole::Setter), None);
        assert_eq!(chain.is_ignorable(Member::Method(getter)), TriState::Unspecified);
        assert_eq!(chain.find_serializer(getter), Ok(ConverterOverride::Absent));
        assert_eq!(chain.find_deserializer(getter), Ok(ConverterOverride::Absent));
        assert_eq!(chain.has_as_value(getter), TriState::Unspecified);
        assert!(!chain.has_any_setter(getter));
        assert!(!chain.has_creator(getter));
        assert!(!chain.will_omit_nulls(getter, false));

        // The class itself.
        assert_eq!(chain.getter_auto_detection(&class), TriState::Unspecified);
        assert_eq!(chain.setter_auto_detection(&class), TriState::Unspecified);
        assert_eq!(chain.creator_auto_detection(&class), TriState::Unspecified);
        assert!(matches!(find_as_value_method(&class, &chain), Ok(None)));
        assert!(find_creators(&class, &chain).is_empty());
    }
}
