use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::converter::ConverterOverride;
use crate::element::{Annotated, AnnotatedClass, AnnotatedField, AnnotatedMethod};
use crate::element::{AnnotationKind, Member};
use crate::{AccessorRole, IntrospectError, Introspector, TriState};

// -----------------------------------------------------------------------------
// IntrospectorChain

/// An ordered composition of introspectors acting as one.
///
/// For every query the introspectors are consulted in priority order
/// (first = highest) and the first answer that is not the query's no-opinion
/// value wins. If every introspector has no opinion, neither does the chain.
///
/// Introspectors are expected to cover disjoint conventions, but overlap is
/// resolved deterministically: when two introspectors give conflicting
/// explicit answers, the higher-priority one wins and the other answer is
/// discarded without error. With the `debug` feature in debug builds the
/// discarded answers are reported through [`log::debug!`].
///
/// Per answer domain:
///
/// - [`TriState`]: the first specified value.
/// - Names: the first `Some`, including `Some("")`.
/// - [`ConverterOverride`]: the first value other than `Absent`.
///   `ExplicitlyNone` suppresses lower-priority overrides, and an error
///   met before any opinion is returned immediately.
/// - Queries answered with a plain `bool` (`is_handled`, `has_any_setter`,
///   `has_creator`): `true` is the only opinion, so the chain answers `true`
///   if any introspector does.
/// - [`will_omit_nulls`](Introspector::will_omit_nulls): the caller's default
///   is passed from the lowest to the highest priority introspector, so the
///   highest one with an annotation decides.
///
/// The provider list is fixed at construction. A chain is itself an
/// [`Introspector`], so chains can be nested.
///
/// # Examples
///
/// ```
/// use vc_introspect::element::{AnnotatedField, Member};
/// use vc_introspect::native::{JsonIgnore, NativeIntrospector};
/// use vc_introspect::xml_bind::{XmlBindIntrospector, XmlTransient};
/// use vc_introspect::{Introspector, IntrospectorChain, TriState};
///
/// let chain = IntrospectorChain::pair(NativeIntrospector, XmlBindIntrospector);
///
/// // Explicitly kept by the native convention, transient for XML binding.
/// let field = AnnotatedField::new("id")
///     .with(JsonIgnore(false))
///     .with(XmlTransient);
///
/// assert_eq!(chain.is_ignorable(Member::Field(&field)), TriState::False);
/// ```
pub struct IntrospectorChain {
    introspectors: Box<[Box<dyn Introspector>]>,
}

impl IntrospectorChain {
    /// Creates a chain from introspectors in priority order.
    pub fn new(introspectors: Vec<Box<dyn Introspector>>) -> Self {
        Self {
            introspectors: introspectors.into_boxed_slice(),
        }
    }

    /// Creates a two-element chain, `primary` first.
    pub fn pair(primary: impl Introspector, secondary: impl Introspector) -> Self {
        Self::builder().push(primary).push(secondary).build()
    }

    /// Returns a builder appending introspectors in decreasing priority.
    #[inline]
    pub fn builder() -> ChainBuilder {
        ChainBuilder::default()
    }

    /// Returns the number of introspectors.
    #[inline]
    pub fn len(&self) -> usize {
        self.introspectors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.introspectors.is_empty()
    }

    /// Iterates over the introspectors, highest priority first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &dyn Introspector> {
        self.introspectors.iter().map(|introspector| &**introspector)
    }

    fn first_match<T: PartialEq + fmt::Debug>(
        &self,
        query: &'static str,
        element: &str,
        no_opinion: T,
        is_opinion: impl Fn(&T) -> bool,
        answer: impl Fn(&dyn Introspector) -> T,
    ) -> T {
        for (index, introspector) in self.introspectors.iter().enumerate() {
            let value = answer(&**introspector);
            if is_opinion(&value) {
                if cfg!(all(debug_assertions, feature = "debug")) {
                    self.report_discarded(query, element, index, &value, &is_opinion, &answer);
                }
                return value;
            }
        }
        no_opinion
    }

    #[cold]
    fn report_discarded<T: PartialEq + fmt::Debug>(
        &self,
        query: &'static str,
        element: &str,
        winner: usize,
        value: &T,
        is_opinion: &impl Fn(&T) -> bool,
        answer: &impl Fn(&dyn Introspector) -> T,
    ) {
        let winner_name = self.introspectors[winner].name();
        for introspector in &self.introspectors[winner + 1..] {
            let other = answer(&**introspector);
            if is_opinion(&other) && other != *value {
                log::debug!(
                    "{query} on `{element}`: `{winner_name}` answered {value:?}, \
                     discarding {other:?} from `{}`",
                    introspector.name(),
                );
            }
        }
    }

    fn first_tri_state(
        &self,
        query: &'static str,
        element: &str,
        answer: impl Fn(&dyn Introspector) -> TriState,
    ) -> TriState {
        self.first_match(query, element, TriState::Unspecified, |v| v.is_specified(), answer)
    }

    fn first_name(
        &self,
        query: &'static str,
        element: &str,
        answer: impl Fn(&dyn Introspector) -> Option<String>,
    ) -> Option<String> {
        self.first_match(query, element, None, Option::is_some, answer)
    }

    fn first_override(
        &self,
        query: &'static str,
        element: &str,
        answer: impl Fn(&dyn Introspector) -> Result<ConverterOverride, IntrospectError>,
    ) -> Result<ConverterOverride, IntrospectError> {
        self.first_match(
            query,
            element,
            Ok(ConverterOverride::Absent),
            |v| !matches!(v, Ok(ConverterOverride::Absent)),
            answer,
        )
    }
}

impl Introspector for IntrospectorChain {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn is_handled(&self, kind: &AnnotationKind) -> bool {
        self.iter().any(|i| i.is_handled(kind))
    }

    fn find_serializer(
        &self,
        element: &dyn Annotated,
    ) -> Result<ConverterOverride, IntrospectError> {
        self.first_override("find_serializer", element.name(), |i| i.find_serializer(element))
    }

    fn find_deserializer(
        &self,
        element: &dyn Annotated,
    ) -> Result<ConverterOverride, IntrospectError> {
        self.first_override("find_deserializer", element.name(), |i| i.find_deserializer(element))
    }

    fn is_ignorable(&self, member: Member<'_>) -> TriState {
        self.first_tri_state("is_ignorable", member.name(), |i| i.is_ignorable(member))
    }

    fn getter_auto_detection(&self, class: &AnnotatedClass) -> TriState {
        self.first_tri_state("getter_auto_detection", class.name(), |i| {
            i.getter_auto_detection(class)
        })
    }

    fn setter_auto_detection(&self, class: &AnnotatedClass) -> TriState {
        self.first_tri_state("setter_auto_detection", class.name(), |i| {
            i.setter_auto_detection(class)
        })
    }

    fn creator_auto_detection(&self, class: &AnnotatedClass) -> TriState {
        self.first_tri_state("creator_auto_detection", class.name(), |i| {
            i.creator_auto_detection(class)
        })
    }

    fn will_omit_nulls(&self, element: &dyn Annotated, default: bool) -> bool {
        self.introspectors
            .iter()
            .rev()
            .fold(default, |acc, i| i.will_omit_nulls(element, acc))
    }

    fn property_name(&self, method: &AnnotatedMethod, role: AccessorRole) -> Option<String> {
        self.first_name("property_name", method.name(), |i| i.property_name(method, role))
    }

    fn field_property_name(&self, field: &AnnotatedField) -> Option<String> {
        self.first_name("field_property_name", field.name(), |i| i.field_property_name(field))
    }

    fn wrapper_name(&self, member: Member<'_>) -> Option<String> {
        self.first_name("wrapper_name", member.name(), |i| i.wrapper_name(member))
    }

    fn enum_value_name(&self, constant: &AnnotatedField) -> Option<String> {
        self.first_name("enum_value_name", constant.name(), |i| i.enum_value_name(constant))
    }

    fn has_as_value(&self, method: &AnnotatedMethod) -> TriState {
        self.first_tri_state("has_as_value", method.name(), |i| i.has_as_value(method))
    }

    fn has_any_setter(&self, method: &AnnotatedMethod) -> bool {
        self.iter().any(|i| i.has_any_setter(method))
    }

    fn has_creator(&self, method: &AnnotatedMethod) -> bool {
        self.iter().any(|i| i.has_creator(method))
    }
}

impl fmt::Debug for IntrospectorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|i| i.name())).finish()
    }
}

// -----------------------------------------------------------------------------
// ChainBuilder

/// Collects introspectors for an [`IntrospectorChain`].
///
/// Each [`push`](Self::push) appends an introspector with lower priority
/// than every introspector pushed before it.
#[derive(Default)]
pub struct ChainBuilder {
    introspectors: Vec<Box<dyn Introspector>>,
}

impl ChainBuilder {
    #[inline]
    pub fn push(self, introspector: impl Introspector) -> Self {
        self.push_boxed(Box::new(introspector))
    }

    #[inline]
    pub fn push_boxed(mut self, introspector: Box<dyn Introspector>) -> Self {
        self.introspectors.push(introspector);
        self
    }

    #[inline]
    pub fn build(self) -> IntrospectorChain {
        IntrospectorChain::new(self.introspectors)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;

    use super::*;
    use crate::converter::{Capabilities, ClassRef, ClassValue, Converter};
    use crate::native::{
        JsonGetter, JsonIgnore, JsonUseSerializer, JsonWriteNullProperties, NativeIntrospector,
    };
    use crate::xml_bind::{XmlBindIntrospector, XmlElement, XmlTransient, XmlTypeAdapter};

    /// Gives the same answer to every tri-state and name query.
    struct Fixed {
        name: &'static str,
        flag: TriState,
        label: Option<&'static str>,
    }

    impl Introspector for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn is_ignorable(&self, _: Member<'_>) -> TriState {
            self.flag
        }

        fn getter_auto_detection(&self, _: &AnnotatedClass) -> TriState {
            self.flag
        }

        fn has_as_value(&self, _: &AnnotatedMethod) -> TriState {
            self.flag
        }

        fn property_name(&self, _: &AnnotatedMethod, _: AccessorRole) -> Option<String> {
            self.label.map(ToString::to_string)
        }
    }

    fn fixed(name: &'static str, flag: TriState, label: Option<&'static str>) -> Fixed {
        Fixed { name, flag, label }
    }

    struct Ser;

    impl Converter for Ser {
        const CAPABILITIES: Capabilities = Capabilities::SERIALIZER;
    }

    struct Adapter;

    impl Converter for Adapter {
        const CAPABILITIES: Capabilities = Capabilities::ADAPTER;
    }

    #[test]
    fn higher_priority_false_beats_lower_true() {
        let chain = IntrospectorChain::pair(
            fixed("high", TriState::False, None),
            fixed("low", TriState::True, None),
        );
        let field = AnnotatedField::new("a");
        let class = AnnotatedClass::new("demo::A");

        assert_eq!(chain.is_ignorable(Member::Field(&field)), TriState::False);
        assert_eq!(chain.getter_auto_detection(&class), TriState::False);

        let reversed = IntrospectorChain::pair(
            fixed("low", TriState::True, None),
            fixed("high", TriState::False, None),
        );
        assert_eq!(reversed.is_ignorable(Member::Field(&field)), TriState::True);
    }

    #[test]
    fn unspecified_falls_through() {
        let chain = IntrospectorChain::builder()
            .push(fixed("silent", TriState::Unspecified, None))
            .push(fixed("loud", TriState::True, Some("b")))
            .build();
        let method = AnnotatedMethod::new("get_a", 0);

        assert_eq!(chain.has_as_value(&method), TriState::True);
        assert_eq!(
            chain.property_name(&method, AccessorRole::Getter).as_deref(),
            Some("b")
        );
    }

    #[test]
    fn empty_name_is_an_opinion() {
        let chain = IntrospectorChain::pair(
            fixed("high", TriState::Unspecified, Some("")),
            fixed("low", TriState::Unspecified, Some("other")),
        );
        let method = AnnotatedMethod::new("get_a", 0);
        assert_eq!(
            chain.property_name(&method, AccessorRole::Setter),
            Some(String::new())
        );
    }

    #[test]
    fn all_silent_is_no_opinion() {
        let chain = IntrospectorChain::pair(NativeIntrospector, XmlBindIntrospector);
        let class = AnnotatedClass::new("demo::A");
        let field = AnnotatedField::new("a");
        let method = AnnotatedMethod::new("get_a", 0);

        assert_eq!(chain.find_serializer(&field), Ok(ConverterOverride::Absent));
        assert_eq!(chain.is_ignorable(Member::Field(&field)), TriState::Unspecified);
        assert_eq!(chain.creator_auto_detection(&class), TriState::Unspecified);
        assert_eq!(chain.property_name(&method, AccessorRole::Getter), None);
        assert_eq!(chain.has_as_value(&method), TriState::Unspecified);
        assert!(!chain.has_any_setter(&method));
        assert!(chain.will_omit_nulls(&class, true));

        let empty = IntrospectorChain::new(vec![]);
        assert!(empty.is_empty());
        assert_eq!(empty.is_ignorable(Member::Field(&field)), TriState::Unspecified);
        assert!(!empty.will_omit_nulls(&class, false));
    }

    #[test]
    fn conventions_combine() {
        let chain = IntrospectorChain::pair(NativeIntrospector, XmlBindIntrospector);
        let transient = AnnotatedField::new("cache").with(XmlTransient);
        let named = AnnotatedMethod::new("get_body", 0).with(XmlElement::named("body"));

        assert_eq!(chain.is_ignorable(Member::Field(&transient)), TriState::True);
        assert_eq!(
            chain.property_name(&named, AccessorRole::Getter).as_deref(),
            Some("body")
        );

        let both = AnnotatedMethod::new("get_body", 0)
            .with(XmlElement::named("body"))
            .with(JsonGetter("content".into()));
        assert_eq!(
            chain.property_name(&both, AccessorRole::Getter).as_deref(),
            Some("content")
        );
        assert!(chain.is_handled(&AnnotationKind::of::<XmlTransient>()));
        assert!(chain.is_handled(&AnnotationKind::of::<JsonIgnore>()));
    }

    #[test]
    fn explicit_none_suppresses_lower_override() {
        let chain = IntrospectorChain::pair(NativeIntrospector, XmlBindIntrospector);
        let field = AnnotatedField::new("when")
            .with(JsonUseSerializer(ClassValue::NoClass))
            .with(XmlTypeAdapter(ClassValue::of::<Adapter>()));
        assert_eq!(chain.find_serializer(&field), Ok(ConverterOverride::ExplicitlyNone));

        let field = AnnotatedField::new("when").with(XmlTypeAdapter(ClassValue::of::<Adapter>()));
        assert_eq!(
            chain.find_serializer(&field),
            Ok(ConverterOverride::Present(ClassRef::of::<Adapter>()))
        );
    }

    #[test]
    fn override_errors_propagate() {
        let chain = IntrospectorChain::pair(NativeIntrospector, XmlBindIntrospector);

        // The lower-priority introspector rejects its class.
        let field = AnnotatedField::new("when").with(XmlTypeAdapter(ClassValue::of::<Ser>()));
        let err = chain.find_deserializer(&field).unwrap_err();
        assert!(matches!(
            err,
            IntrospectError::InvalidConverter { annotation: "XmlTypeAdapter", .. }
        ));

        // An opinion found earlier shadows a broken lower-priority annotation.
        let field = AnnotatedField::new("when")
            .with(JsonUseSerializer(ClassValue::of::<Ser>()))
            .with(XmlTypeAdapter(ClassValue::of::<Ser>()));
        assert_eq!(
            chain.find_serializer(&field),
            Ok(ConverterOverride::Present(ClassRef::of::<Ser>()))
        );
    }

    #[test]
    fn omit_nulls_prefers_higher_priority() {
        let chain = IntrospectorChain::pair(NativeIntrospector, XmlBindIntrospector);
        let method = AnnotatedMethod::new("get_a", 0)
            .with(JsonWriteNullProperties(false))
            .with(XmlElement {
                name: "a".into(),
                nillable: true,
            });
        assert!(chain.will_omit_nulls(&method, false));

        let xml_only = AnnotatedMethod::new("get_b", 0).with(XmlElement {
            name: "b".into(),
            nillable: true,
        });
        assert!(!chain.will_omit_nulls(&xml_only, true));
    }

    #[test]
    fn chains_nest() {
        let inner = IntrospectorChain::pair(
            fixed("a", TriState::Unspecified, None),
            fixed("b", TriState::False, None),
        );
        let outer = IntrospectorChain::pair(inner, fixed("c", TriState::True, None));
        let field = AnnotatedField::new("x");

        assert_eq!(outer.len(), 2);
        assert_eq!(outer.is_ignorable(Member::Field(&field)), TriState::False);
        assert_eq!(
            alloc::format!("{outer:?}"),
            r#"["chain", "c"]"#
        );
    }

    #[test]
    fn queries_are_idempotent() {
        let chain = IntrospectorChain::pair(NativeIntrospector, XmlBindIntrospector);
        let method = AnnotatedMethod::new("get_a", 0).with(JsonIgnore(true));

        let first = chain.is_ignorable(Member::Method(&method));
        for _ in 0..3 {
            assert_eq!(chain.is_ignorable(Member::Method(&method)), first);
        }
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn shareable_across_threads() {
        assert_send_sync::<IntrospectorChain>();
        assert_send_sync::<NativeIntrospector>();
        assert_send_sync::<XmlBindIntrospector>();
        assert_send_sync::<AnnotatedClass>();
    }

    #[cfg(feature = "std")]
    #[test]
    fn concurrent_queries_agree() {
        let chain = IntrospectorChain::pair(NativeIntrospector, XmlBindIntrospector);
        let class = AnnotatedClass::new("demo::Bean")
            .with_field(AnnotatedField::new("cache").with(XmlTransient))
            .with_method(AnnotatedMethod::new("get_value", 0).with(JsonGetter("foo".into())));

        let answers: Vec<_> = std::thread::scope(|s| {
            let workers: Vec<_> = (0..4)
                .map(|_| {
                    s.spawn(|| {
                        let field = class.field("cache").map(Member::Field);
                        let getter = class.method("get_value");
                        (
                            field.map(|f| chain.is_ignorable(f)),
                            getter.and_then(|m| chain.property_name(m, AccessorRole::Getter)),
                        )
                    })
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });

        for answer in answers {
            assert_eq!(answer, (Some(TriState::True), Some("foo".to_string())));
        }
    }
}
