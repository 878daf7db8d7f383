use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::fmt;

use super::{Annotation, Annotations};

// -----------------------------------------------------------------------------
// ElementKind

/// The kind of a program element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Class,
    Field,
    Method,
    Constructor,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Class => "class",
            Self::Field => "field",
            Self::Method => "method",
            Self::Constructor => "constructor",
        })
    }
}

// -----------------------------------------------------------------------------
// Annotated

/// Read-only access to the annotations of a program element.
///
/// Implementations must be side-effect free: asking the same element twice
/// yields the same annotations. Introspectors only borrow an element for the
/// duration of a single query.
pub trait Annotated {
    /// Returns the element kind.
    fn kind(&self) -> ElementKind;

    /// Returns the element's natural name, e.g. a field or method name,
    /// or the type path of a class.
    fn name(&self) -> &str;

    /// Returns the annotations attached to this element.
    fn annotations(&self) -> &Annotations;
}

macro_rules! impl_annotated {
    ($ty:ty, $kind:ident, $name:ident) => {
        impl Annotated for $ty {
            #[inline]
            fn kind(&self) -> ElementKind {
                ElementKind::$kind
            }

            #[inline]
            fn name(&self) -> &str {
                &self.$name
            }

            #[inline]
            fn annotations(&self) -> &Annotations {
                &self.annotations
            }
        }

        impl $ty {
            /// Adds an annotation to this element.
            #[inline]
            pub fn with<A: Annotation>(mut self, annotation: A) -> Self {
                self.annotations.insert(annotation);
                self
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Members

/// A field handle.
#[derive(Debug)]
pub struct AnnotatedField {
    name: Cow<'static, str>,
    annotations: Annotations,
}

impl AnnotatedField {
    /// Creates an unannotated field.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            annotations: Annotations::new(),
        }
    }
}

/// A method handle.
///
/// Getter-like methods take no parameters, setter-like methods take one.
#[derive(Debug)]
pub struct AnnotatedMethod {
    name: Cow<'static, str>,
    param_count: usize,
    annotations: Annotations,
}

impl AnnotatedMethod {
    /// Creates an unannotated method.
    pub fn new(name: impl Into<Cow<'static, str>>, param_count: usize) -> Self {
        Self {
            name: name.into(),
            param_count,
            annotations: Annotations::new(),
        }
    }

    /// Returns the number of parameters, excluding the receiver.
    #[inline]
    pub const fn param_count(&self) -> usize {
        self.param_count
    }
}

/// A constructor handle.
#[derive(Debug)]
pub struct AnnotatedConstructor {
    name: Cow<'static, str>,
    param_count: usize,
    annotations: Annotations,
}

impl AnnotatedConstructor {
    /// Creates an unannotated constructor.
    pub fn new(name: impl Into<Cow<'static, str>>, param_count: usize) -> Self {
        Self {
            name: name.into(),
            param_count,
            annotations: Annotations::new(),
        }
    }

    /// Returns the number of parameters.
    #[inline]
    pub const fn param_count(&self) -> usize {
        self.param_count
    }
}

impl_annotated!(AnnotatedField, Field, name);
impl_annotated!(AnnotatedMethod, Method, name);
impl_annotated!(AnnotatedConstructor, Constructor, name);

// -----------------------------------------------------------------------------
// Member

/// A borrowed handle to a field, method or constructor.
#[derive(Debug, Clone, Copy)]
pub enum Member<'a> {
    Field(&'a AnnotatedField),
    Method(&'a AnnotatedMethod),
    Constructor(&'a AnnotatedConstructor),
}

impl Member<'_> {
    #[inline]
    fn as_annotated(&self) -> &dyn Annotated {
        match *self {
            Member::Field(field) => field,
            Member::Method(method) => method,
            Member::Constructor(ctor) => ctor,
        }
    }
}

impl Annotated for Member<'_> {
    #[inline]
    fn kind(&self) -> ElementKind {
        self.as_annotated().kind()
    }

    #[inline]
    fn name(&self) -> &str {
        self.as_annotated().name()
    }

    #[inline]
    fn annotations(&self) -> &Annotations {
        self.as_annotated().annotations()
    }
}

impl<'a> From<&'a AnnotatedField> for Member<'a> {
    #[inline]
    fn from(value: &'a AnnotatedField) -> Self {
        Member::Field(value)
    }
}

impl<'a> From<&'a AnnotatedMethod> for Member<'a> {
    #[inline]
    fn from(value: &'a AnnotatedMethod) -> Self {
        Member::Method(value)
    }
}

impl<'a> From<&'a AnnotatedConstructor> for Member<'a> {
    #[inline]
    fn from(value: &'a AnnotatedConstructor) -> Self {
        Member::Constructor(value)
    }
}

// -----------------------------------------------------------------------------
// AnnotatedClass

/// A class handle, owning its annotated members in declaration order.
///
/// # Example
///
/// ```
/// use vc_introspect::element::{Annotated, AnnotatedClass, AnnotatedField, AnnotatedMethod};
/// use vc_introspect::native::{JsonGetter, JsonIgnore};
///
/// let class = AnnotatedClass::new("demo::Point")
///     .with_field(AnnotatedField::new("x").with(JsonIgnore(true)))
///     .with_method(AnnotatedMethod::new("get_y", 0).with(JsonGetter("y".into())));
///
/// assert_eq!(class.name(), "demo::Point");
/// assert!(class.field("x").is_some());
/// assert_eq!(class.members().count(), 2);
/// ```
#[derive(Debug)]
pub struct AnnotatedClass {
    type_path: Cow<'static, str>,
    annotations: Annotations,
    fields: Vec<AnnotatedField>,
    constructors: Vec<AnnotatedConstructor>,
    methods: Vec<AnnotatedMethod>,
}

impl AnnotatedClass {
    /// Creates an unannotated class without members.
    pub fn new(type_path: impl Into<Cow<'static, str>>) -> Self {
        Self {
            type_path: type_path.into(),
            annotations: Annotations::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Appends a field.
    #[inline]
    pub fn with_field(mut self, field: AnnotatedField) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a constructor.
    #[inline]
    pub fn with_constructor(mut self, ctor: AnnotatedConstructor) -> Self {
        self.constructors.push(ctor);
        self
    }

    /// Appends a method.
    #[inline]
    pub fn with_method(mut self, method: AnnotatedMethod) -> Self {
        self.methods.push(method);
        self
    }

    #[inline]
    pub fn fields(&self) -> &[AnnotatedField] {
        &self.fields
    }

    #[inline]
    pub fn constructors(&self) -> &[AnnotatedConstructor] {
        &self.constructors
    }

    #[inline]
    pub fn methods(&self) -> &[AnnotatedMethod] {
        &self.methods
    }

    /// Returns the first field named `name`.
    pub fn field(&self, name: &str) -> Option<&AnnotatedField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Returns the first method named `name`.
    pub fn method(&self, name: &str) -> Option<&AnnotatedMethod> {
        self.methods.iter().find(|m| m.name() == name)
    }

    /// Iterates over all members: fields, then constructors, then methods,
    /// each group in declaration order.
    pub fn members(&self) -> impl Iterator<Item = Member<'_>> {
        self.fields
            .iter()
            .map(Member::Field)
            .chain(self.constructors.iter().map(Member::Constructor))
            .chain(self.methods.iter().map(Member::Method))
    }
}

impl_annotated!(AnnotatedClass, Class, type_path);
