use core::any::{Any, TypeId};
use core::fmt;

// -----------------------------------------------------------------------------
// Annotation

/// A declarative metadata value that can be attached to a program element.
///
/// Each annotation kind is a distinct Rust type, so an element carries at
/// most one value per kind. Conventions group their annotations by a shared
/// tag type, returned from [`Annotation::tag`]; an introspector uses the tag
/// to tell its own annotations apart from unrelated ones.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use vc_introspect::element::{Annotation, AnnotationKind};
///
/// struct MyTag;
///
/// #[derive(Debug)]
/// struct Rename(&'static str);
///
/// impl Annotation for Rename {
///     const NAME: &'static str = "Rename";
///
///     fn tag() -> Option<TypeId> {
///         Some(TypeId::of::<MyTag>())
///     }
/// }
///
/// let kind = AnnotationKind::of::<Rename>();
/// assert!(kind.is_tagged::<MyTag>());
/// assert_eq!(kind.name(), "Rename");
/// ```
pub trait Annotation: Any + Send + Sync + fmt::Debug {
    /// Short name used in diagnostics.
    const NAME: &'static str;

    /// The tag marker of the convention this annotation belongs to.
    ///
    /// Untagged annotations are never handled by any introspector.
    #[inline]
    fn tag() -> Option<TypeId> {
        None
    }
}

// -----------------------------------------------------------------------------
// AnnotationKind

/// Runtime descriptor of an [`Annotation`] type.
#[derive(Clone, Copy)]
pub struct AnnotationKind {
    id: TypeId,
    name: &'static str,
    tag: Option<TypeId>,
}

impl AnnotationKind {
    /// Returns the descriptor of annotation type `A`.
    #[inline]
    pub fn of<A: Annotation>() -> Self {
        Self {
            id: TypeId::of::<A>(),
            name: A::NAME,
            tag: A::tag(),
        }
    }

    /// Returns the [`TypeId`] of the annotation type.
    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the diagnostic name.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the convention tag, if any.
    #[inline(always)]
    pub const fn tag(&self) -> Option<TypeId> {
        self.tag
    }

    /// Returns `true` if the kind carries the tag `T`.
    #[inline]
    pub fn is_tagged<T: ?Sized + 'static>(&self) -> bool {
        self.tag == Some(TypeId::of::<T>())
    }

    /// Returns `true` if this descriptor is for annotation type `A`.
    #[inline]
    pub fn is<A: Annotation>(&self) -> bool {
        self.id == TypeId::of::<A>()
    }
}

impl PartialEq for AnnotationKind {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AnnotationKind {}

impl fmt::Debug for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnnotationKind").field(&self.name).finish()
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)
    }
}
