use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use foldhash::fast::FixedState;
use hashbrown::HashMap;

use super::{Annotation, AnnotationKind};

// -----------------------------------------------------------------------------
// DynAnnotation

trait DynAnnotation: Any + Send + Sync + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
}

impl<A: Annotation> DynAnnotation for A {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct Slot {
    kind: AnnotationKind,
    value: Box<dyn DynAnnotation>,
}

// -----------------------------------------------------------------------------
// Annotations

/// The annotations attached to one program element.
///
/// Annotations are stored by their [`TypeId`], so there can only be one
/// annotation per kind; later insertions of the same kind overwrite earlier
/// values. Looking up an absent kind is a normal answer, never an error.
///
/// # Example
///
/// ```
/// use vc_introspect::element::Annotations;
/// use vc_introspect::native::{JsonGetter, JsonIgnore};
///
/// let annotations = Annotations::new()
///     .with(JsonIgnore(false))
///     .with(JsonIgnore(true));
///
/// assert_eq!(annotations.len(), 1);
/// assert_eq!(annotations.get::<JsonIgnore>(), Some(&JsonIgnore(true)));
/// assert!(!annotations.contains::<JsonGetter>());
/// ```
#[derive(Default)]
pub struct Annotations {
    slots: HashMap<TypeId, Slot, FixedState>,
}

impl Annotations {
    /// Creates an empty [`Annotations`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an annotation, overwriting any previous value of the same kind.
    #[inline]
    pub fn with<A: Annotation>(mut self, annotation: A) -> Self {
        self.insert(annotation);
        self
    }

    /// Inserts an annotation, returning `true` if it replaced an old value.
    pub fn insert<A: Annotation>(&mut self, annotation: A) -> bool {
        let slot = Slot {
            kind: AnnotationKind::of::<A>(),
            value: Box::new(annotation),
        };
        self.slots.insert(TypeId::of::<A>(), slot).is_some()
    }

    /// Returns `true` if an annotation of kind `A` is present.
    #[inline]
    pub fn contains<A: Annotation>(&self) -> bool {
        self.contains_by_id(TypeId::of::<A>())
    }

    /// Returns `true` if an annotation with the given `TypeId` is present.
    #[inline]
    pub fn contains_by_id(&self, id: TypeId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Returns the annotation of kind `A`, if present.
    #[inline]
    pub fn get<A: Annotation>(&self) -> Option<&A> {
        self.slots
            .get(&TypeId::of::<A>())
            .and_then(|slot| slot.value.as_any().downcast_ref::<A>())
    }

    /// Returns an iterator over the kinds of the stored annotations.
    #[inline]
    pub fn kinds(&self) -> impl ExactSizeIterator<Item = &AnnotationKind> {
        self.slots.values().map(|slot| &slot.kind)
    }

    /// Returns the number of stored annotations.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no annotations are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl fmt::Debug for Annotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.slots.values().map(|slot| &slot.value))
            .finish()
    }
}
