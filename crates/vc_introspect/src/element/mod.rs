//! Program element handles and their annotations.
//!
//! ## Menu
//!
//! - [`Annotation`]: A trait implemented by every annotation kind.
//! - [`AnnotationKind`]: The runtime descriptor of an annotation kind.
//! - [`Annotations`]: The `TypeId`-keyed annotation set of one element.
//! - [`Annotated`]: Read-only access to an element's kind, name and annotations.
//! - Handles: [`AnnotatedClass`], [`AnnotatedField`], [`AnnotatedMethod`],
//!   [`AnnotatedConstructor`], and the borrowed [`Member`].

// -----------------------------------------------------------------------------
// Modules

mod annotated;
mod annotation;
mod annotations;

// -----------------------------------------------------------------------------
// Exports

pub use annotated::{Annotated, ElementKind, Member};
pub use annotated::{AnnotatedClass, AnnotatedConstructor, AnnotatedField, AnnotatedMethod};
pub use annotation::{Annotation, AnnotationKind};
pub use annotations::Annotations;
