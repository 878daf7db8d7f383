//! Annotation introspection for data binding.
//!
//! A serialization engine asks, for every class and member it binds,
//! questions such as "is this field ignored?", "what is this getter's
//! property name?" or "which serializer must be used here?". This crate
//! turns the declarative annotations attached to program elements into
//! normalized answers (directives) to those questions.
//!
//! ## Menu
//!
//! - [`element`]: Program element handles and their `TypeId`-keyed annotations.
//! - [`Introspector`]: The query contract every metadata convention implements.
//! - [`native`]: The native `Json*` convention and
//!   [`NativeIntrospector`](native::NativeIntrospector).
//! - [`xml_bind`]: The XML-binding `Xml*` convention and
//!   [`XmlBindIntrospector`](xml_bind::XmlBindIntrospector).
//! - [`IntrospectorChain`]: Combines introspectors by priority, first match wins.
//! - [`ChainConfig`]: Construction-time chain configuration.
//! - [`scan`]: Class-level scans over candidate methods.
//! - Answer types: [`TriState`], [`ConverterOverride`](converter::ConverterOverride),
//!   `Option<String>` names.
//!
//! ## No opinion
//!
//! Every query has a no-opinion answer that is distinct from every explicit
//! answer: [`TriState::Unspecified`] is not `False`, `None` is not `Some("")`,
//! and [`ConverterOverride::Absent`](converter::ConverterOverride::Absent) is
//! not [`ExplicitlyNone`](converter::ConverterOverride::ExplicitlyNone).
//! Introspectors never substitute a default for a missing annotation.
//!
//! ## Example
//!
//! ```
//! use vc_introspect::element::{AnnotatedClass, AnnotatedField, AnnotatedMethod, Member};
//! use vc_introspect::native::{JsonGetter, JsonIgnore, NativeIntrospector};
//! use vc_introspect::{AccessorRole, Introspector, IntrospectorChain, TriState};
//!
//! let class = AnnotatedClass::new("demo::Bean")
//!     .with_field(AnnotatedField::new("secret").with(JsonIgnore(true)))
//!     .with_method(AnnotatedMethod::new("get_value", 0).with(JsonGetter("foo".into())));
//!
//! let chain = IntrospectorChain::builder().push(NativeIntrospector).build();
//!
//! let field = class.field("secret").unwrap();
//! assert_eq!(chain.is_ignorable(Member::Field(field)), TriState::True);
//!
//! let getter = class.method("get_value").unwrap();
//! assert_eq!(chain.property_name(getter, AccessorRole::Getter).as_deref(), Some("foo"));
//! assert_eq!(chain.getter_auto_detection(&class), TriState::Unspecified);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support of dependencies.
//! - `debug` (default): in builds with `debug_assertions`, the chain reports
//!   discarded conflicting answers through the [`log`] facade.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod chain;
mod config;
mod error;
mod introspector;
mod roles;
mod tri_state;

pub mod converter;
pub mod element;
pub mod native;
pub mod scan;
pub mod xml_bind;

// -----------------------------------------------------------------------------
// Top-level exports

pub use chain::{ChainBuilder, IntrospectorChain};
pub use config::{ChainConfig, IntrospectorKind};
pub use error::IntrospectError;
pub use introspector::Introspector;
pub use roles::{AccessorRole, DetectRole, MethodRoles};
pub use tri_state::TriState;
