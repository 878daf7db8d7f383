use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::native::NativeIntrospector;
use crate::xml_bind::XmlBindIntrospector;
use crate::{Introspector, IntrospectorChain};

// -----------------------------------------------------------------------------
// IntrospectorKind

/// The built-in introspectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntrospectorKind {
    /// [`NativeIntrospector`].
    Native,
    /// [`XmlBindIntrospector`].
    XmlBind,
}

impl IntrospectorKind {
    /// Creates the introspector of this kind.
    pub fn introspector(self) -> Box<dyn Introspector> {
        match self {
            Self::Native => Box::new(NativeIntrospector),
            Self::XmlBind => Box::new(XmlBindIntrospector),
        }
    }
}

impl fmt::Display for IntrospectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Native => "native",
            Self::XmlBind => "xml_bind",
        })
    }
}

// -----------------------------------------------------------------------------
// ChainConfig

/// Construction-time configuration of an [`IntrospectorChain`].
///
/// `introspectors` lists the conventions in priority order, highest first.
/// The default is the native convention alone.
///
/// # Examples
///
/// ```
/// use vc_introspect::{ChainConfig, IntrospectorChain, IntrospectorKind};
///
/// let config: ChainConfig = serde_json::from_str(
///     r#"{ "introspectors": ["xml_bind", "native"] }"#,
/// ).unwrap();
///
/// assert_eq!(config.introspectors, [IntrospectorKind::XmlBind, IntrospectorKind::Native]);
///
/// let chain = IntrospectorChain::from_config(&config);
/// assert_eq!(chain.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub introspectors: Vec<IntrospectorKind>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            introspectors: vec![IntrospectorKind::Native],
        }
    }
}

impl IntrospectorChain {
    /// Builds a chain from configuration.
    ///
    /// A kind listed more than once only takes its first (highest) position.
    pub fn from_config(config: &ChainConfig) -> Self {
        let mut seen: Vec<IntrospectorKind> = Vec::with_capacity(config.introspectors.len());
        for &kind in &config.introspectors {
            if seen.contains(&kind) {
                log::warn!("introspector `{kind}` is configured more than once, keeping the first");
            } else {
                seen.push(kind);
            }
        }
        log::trace!("building introspector chain {seen:?}");
        Self::new(seen.into_iter().map(IntrospectorKind::introspector).collect())
    }
}

impl Default for IntrospectorChain {
    /// See [`ChainConfig::default`].
    fn default() -> Self {
        Self::from_config(&ChainConfig::default())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{ChainConfig, IntrospectorKind};
    use crate::element::{AnnotatedField, Member};
    use crate::native::JsonIgnore;
    use crate::xml_bind::XmlTransient;
    use crate::{Introspector, IntrospectorChain, TriState};

    #[test]
    fn default_is_native_only() {
        let chain = IntrospectorChain::default();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.iter().next().map(|i| i.name()), Some("native"));

        let field = AnnotatedField::new("a").with(XmlTransient);
        assert_eq!(chain.is_ignorable(Member::Field(&field)), TriState::Unspecified);
    }

    #[test]
    fn parse_and_order() {
        let config: ChainConfig =
            serde_json::from_str(r#"{ "introspectors": ["xml_bind", "native"] }"#).unwrap();
        let chain = IntrospectorChain::from_config(&config);
        let names: alloc::vec::Vec<_> = chain.iter().map(|i| i.name()).collect();
        assert_eq!(names, ["xml_bind", "native"]);

        let field = AnnotatedField::new("a")
            .with(XmlTransient)
            .with(JsonIgnore(false));
        assert_eq!(chain.is_ignorable(Member::Field(&field)), TriState::True);
    }

    #[test]
    fn missing_list_uses_default() {
        let config: ChainConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ChainConfig::default());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result = serde_json::from_str::<ChainConfig>(r#"{ "introspectors": ["yaml"] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn duplicates_keep_first_position() {
        let config = ChainConfig {
            introspectors: alloc::vec![
                IntrospectorKind::Native,
                IntrospectorKind::XmlBind,
                IntrospectorKind::Native,
            ],
        };
        let chain = IntrospectorChain::from_config(&config);
        assert_eq!(chain.len(), 2);
        assert_eq!(IntrospectorKind::XmlBind.to_string(), "xml_bind");
    }
}
