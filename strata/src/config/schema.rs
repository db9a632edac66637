//! Layer document schema.
//!
//! A layer document is either a bare sequence of layers or a mapping with a
//! `layers` sequence and optional `resolver` options:
//!
//! ```yaml
//! resolver:
//!   memoize: true
//! layers:
//!   - ignores: ['dist/**']
//!   - files: ['src/**/*.js']
//!     rules:
//!       no-undef: error
//! ```

use std::fmt;

use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::layer::Layer;

/// Name of the user-level data directory under the home directory.
pub const DATA_DIR_NAME: &str = ".strata";

/// File holding user-level layers inside the data directory.
pub const USER_LAYERS_FILE: &str = "layers.yaml";

/// Project layer files, checked in this order in each directory.
pub const PROJECT_FILES: [&str; 3] = ["strata.yaml", "strata.yml", "strata.json"];

/// Project-private layer file, read next to the project file.
pub const LOCAL_FILE: &str = "strata.local.yaml";

/// Options for the resolver built from the loaded layers.
///
/// # Examples
///
/// ```
/// use strata::config::ResolverOptions;
///
/// let options: ResolverOptions = serde_yaml::from_str("memoize: true").unwrap();
/// assert!(options.memoize_enabled());
/// assert!(!ResolverOptions::default().memoize_enabled());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverOptions {
    /// Cache resolution results per path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memoize: Option<bool>,
}

impl ResolverOptions {
    /// Whether memoization is on (off unless set).
    #[must_use]
    pub fn memoize_enabled(&self) -> bool {
        self.memoize.unwrap_or(false)
    }

    /// True when no option is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.memoize.is_none()
    }
}

/// One parsed layer document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayerDocument {
    /// Resolver options declared by the document.
    #[serde(skip_serializing_if = "ResolverOptions::is_empty")]
    pub resolver: ResolverOptions,

    /// Layers in declaration order.
    pub layers: Vec<Layer>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DocumentFields {
    #[serde(default)]
    resolver: ResolverOptions,
    #[serde(default)]
    layers: Vec<Layer>,
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = LayerDocument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence of layers or a mapping with a `layers` key")
    }

    fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let layers = Vec::<Layer>::deserialize(SeqAccessDeserializer::new(seq))?;
        Ok(LayerDocument {
            resolver: ResolverOptions::default(),
            layers,
        })
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let fields = DocumentFields::deserialize(MapAccessDeserializer::new(map))?;
        Ok(LayerDocument {
            resolver: fields.resolver,
            layers: fields.layers,
        })
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(LayerDocument::default())
    }
}

impl<'de> Deserialize<'de> for LayerDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DocumentVisitor)
    }
}
