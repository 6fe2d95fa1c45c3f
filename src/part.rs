//! Part identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of one mascot component, e.g. `head` or `left-arm`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(transparent)]
pub struct PartName(String);

impl PartName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name with dashes replaced by underscores, as used in asset paths.
    ///
    /// `right-arm` becomes `right_arm`.
    pub fn asset_stem(&self) -> String {
        self.0.replace('-', "_")
    }
}

impl fmt::Display for PartName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PartName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PartName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for PartName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
