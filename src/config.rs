//! Mascot configuration.
//!
//! A [`MascotConfig`] lists the known parts and how many variants each one
//! has. It is fixed when a [`Mascot`](crate::Mascot) is built.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "parts": [
//!     { "name": "head", "maxVariant": 15 },
//!     { "name": "left-arm", "maxVariant": 8, "label": "the left arm", "position": { "x": 40, "y": 90 } }
//!   ],
//!   "exclusiveDragGroup": ["left-arm", "right-arm"],
//!   "assetExtension": "svg",
//!   "renderScale": 1.0,
//!   "exportFileName": "mascot.png"
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MascotError, Result};
use crate::geometry::Point;
use crate::part::PartName;

// ============================================================================
// PartSpec
// ============================================================================

/// Configuration of a single part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct PartSpec {
    pub name: PartName,

    /// Number of variants available, numbered `1..=max_variant`.
    pub max_variant: u32,

    /// Human-readable name used in notices. Falls back to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Initial screen position of the part's layer.
    #[serde(default)]
    pub position: Point,
}

impl PartSpec {
    pub fn new(name: impl Into<PartName>, max_variant: u32) -> Self {
        Self {
            name: name.into(),
            max_variant,
            label: None,
            position: Point::ORIGIN,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// The label shown to users.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(self.name.as_str())
    }
}

// ============================================================================
// MascotConfig
// ============================================================================

/// Full configuration of a mascot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct MascotConfig {
    /// Known parts, in stacking order from bottom to top within a tier.
    pub parts: Vec<PartSpec>,

    /// Parts of which at most one may be drag-eligible at a time.
    #[serde(default = "default_exclusive_group")]
    pub exclusive_drag_group: Vec<PartName>,

    /// File extension of variant assets.
    #[serde(default = "default_extension")]
    pub asset_extension: String,

    /// Scale applied when rasterizing vector assets.
    #[serde(default = "default_render_scale")]
    pub render_scale: f32,

    /// File name offered for exported images.
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
}

fn default_exclusive_group() -> Vec<PartName> {
    vec![PartName::new("left-arm"), PartName::new("right-arm")]
}

fn default_extension() -> String {
    "svg".to_string()
}

fn default_render_scale() -> f32 {
    1.0
}

fn default_export_file_name() -> String {
    "mascot.png".to_string()
}

impl Default for MascotConfig {
    fn default() -> Self {
        Self {
            parts: vec![
                PartSpec::new("head", 15),
                PartSpec::new("body", 5),
                PartSpec::new("right-arm", 8).with_label("right arm"),
                PartSpec::new("left-arm", 8).with_label("left arm"),
                PartSpec::new("legs", 8),
            ],
            exclusive_drag_group: default_exclusive_group(),
            asset_extension: default_extension(),
            render_scale: default_render_scale(),
            export_file_name: default_export_file_name(),
        }
    }
}

impl MascotConfig {
    /// Creates a config with the given parts and default settings otherwise.
    ///
    /// The exclusive drag group is reduced to the members present in `parts`.
    pub fn with_parts(parts: Vec<PartSpec>) -> Self {
        let names: HashSet<&PartName> = parts.iter().map(|p| &p.name).collect();
        let exclusive_drag_group = default_exclusive_group()
            .into_iter()
            .filter(|name| names.contains(name))
            .collect();
        Self {
            parts,
            exclusive_drag_group,
            ..Self::default()
        }
    }

    pub fn part(&self, name: &PartName) -> Option<&PartSpec> {
        self.parts.iter().find(|p| &p.name == name)
    }

    /// Checks the invariants a mascot relies on.
    pub fn validate(&self) -> Result<()> {
        if self.parts.is_empty() {
            return Err(invalid("at least one part is required"));
        }

        let mut seen = HashSet::new();
        for part in &self.parts {
            if part.name.as_str().is_empty() {
                return Err(invalid("part names must not be empty"));
            }
            if !seen.insert(&part.name) {
                return Err(invalid(format!("duplicate part '{}'", part.name)));
            }
            if part.max_variant == 0 {
                return Err(invalid(format!(
                    "part '{}' must have at least one variant",
                    part.name
                )));
            }
        }

        for member in &self.exclusive_drag_group {
            if !seen.contains(member) {
                return Err(invalid(format!(
                    "exclusive drag group names unknown part '{}'",
                    member
                )));
            }
        }

        if !(self.render_scale.is_finite() && self.render_scale > 0.0) {
            return Err(invalid("render scale must be a positive number"));
        }

        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes and validates a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

fn invalid(reason: impl Into<String>) -> MascotError {
    MascotError::InvalidConfig {
        reason: reason.into(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_known_parts() {
        let config = MascotConfig::default();
        config.validate().unwrap();

        let counts: Vec<(&str, u32)> = config
            .parts
            .iter()
            .map(|p| (p.name.as_str(), p.max_variant))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("head", 15),
                ("body", 5),
                ("right-arm", 8),
                ("left-arm", 8),
                ("legs", 8)
            ]
        );
        assert_eq!(config.export_file_name, "mascot.png");
    }

    #[test]
    fn minimal_json_fills_defaults() {
        let json = r#"{ "parts": [ { "name": "head", "maxVariant": 3 }, { "name": "left-arm", "maxVariant": 2 }, { "name": "right-arm", "maxVariant": 2 } ] }"#;
        let config = MascotConfig::from_json(json).unwrap();

        assert_eq!(config.asset_extension, "svg");
        assert_eq!(config.render_scale, 1.0);
        assert_eq!(config.exclusive_drag_group.len(), 2);
        assert_eq!(config.parts[0].position, Point::ORIGIN);
        assert_eq!(config.parts[1].display_label(), "left-arm");
    }

    #[test]
    fn camel_case_serialization() {
        let json = MascotConfig::default().to_json_pretty().unwrap();
        assert!(json.contains("\"maxVariant\""));
        assert!(json.contains("\"exclusiveDragGroup\""));
        assert!(json.contains("\"exportFileName\""));
    }

    #[test]
    fn rejects_zero_variants() {
        let config = MascotConfig::with_parts(vec![PartSpec::new("head", 0)]);
        assert!(matches!(
            config.validate(),
            Err(MascotError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_parts() {
        let config =
            MascotConfig::with_parts(vec![PartSpec::new("head", 2), PartSpec::new("head", 3)]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unknown_group_member() {
        let mut config = MascotConfig::with_parts(vec![PartSpec::new("head", 2)]);
        config.exclusive_drag_group = vec![PartName::new("tail")];
        assert!(config.validate().is_err());
    }

    #[test]
    fn with_parts_drops_missing_group_members() {
        let config = MascotConfig::with_parts(vec![
            PartSpec::new("head", 15),
            PartSpec::new("left-arm", 8),
        ]);
        assert_eq!(config.exclusive_drag_group, vec![PartName::new("left-arm")]);
        config.validate().unwrap();
    }

    #[test]
    fn empty_config_is_invalid() {
        assert!(MascotConfig::with_parts(Vec::new()).validate().is_err());
    }
}
