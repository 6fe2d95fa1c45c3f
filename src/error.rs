//! Error types for mascot operations.

use thiserror::Error;

use crate::asset::AssetId;
use crate::part::PartName;

/// Result type alias for mascot operations.
pub type Result<T> = std::result::Result<T, MascotError>;

/// Errors produced while resolving variants, stacking layers, or exporting.
#[derive(Error, Debug)]
pub enum MascotError {
    /// The asset for a variant is missing or unreachable.
    #[error("asset not found: {id}")]
    AssetNotFound { id: AssetId },

    /// The asset exists but could not be decoded into an image.
    #[error("failed to decode asset {id}: {reason}")]
    AssetDecode { id: AssetId, reason: String },

    /// A variant index outside `[1, max]` reached the variant store.
    ///
    /// Callers normalize indices before storing them, so this indicates a bug.
    #[error("variant {index} out of range for part '{part}' (1..={max})")]
    OutOfRange { part: PartName, index: u32, max: u32 },

    /// Drag eligibility was requested for a layer in the back tier.
    #[error("part '{part}' is in the back tier and cannot be moved")]
    IneligibleTier { part: PartName },

    /// The part name is not part of the configured mascot.
    #[error("unknown part '{part}'")]
    UnknownPart { part: PartName },

    /// Export was requested with nothing to draw.
    #[error("nothing to export: the composition is empty")]
    EmptyComposition,

    /// A layer's asset could not be fetched during export.
    ///
    /// `source` is `None` when the layer never displayed an asset.
    #[error("could not load the asset for '{part}' during export")]
    AssetLoad {
        part: PartName,
        #[source]
        source: Option<Box<MascotError>>,
    },

    /// The mascot configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MascotError {
    /// Returns true for failures that leave state untouched and only need logging.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::OutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_part() {
        let err = MascotError::IneligibleTier {
            part: PartName::new("left-arm"),
        };
        assert!(err.to_string().contains("left-arm"));

        let err = MascotError::OutOfRange {
            part: PartName::new("head"),
            index: 16,
            max: 15,
        };
        assert_eq!(
            err.to_string(),
            "variant 16 out of range for part 'head' (1..=15)"
        );
        assert!(!err.is_recoverable());
    }

    #[test]
    fn asset_load_keeps_source() {
        use std::error::Error as _;

        let err = MascotError::AssetLoad {
            part: PartName::new("legs"),
            source: Some(Box::new(MascotError::AssetNotFound {
                id: AssetId::for_variant(&PartName::new("legs"), 3, "svg"),
            })),
        };
        let source = err.source().unwrap();
        assert!(source.to_string().contains("legs/legs3.svg"));
        assert!(err.is_recoverable());
    }
}
