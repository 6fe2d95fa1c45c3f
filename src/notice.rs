//! User-facing notices.

use std::fmt;

use serde::Serialize;

use crate::part::PartName;

/// A message the host should show to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Notice {
    /// Drag eligibility was refused because the layer is in the back tier.
    RaiseLayerFirst { part: PartName, label: String },

    /// A drag-eligible layer was sent to the back tier and lost eligibility.
    MovementDisabled { part: PartName, label: String },

    /// Export was aborted.
    ExportFailed { reason: String },
}

impl Notice {
    /// The part this notice is about, if any.
    pub fn part(&self) -> Option<&PartName> {
        match self {
            Self::RaiseLayerFirst { part, .. } | Self::MovementDisabled { part, .. } => Some(part),
            Self::ExportFailed { .. } => None,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RaiseLayerFirst { label, .. } => write!(
                f,
                "Move the {label} to a higher layer to manually adjust it."
            ),
            Self::MovementDisabled { label, .. } => write!(
                f,
                "You moved the {label} to the lower layer. Movement disabled."
            ),
            Self::ExportFailed { reason } => write!(f, "Could not export the mascot: {reason}"),
        }
    }
}
