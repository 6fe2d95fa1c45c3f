//! Host input events.

use serde::{Deserialize, Serialize};

use crate::compositor::Composition;
use crate::geometry::Point;
use crate::layer::TierChange;
use crate::part::PartName;
use crate::variant::{Resolved, VariantMode};

/// A user action delivered by the host UI.
///
/// Serialized with a `type` tag so event scripts can be written as JSON:
///
/// ```json
/// [
///   { "type": "toggle-drag", "part": "left-arm", "enabled": true },
///   { "type": "press", "part": "left-arm", "pointer": { "x": 10, "y": 12 } },
///   { "type": "move", "pointer": { "x": 40, "y": 12 } },
///   { "type": "release" },
///   { "type": "export" }
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InputEvent {
    /// Pointer pressed on a part's layer.
    Press { part: PartName, pointer: Point },
    /// Pointer moved anywhere on screen.
    Move { pointer: Point },
    /// Pointer released anywhere on screen.
    Release,
    /// The layer button for a part was clicked.
    CycleTier { part: PartName },
    /// The move checkbox for a part was toggled.
    ToggleDrag { part: PartName, enabled: bool },
    /// A previous/next or random button for a part was clicked.
    ChangeVariant { part: PartName, mode: VariantMode },
    /// Every part should pick a random variant.
    RandomizeAll,
    /// The download button was clicked.
    Export,
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The event was ignored, e.g. a press on a layer that is not drag-active.
    Ignored,
    /// Drag eligibility or drag state changed.
    DragUpdated,
    /// The dragged layer moved to a new position.
    Moved(Point),
    Tier(TierChange),
    Variant(Resolved),
    /// Number of parts that picked a new variant.
    Randomized(usize),
    Exported(Composition),
}
