//! Layers: the on-screen instances of parts.
//!
//! Each [`Layer`] carries its stacking [`Tier`], screen position, size, and
//! the sprite currently displayed. [`LayerStack`] owns all layers and
//! enforces the drag-eligibility rules; [`DragController`] moves the single
//! drag-active layer in response to pointer input.

mod drag;
mod stack;

pub use drag::{DragController, DragState};
pub use stack::{LayerStack, TierChange};

use serde::{Deserialize, Serialize};

use crate::asset::{AssetId, Sprite};
use crate::config::PartSpec;
use crate::geometry::{Point, Rect, SizePx};
use crate::part::PartName;

// ============================================================================
// Tier
// ============================================================================

/// Stacking tier of a layer.
///
/// Ordering follows drawing order: `Back < Neutral < Front`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Back,
    #[default]
    Neutral,
    Front,
}

impl Tier {
    /// The tier that follows this one: back, neutral, front, then back again.
    pub fn next(self) -> Self {
        match self {
            Self::Back => Self::Neutral,
            Self::Neutral => Self::Front,
            Self::Front => Self::Back,
        }
    }

    /// Numeric z-order: -1, 0 or 1.
    pub fn z_index(self) -> i8 {
        match self {
            Self::Back => -1,
            Self::Neutral => 0,
            Self::Front => 1,
        }
    }

    /// Whether a layer in this tier may be repositioned by hand.
    pub fn allows_drag(self) -> bool {
        self != Self::Back
    }
}

// ============================================================================
// Layer
// ============================================================================

/// The visual instance of a part.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    part: PartName,
    label: String,
    tier: Tier,
    position: Point,
    size: SizePx,
    sprite: Option<Sprite>,
    drag_eligible: bool,
}

impl Layer {
    /// Creates a neutral-tier layer at the configured position with nothing
    /// displayed yet.
    pub fn new(spec: &PartSpec) -> Self {
        Self {
            part: spec.name.clone(),
            label: spec.display_label().to_string(),
            tier: Tier::Neutral,
            position: spec.position,
            size: SizePx::default(),
            sprite: None,
            drag_eligible: false,
        }
    }

    pub fn part(&self) -> &PartName {
        &self.part
    }

    /// Name used when talking to users about this layer.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> SizePx {
        self.size
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_origin(self.position, self.size)
    }

    /// The sprite currently on screen, if any variant has loaded yet.
    pub fn sprite(&self) -> Option<&Sprite> {
        self.sprite.as_ref()
    }

    pub fn asset_id(&self) -> Option<&AssetId> {
        self.sprite.as_ref().map(|s| &s.id)
    }

    /// Whether the user has asked to move this layer (the "move" checkbox).
    pub fn is_drag_eligible(&self) -> bool {
        self.drag_eligible
    }

    /// Replaces the displayed sprite and adopts its size.
    pub fn show(&mut self, sprite: Sprite) {
        self.size = sprite.size();
        self.sprite = Some(sprite);
    }

    pub(crate) fn set_tier(&mut self, tier: Tier) {
        self.tier = tier;
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub(crate) fn set_drag_eligible(&mut self, eligible: bool) {
        self.drag_eligible = eligible;
    }
}

// ============================================================================
// Tests
// ============================================================================
