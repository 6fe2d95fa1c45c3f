//! The mascot engine.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::asset::AssetSource;
use crate::compositor::{Composition, Compositor};
use crate::config::MascotConfig;
use crate::error::{MascotError, Result};
use crate::event::{InputEvent, Outcome};
use crate::geometry::Point;
use crate::layer::{DragController, DragState, Layer, LayerStack, Tier, TierChange};
use crate::notice::Notice;
use crate::part::PartName;
use crate::variant::{Resolved, VariantMode, VariantResolver, VariantStore};

// ============================================================================
// Mascot
// ============================================================================

/// Main mascot engine.
///
/// `Mascot` owns the variant store, the layer stack, the drag controller and
/// the compositor for one mascot. All state changes go through `&mut self`,
/// so a single owner processes one event at a time; several mascots can
/// live side by side.
///
/// # Example
///
/// ```
/// use mascot_builder::{AssetId, Mascot, MascotConfig, MemoryAssetSource, PartSpec, VariantMode};
/// use image::{Rgba, RgbaImage};
///
/// let config = MascotConfig::with_parts(vec![PartSpec::new("head", 2)]);
/// let mut source = MemoryAssetSource::new();
/// for variant in 1..=2 {
///     let id = AssetId::for_variant(&"head".into(), variant, "svg");
///     source.insert_image(id, RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255])));
/// }
///
/// let mut mascot = Mascot::with_seed(config, source, 7).unwrap();
/// mascot.randomize_all();
/// mascot.change_variant(&"head".into(), VariantMode::Increment).unwrap();
///
/// let composition = mascot.export().unwrap();
/// assert_eq!(composition.image.dimensions(), (8, 8));
/// ```
pub struct Mascot<S> {
    config: MascotConfig,
    variants: VariantStore,
    stack: LayerStack,
    drag: DragController,
    resolver: VariantResolver<S>,
    compositor: Compositor,
    rng: StdRng,
    pending: VecDeque<InputEvent>,
    notices: Vec<Notice>,
}

impl<S: AssetSource> Mascot<S> {
    /// Creates a mascot with an entropy-seeded random source.
    ///
    /// Layers start empty; call [`randomize_all`](Self::randomize_all) to
    /// load the initial variants.
    pub fn new(config: MascotConfig, source: S) -> Result<Self> {
        Self::with_rng(config, source, StdRng::from_entropy())
    }

    /// Creates a mascot whose random choices are reproducible.
    pub fn with_seed(config: MascotConfig, source: S, seed: u64) -> Result<Self> {
        Self::with_rng(config, source, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: MascotConfig, source: S, rng: StdRng) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            variants: VariantStore::from_parts(&config.parts),
            stack: LayerStack::new(&config),
            drag: DragController::new(),
            resolver: VariantResolver::new(source, config.asset_extension.clone())
                .with_render_scale(config.render_scale),
            compositor: Compositor::new().with_render_scale(config.render_scale),
            rng,
            pending: VecDeque::new(),
            notices: Vec::new(),
            config,
        })
    }

    // ---- Accessors ----

    pub fn config(&self) -> &MascotConfig {
        &self.config
    }

    pub fn stack(&self) -> &LayerStack {
        &self.stack
    }

    pub fn layer(&self, part: &PartName) -> Result<&Layer> {
        self.stack.layer(part)
    }

    pub fn variants(&self) -> &VariantStore {
        &self.variants
    }

    /// Current variant of a part.
    pub fn variant(&self, part: &PartName) -> Result<u32> {
        self.variants.get(part)
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    pub fn source(&self) -> &S {
        self.resolver.source()
    }

    pub fn source_mut(&mut self) -> &mut S {
        self.compositor.invalidate();
        self.resolver.source_mut()
    }

    // ---- Notices ----

    /// Notices raised since the last [`take_notices`](Self::take_notices).
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, notice: Notice) {
        tracing::info!(notice = %notice, "notice raised");
        self.notices.push(notice);
    }

    // ---- Variants ----

    /// Picks the part's next variant and shows it once its asset has loaded.
    pub fn change_variant(&mut self, part: &PartName, mode: VariantMode) -> Result<Resolved> {
        let layer = self.stack.layer_mut(part)?;
        self.resolver
            .resolve(layer, &mut self.variants, mode, &mut self.rng)
    }

    /// Gives every part a random variant.
    ///
    /// Parts are resolved independently: a part whose asset fails to load
    /// keeps its previous variant while the others still update.
    pub fn randomize_all(&mut self) -> Vec<(PartName, Result<Resolved>)> {
        let parts: Vec<PartName> = self.config.parts.iter().map(|p| p.name.clone()).collect();
        parts
            .into_iter()
            .map(|part| {
                let result = self.change_variant(&part, VariantMode::Random);
                (part, result)
            })
            .collect()
    }

    // ---- Tiers ----

    /// Advances the part's tier (back, neutral, front, back).
    pub fn cycle_tier(&mut self, part: &PartName) -> Result<TierChange> {
        let change = self.stack.cycle_tier(part)?;
        self.after_tier_change(&change);
        Ok(change)
    }

    /// Moves the part's layer to a specific tier.
    pub fn set_tier(&mut self, part: &PartName, tier: Tier) -> Result<TierChange> {
        let change = self.stack.set_tier(part, tier)?;
        self.after_tier_change(&change);
        Ok(change)
    }

    fn after_tier_change(&mut self, change: &TierChange) {
        if let Some(notice) = &change.demoted {
            self.notify(notice.clone());
        }
    }

    // ---- Dragging ----

    /// Applies a move-checkbox toggle.
    ///
    /// Refusing a back-tier layer raises [`Notice::RaiseLayerFirst`] and
    /// returns [`MascotError::IneligibleTier`].
    pub fn toggle_drag(&mut self, part: &PartName, enabled: bool) -> Result<()> {
        match self.stack.set_drag_eligibility(part, enabled) {
            Err(MascotError::IneligibleTier { part }) => {
                let label = self.stack.layer(&part)?.label().to_string();
                self.notify(Notice::RaiseLayerFirst {
                    part: part.clone(),
                    label,
                });
                Err(MascotError::IneligibleTier { part })
            }
            other => other,
        }
    }

    /// Pointer pressed on a part. Returns whether a drag started.
    pub fn press(&mut self, part: &PartName, pointer: Point) -> Result<bool> {
        self.drag.press(&self.stack, part, pointer)
    }

    /// Pointer moved. Returns the dragged layer's new position, if any.
    pub fn move_pointer(&mut self, pointer: Point) -> Result<Option<Point>> {
        self.drag.move_to(&mut self.stack, pointer)
    }

    /// Pointer released. Returns the part that was being dragged, if any.
    pub fn release(&mut self) -> Option<PartName> {
        self.drag.release()
    }

    // ---- Export ----

    /// Flattens the current layers into one image.
    ///
    /// Failures raise [`Notice::ExportFailed`]; the layers are left as they were.
    pub fn export(&mut self) -> Result<Composition> {
        match self.compositor.compose(&self.stack, self.resolver.source()) {
            Ok(composition) => Ok(composition),
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                self.notify(Notice::ExportFailed {
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Exports and encodes as PNG.
    pub fn export_png(&mut self) -> Result<Vec<u8>> {
        self.export()?.encode_png()
    }

    /// Exports into `dir` under the configured file name and returns the path.
    pub fn export_to_dir(&mut self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let composition = self.export()?;
        let path = dir.as_ref().join(&self.config.export_file_name);
        composition.save_png(&path)?;
        tracing::info!(path = %path.display(), "mascot exported");
        Ok(path)
    }

    // ---- Events ----

    /// Handles one input event immediately.
    pub fn handle(&mut self, event: InputEvent) -> Result<Outcome> {
        tracing::trace!(?event, "handling event");
        match event {
            InputEvent::Press { part, pointer } => Ok(if self.press(&part, pointer)? {
                Outcome::DragUpdated
            } else {
                Outcome::Ignored
            }),
            InputEvent::Move { pointer } => Ok(match self.move_pointer(pointer)? {
                Some(position) => Outcome::Moved(position),
                None => Outcome::Ignored,
            }),
            InputEvent::Release => Ok(match self.release() {
                Some(_) => Outcome::DragUpdated,
                None => Outcome::Ignored,
            }),
            InputEvent::CycleTier { part } => self.cycle_tier(&part).map(Outcome::Tier),
            InputEvent::ToggleDrag { part, enabled } => {
                self.toggle_drag(&part, enabled)?;
                Ok(Outcome::DragUpdated)
            }
            InputEvent::ChangeVariant { part, mode } => {
                self.change_variant(&part, mode).map(Outcome::Variant)
            }
            InputEvent::RandomizeAll => {
                let changed = self
                    .randomize_all()
                    .iter()
                    .filter(|(_, result)| result.is_ok())
                    .count();
                Ok(Outcome::Randomized(changed))
            }
            InputEvent::Export => self.export().map(Outcome::Exported),
        }
    }

    /// Queues an event for [`process_pending`](Self::process_pending).
    pub fn enqueue(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Handles queued events in arrival order.
    ///
    /// Each event finishes, including any asset load, before the next one
    /// starts, so repeated clicks on one part apply in the order they were
    /// made. A failing event does not stop the ones after it.
    pub fn process_pending(&mut self) -> Vec<Result<Outcome>> {
        let mut results = Vec::with_capacity(self.pending.len());
        while let Some(event) = self.pending.pop_front() {
            results.push(self.handle(event));
        }
        results
    }
}

// ============================================================================
// Tests
// ============================================================================
