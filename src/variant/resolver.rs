//! Load-before-commit variant resolution.

use rand::Rng;

use super::{VariantMode, VariantStore, next_index};
use crate::asset::{AssetId, AssetSource};
use crate::error::Result;
use crate::layer::Layer;
use crate::part::PartName;

/// Outcome of a committed variant change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub part: PartName,
    pub previous: u32,
    pub variant: u32,
    pub asset: AssetId,
}

/// Picks a part's next variant and swaps it in once its asset has loaded.
///
/// The layer and store are only touched after a successful fetch, so a
/// missing asset leaves the previous variant on screen.
#[derive(Debug, Clone)]
pub struct VariantResolver<S> {
    source: S,
    extension: String,
    render_scale: f32,
}

impl<S: AssetSource> VariantResolver<S> {
    pub fn new(source: S, extension: impl Into<String>) -> Self {
        Self {
            source,
            extension: extension.into(),
            render_scale: 1.0,
        }
    }

    /// Scale applied when rasterizing vector assets.
    pub fn with_render_scale(mut self, render_scale: f32) -> Self {
        self.render_scale = render_scale;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Identifier of the asset for a part's variant.
    pub fn asset_id(&self, part: &PartName, variant: u32) -> AssetId {
        AssetId::for_variant(part, variant, &self.extension)
    }

    /// Resolves `mode` for the layer's part and commits the result.
    ///
    /// On failure the store and layer are unchanged.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        layer: &mut Layer,
        store: &mut VariantStore,
        mode: VariantMode,
        rng: &mut R,
    ) -> Result<Resolved> {
        let part = layer.part().clone();
        let previous = store.get(&part)?;
        let max = store.max(&part)?;
        let variant = next_index(previous, max, mode, rng);
        let asset = self.asset_id(&part, variant);

        let sprite = match self.source.fetch(&asset, self.render_scale) {
            Ok(sprite) => sprite,
            Err(e) => {
                tracing::warn!(part = %part, asset = %asset, error = %e, "variant asset failed to load");
                return Err(e);
            }
        };

        store.set(&part, variant)?;
        layer.show(sprite);

        tracing::debug!(part = %part, previous, variant, "variant committed");
        Ok(Resolved {
            part,
            previous,
            variant,
            asset,
        })
    }
}
