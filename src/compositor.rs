//! Flattening layers into a single raster image.
//!
//! Export happens in two phases. First every layer's current asset is
//! fetched; if any fetch fails the export is aborted with nothing drawn.
//! Then the layers are drawn back to front onto a canvas sized to their
//! tight bounding box.

use std::io::Cursor;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::asset::{AssetSource, Sprite};
use crate::error::{MascotError, Result};
use crate::geometry::Rect;
use crate::layer::{Layer, LayerStack};
use crate::part::PartName;

// ============================================================================
// Composition
// ============================================================================

/// A flattened mascot image.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    /// The composed pixels, sized to `bounds`.
    pub image: RgbaImage,

    /// Bounding box of all layers in screen coordinates.
    pub bounds: Rect,

    /// Parts in the order they were drawn, back to front.
    pub draw_order: Vec<PartName>,
}

impl Composition {
    /// Encodes the image as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Writes the image to `path` as PNG regardless of the path's extension.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

// ============================================================================
// Compositor
// ============================================================================

/// Composes layer stacks, caching the last result.
///
/// The cache is keyed on the stack's identity and revision, so exporting
/// the same stack again without any layer change returns the cached image.
#[derive(Debug, Clone)]
pub struct Compositor {
    render_scale: f32,
    cache: Option<(CacheKey, Composition)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheKey {
    stack: u64,
    revision: u64,
}

impl Default for Compositor {
    fn default() -> Self {
        Self {
            render_scale: 1.0,
            cache: None,
        }
    }
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scale passed to the asset source when re-fetching vector assets.
    pub fn with_render_scale(mut self, render_scale: f32) -> Self {
        self.render_scale = render_scale;
        self
    }

    /// Drops the cached composition.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Composes the stack, re-fetching each layer's current asset from `source`.
    pub fn compose<S: AssetSource + ?Sized>(
        &mut self,
        stack: &LayerStack,
        source: &S,
    ) -> Result<Composition> {
        let key = CacheKey {
            stack: stack.id(),
            revision: stack.revision(),
        };
        if let Some((cached, composition)) = &self.cache {
            if *cached == key {
                return Ok(composition.clone());
            }
        }

        let composition = compose_layers(&stack.stacking_order(), source, self.render_scale)?;
        self.cache = Some((key, composition.clone()));
        Ok(composition)
    }
}

/// Composes layers already sorted back to front.
pub fn compose_layers<S: AssetSource + ?Sized>(
    layers: &[&Layer],
    source: &S,
    render_scale: f32,
) -> Result<Composition> {
    let bounds = Rect::bounding(layers.iter().map(|layer| layer.bounds()))
        .ok_or(MascotError::EmptyComposition)?;
    if bounds.size().is_empty() {
        return Err(MascotError::EmptyComposition);
    }

    // Fetch everything before drawing anything.
    let fetched = layers
        .iter()
        .map(|layer| fetch_layer(layer, source, render_scale).map(|sprite| (*layer, sprite)))
        .collect::<Result<Vec<_>>>()?;

    let mut canvas = RgbaImage::new(bounds.width, bounds.height);
    let mut draw_order = Vec::with_capacity(fetched.len());
    for (layer, sprite) in &fetched {
        let size = layer.size();
        let x = layer.position().x - bounds.x;
        let y = layer.position().y - bounds.y;

        if sprite.size() == size {
            composite_over(&mut canvas, &sprite.image, x, y);
        } else {
            let resized = imageops::resize(&*sprite.image, size.width, size.height, FilterType::Triangle);
            composite_over(&mut canvas, &resized, x, y);
        }
        draw_order.push(layer.part().clone());
    }

    tracing::debug!(
        width = bounds.width,
        height = bounds.height,
        layers = draw_order.len(),
        "composition rendered"
    );
    Ok(Composition {
        image: canvas,
        bounds,
        draw_order,
    })
}

fn fetch_layer<S: AssetSource + ?Sized>(
    layer: &Layer,
    source: &S,
    render_scale: f32,
) -> Result<Sprite> {
    let id = layer.asset_id().ok_or_else(|| MascotError::AssetLoad {
        part: layer.part().clone(),
        source: None,
    })?;
    source.fetch(id, render_scale).map_err(|e| MascotError::AssetLoad {
        part: layer.part().clone(),
        source: Some(Box::new(e)),
    })
}

// ============================================================================
// Compositing
// ============================================================================

/// Composites a source image onto a destination image at the specified position.
///
/// Uses standard alpha blending (source over destination).
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    let dest_width = dest.width() as i64;
    let dest_height = dest.height() as i64;

    for (sx, sy, src_pixel) in src.enumerate_pixels() {
        let dx = x as i64 + sx as i64;
        let dy = y as i64 + sy as i64;
        if dx < 0 || dy < 0 || dx >= dest_width || dy >= dest_height {
            continue;
        }

        let dst_pixel = dest.get_pixel_mut(dx as u32, dy as u32);
        *dst_pixel = alpha_blend(*src_pixel, *dst_pixel);
    }
}

/// Alpha blends two RGBA pixels (source over destination).
fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    match src[3] {
        255 => return src,
        0 => return dst,
        _ => {}
    }

    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    let blend = |s: u8, d: u8| -> u8 {
        let sf = s as f32 / 255.0;
        let df = d as f32 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

// ============================================================================
// Tests
// ============================================================================
