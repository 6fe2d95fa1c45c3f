//! Variant asset lookup.
//!
//! Every `(part, variant)` pair maps to an [`AssetId`] of the form
//! `{stem}/{stem}{variant}.{ext}`, where `stem` is the part name with dashes
//! replaced by underscores. An [`AssetSource`] turns an id into a decoded
//! [`Sprite`] or fails with [`MascotError::AssetNotFound`].

pub mod svg;

use std::collections::HashMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;

use crate::error::{MascotError, Result};
use crate::geometry::SizePx;
use crate::part::PartName;

// ============================================================================
// AssetId
// ============================================================================

/// Relative identifier of a variant asset, e.g. `right_arm/right_arm3.svg`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(String);

impl AssetId {
    /// Builds the identifier for a part's variant.
    pub fn for_variant(part: &PartName, variant: u32, extension: &str) -> Self {
        let stem = part.asset_stem();
        Self(format!("{stem}/{stem}{variant}.{extension}"))
    }

    /// Wraps an arbitrary relative path.
    pub fn from_path(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File extension, lowercased, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.0)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Sprite
// ============================================================================

/// A loaded, decoded asset.
///
/// Cloning is cheap; the pixel buffer is shared.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub id: AssetId,
    pub image: Arc<RgbaImage>,
}

impl Sprite {
    pub fn new(id: AssetId, image: RgbaImage) -> Self {
        Self {
            id,
            image: Arc::new(image),
        }
    }

    pub fn size(&self) -> SizePx {
        SizePx::new(self.image.width(), self.image.height())
    }
}

// ============================================================================
// AssetSource
// ============================================================================

/// Content-addressed asset lookup.
pub trait AssetSource {
    /// Fetches and decodes the asset with the given id.
    ///
    /// Vector assets are rasterized at their natural size times
    /// `render_scale`; raster assets keep their pixel size.
    fn fetch(&self, id: &AssetId, render_scale: f32) -> Result<Sprite>;
}

impl<S: AssetSource + ?Sized> AssetSource for &S {
    fn fetch(&self, id: &AssetId, render_scale: f32) -> Result<Sprite> {
        (**self).fetch(id, render_scale)
    }
}

impl<S: AssetSource + ?Sized> AssetSource for Box<S> {
    fn fetch(&self, id: &AssetId, render_scale: f32) -> Result<Sprite> {
        (**self).fetch(id, render_scale)
    }
}

/// Decodes raw asset bytes, rasterizing SVG and decoding anything else as a
/// raster format.
pub fn decode_asset(id: &AssetId, bytes: &[u8], render_scale: f32) -> Result<RgbaImage> {
    let decode_error = |reason: String| MascotError::AssetDecode {
        id: id.clone(),
        reason,
    };

    if id.extension().as_deref() == Some("svg") {
        let markup = std::str::from_utf8(bytes).map_err(|e| decode_error(e.to_string()))?;
        svg::rasterize(markup, render_scale).map_err(|e| decode_error(e.to_string()))
    } else {
        image::load_from_memory(bytes)
            .map(|img| img.to_rgba8())
            .map_err(|e| decode_error(e.to_string()))
    }
}

// ============================================================================
// DirAssetSource
// ============================================================================

/// Loads assets from files below a root directory.
///
/// Identifiers that are absolute or climb out of the root with `..` are
/// treated as not found.
#[derive(Debug, Clone)]
pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve_path(&self, id: &AssetId) -> Option<PathBuf> {
        let relative = Path::new(id.as_str());
        let contained = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        contained.then(|| self.root.join(relative))
    }
}

impl AssetSource for DirAssetSource {
    fn fetch(&self, id: &AssetId, render_scale: f32) -> Result<Sprite> {
        let not_found = || MascotError::AssetNotFound { id: id.clone() };

        let path = self.resolve_path(id).ok_or_else(not_found)?;
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(e.into()),
        };

        let image = decode_asset(id, &bytes, render_scale)?;
        Ok(Sprite::new(id.clone(), image))
    }
}

// ============================================================================
// MemoryAssetSource
// ============================================================================

#[derive(Debug, Clone)]
enum StoredAsset {
    Svg(String),
    Raster(Arc<RgbaImage>),
}

/// Holds assets in memory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetSource {
    assets: HashMap<AssetId, StoredAsset>,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores SVG markup under the given id.
    pub fn insert_svg(&mut self, id: AssetId, markup: impl Into<String>) {
        self.assets.insert(id, StoredAsset::Svg(markup.into()));
    }

    /// Stores an already-decoded image under the given id.
    pub fn insert_image(&mut self, id: AssetId, image: RgbaImage) {
        self.assets.insert(id, StoredAsset::Raster(Arc::new(image)));
    }

    /// Removes an asset. Returns true if it was present.
    pub fn remove(&mut self, id: &AssetId) -> bool {
        self.assets.remove(id).is_some()
    }

    pub fn contains(&self, id: &AssetId) -> bool {
        self.assets.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetSource for MemoryAssetSource {
    fn fetch(&self, id: &AssetId, render_scale: f32) -> Result<Sprite> {
        match self.assets.get(id) {
            Some(StoredAsset::Raster(image)) => Ok(Sprite {
                id: id.clone(),
                image: Arc::clone(image),
            }),
            Some(StoredAsset::Svg(markup)) => {
                let image = svg::rasterize(markup, render_scale).map_err(|e| {
                    MascotError::AssetDecode {
                        id: id.clone(),
                        reason: e.to_string(),
                    }
                })?;
                Ok(Sprite::new(id.clone(), image))
            }
            None => Err(MascotError::AssetNotFound { id: id.clone() }),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
