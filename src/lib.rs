//! mascot-builder: layered mascot composition
//!
//! This crate assembles a character from independently swappable sprite
//! parts (head, body, arms, legs), lets each part cycle or randomize its
//! variant, restack and drag individual layers, and flattens the result
//! into a single PNG.
//!
//! # Example
//!
//! ```
//! use mascot_builder::{
//!     AssetId, InputEvent, Mascot, MascotConfig, MemoryAssetSource, PartSpec, Point, Tier,
//! };
//! use image::{Rgba, RgbaImage};
//!
//! let config = MascotConfig::with_parts(vec![
//!     PartSpec::new("body", 1),
//!     PartSpec::new("left-arm", 1).with_position(Point::new(4, 4)),
//! ]);
//! let mut source = MemoryAssetSource::new();
//! for spec in &config.parts {
//!     let id = AssetId::for_variant(&spec.name, 1, "svg");
//!     source.insert_image(id, RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 255])));
//! }
//!
//! let mut mascot = Mascot::with_seed(config, source, 1).unwrap();
//! mascot.randomize_all();
//!
//! // Let the left arm be dragged 10px to the right.
//! mascot.handle(InputEvent::ToggleDrag { part: "left-arm".into(), enabled: true }).unwrap();
//! mascot.handle(InputEvent::Press { part: "left-arm".into(), pointer: Point::new(5, 5) }).unwrap();
//! mascot.handle(InputEvent::Move { pointer: Point::new(15, 5) }).unwrap();
//! mascot.handle(InputEvent::Release).unwrap();
//!
//! // Sending it behind the body revokes dragging and raises a notice.
//! mascot.set_tier(&"left-arm".into(), Tier::Back).unwrap();
//! assert_eq!(mascot.take_notices().len(), 1);
//!
//! let png = mascot.export_png().unwrap();
//! assert!(png.starts_with(b"\x89PNG"));
//! ```
//!
//! # Startup
//!
//! A freshly built [`Mascot`] has every layer empty. Hosts call
//! [`Mascot::randomize_all`] once before handling input; it gives each part
//! a random variant and reports per part whether its asset loaded. Until a
//! part has loaded, exporting fails with [`MascotError::AssetLoad`].
//!
//! # Assets
//!
//! Variant `n` of part `right-arm` lives at `right_arm/right_arm{n}.svg`
//! relative to an [`AssetSource`]. SVG assets are rasterized at their
//! natural size times the config's `renderScale`; other extensions are
//! decoded as raster images.

mod asset;
mod compositor;
mod config;
mod error;
mod event;
mod geometry;
mod layer;
mod mascot;
mod notice;
mod part;
mod variant;

pub use asset::svg::{SvgError, rasterize};
pub use asset::{AssetId, AssetSource, DirAssetSource, MemoryAssetSource, Sprite, decode_asset};
pub use compositor::{Composition, Compositor, compose_layers, composite_over};
pub use config::{MascotConfig, PartSpec};
pub use error::{MascotError, Result};
pub use event::{InputEvent, Outcome};
pub use geometry::{Point, Rect, SizePx};
pub use layer::{DragController, DragState, Layer, LayerStack, Tier, TierChange};
pub use mascot::Mascot;
pub use notice::Notice;
pub use part::PartName;
pub use variant::{Resolved, VariantMode, VariantResolver, VariantStore, next_index};
