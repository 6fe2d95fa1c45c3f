//! SVG rasterization using resvg/usvg.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use thiserror::Error;

/// Failure to turn SVG markup into pixels.
#[derive(Error, Debug)]
pub enum SvgError {
    #[error("invalid SVG: {0}")]
    Parse(#[from] resvg::usvg::Error),

    #[error("SVG has an empty canvas")]
    EmptyCanvas,
}

/// Renders SVG markup at its natural size multiplied by `scale`.
///
/// The output dimensions are the SVG's declared width and height, scaled
/// and rounded up, so parts drawn on a shared artboard keep their alignment.
pub fn rasterize(svg_data: &str, scale: f32) -> Result<RgbaImage, SvgError> {
    let opts = Options::default();
    let tree = Tree::from_str(svg_data, &opts)?;

    let svg_size = tree.size();
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height).ok_or(SvgError::EmptyCanvas)?;
    let transform = Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let mut img = RgbaImage::new(width, pixmap.height());

    for (i, pixel) in pixmap.pixels().iter().enumerate() {
        let x = i as u32 % width;
        let y = i as u32 / width;
        // tiny_skia stores premultiplied alpha
        let (r, g, b, a) = unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
        img.put_pixel(x, y, Rgba([r, g, b, a]));
    }

    img
}

fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20"><rect x="0" y="0" width="40" height="20" fill="#ff0000"/></svg>"##;

    #[test]
    fn rasterizes_at_natural_size() {
        let img = rasterize(SQUARE_SVG, 1.0).unwrap();
        assert_eq!(img.dimensions(), (40, 20));
        assert_eq!(img.get_pixel(20, 10).0, [255, 0, 0, 255]);
    }

    #[test]
    fn scale_multiplies_dimensions() {
        let img = rasterize(SQUARE_SVG, 2.0).unwrap();
        assert_eq!(img.dimensions(), (80, 40));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            rasterize("definitely not svg", 1.0),
            Err(SvgError::Parse(_))
        ));
    }

    #[test]
    fn unpremultiply_transparent() {
        assert_eq!(unpremultiply(10, 10, 10, 0), (0, 0, 0, 0));
        assert_eq!(unpremultiply(10, 20, 30, 255), (10, 20, 30, 255));
    }
}
