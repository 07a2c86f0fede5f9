//! Text drawing
//!
//! Walks a string glyph by glyph, compositing each coverage mask onto a
//! [`Surface`] and advancing the dot.

use super::surface::Surface;
use crate::font::{Face, GlyphMask};
use crate::utils::fixed::{Int26_6, Point26_6};
use image::Rgba;

/// Baseline dot for a top-left anchored position
///
/// Shifts `position` down by `height - 2 * caret_slope.y` pixels.
pub fn baseline_origin(face: &Face<'_>, position: Point26_6) -> Point26_6 {
    let metrics = face.metrics();
    let dy = metrics.height - Int26_6::from_int(metrics.caret_slope.y * 2);
    position + Point26_6::new(Int26_6::ZERO, dy)
}

/// Draw `text` onto `dst` and return the advanced dot.
///
/// `position` is the top-left anchor of the line; the baseline is
/// derived from the face metrics (see [`baseline_origin`]). Pixels
/// outside the surface are clipped. Characters the font lacks render as
/// its notdef glyph.
pub fn draw_text<S: Surface + ?Sized>(
    dst: &mut S,
    position: Point26_6,
    ink: Rgba<u8>,
    face: &Face<'_>,
    text: &str,
) -> Point26_6 {
    let mut dot = baseline_origin(face, position);
    let mut prev: Option<u32> = None;

    for ch in text.chars() {
        let glyph = face.glyph_index(ch);
        if let Some(prev) = prev {
            dot.x += face.kern(prev, glyph);
        }

        let placed = face.glyph(dot, glyph);
        if let Some(mask) = placed.mask {
            composite_mask(dst, &mask, ink);
        }

        dot.x += placed.advance;
        prev = Some(glyph);
    }

    dot
}

/// Composite one glyph mask, clipped to the surface bounds
fn composite_mask<S: Surface + ?Sized>(dst: &mut S, mask: &GlyphMask, ink: Rgba<u8>) {
    let (dst_w, dst_h) = dst.dimensions();
    let (dst_w, dst_h) = (dst_w as i64, dst_h as i64);

    for row in 0..mask.height as i64 {
        let y = mask.y as i64 + row;
        if y < 0 || y >= dst_h {
            continue;
        }
        for col in 0..mask.width as i64 {
            let x = mask.x as i64 + col;
            if x < 0 || x >= dst_w {
                continue;
            }
            let coverage = mask.coverage[(row * mask.width as i64 + col) as usize];
            if coverage == 0 {
                continue;
            }
            dst.composite(x as u32, y as u32, ink, coverage);
        }
    }
}

/// `image.text(...)` sugar for [`draw_text`]
pub trait TextExt: Surface {
    /// Draw `text` at `position` and return the advanced dot
    fn text(&mut self, position: Point26_6, ink: Rgba<u8>, face: &Face<'_>, text: &str) -> Point26_6 {
        draw_text(self, position, ink, face, text)
    }
}

impl<S: Surface + ?Sized> TextExt for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::mock::BoxFont;
    use image::{Rgb, RgbImage};

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    #[test]
    fn test_baseline_origin() {
        // height 23px, caret rise 1 -> 21px down
        let face = Face::with_size(&BoxFont, 20.0);
        let origin = baseline_origin(&face, Point26_6::from_ints(4, 10));
        assert_eq!(origin, Point26_6::from_ints(4, 31));
    }

    #[test]
    fn test_empty_string_keeps_x() {
        let face = Face::with_size(&BoxFont, 20.0);
        let mut img = RgbImage::from_pixel(8, 8, WHITE);
        let start = Point26_6::from_ints(3, 0);
        let end = draw_text(&mut img, start, BLACK, &face, "");
        assert_eq!(end.x, start.x);
        assert!(img.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_draw_boxes() {
        let face = Face::with_size(&BoxFont, 20.0);
        let mut img = RgbImage::from_pixel(40, 40, WHITE);
        let end = img.text(Point26_6::from_ints(0, 0), BLACK, &face, "ab");

        // two 12px advances
        assert_eq!(end, Point26_6::from_ints(24, 21));

        // first box spans x 1..11, y 11..21
        assert_eq!(img.get_pixel(1, 11), &Rgb([0, 0, 0]));
        assert_eq!(img.get_pixel(10, 20), &Rgb([0, 0, 0]));
        assert_eq!(img.get_pixel(0, 11), &WHITE);
        assert_eq!(img.get_pixel(11, 11), &WHITE);
        assert_eq!(img.get_pixel(1, 21), &WHITE);
        // second box starts at 12 + 1
        assert_eq!(img.get_pixel(13, 11), &Rgb([0, 0, 0]));
        assert_eq!(img.get_pixel(12, 11), &WHITE);
    }

    #[test]
    fn test_kerning_moves_dot() {
        let face = Face::with_size(&BoxFont, 20.0);
        let mut img = RgbImage::from_pixel(40, 40, WHITE);
        let end = draw_text(&mut img, Point26_6::default(), BLACK, &face, "AV");
        // 12 + (-2) + 12
        assert_eq!(end.x, Int26_6::from_int(22));
    }

    #[test]
    fn test_clips_outside_surface() {
        let face = Face::with_size(&BoxFont, 20.0);
        let mut img = RgbImage::from_pixel(5, 5, WHITE);
        let end = draw_text(&mut img, Point26_6::from_ints(-3, -15), BLACK, &face, "xyz");
        assert_eq!(end.x, Int26_6::from_int(33));
        // box 0 covers x -2..8, y -4..6 -> the whole 5x5 surface
        assert!(img.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }
}
