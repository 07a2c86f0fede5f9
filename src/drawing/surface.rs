//! Destination surfaces
//!
//! A [`Surface`] is any raster buffer that can composite ink through a
//! coverage value. Implemented for the 8-bit `image` buffers.

use crate::utils::color::{over_opaque, over_rgba};
use image::{ImageBuffer, Luma, Pixel, Rgb, Rgba};
use std::ops::{Deref, DerefMut};

/// Mutable raster buffer supporting per-pixel compositing
pub trait Surface {
    /// (width, height) in pixels
    fn dimensions(&self) -> (u32, u32);

    /// Composite `ink` over the pixel at (x, y) with the given coverage.
    ///
    /// Callers keep (x, y) in bounds.
    fn composite(&mut self, x: u32, y: u32, ink: Rgba<u8>, coverage: u8);
}

impl<C> Surface for ImageBuffer<Rgba<u8>, C>
where
    C: Deref<Target = [u8]> + DerefMut,
{
    fn dimensions(&self) -> (u32, u32) {
        ImageBuffer::dimensions(self)
    }

    fn composite(&mut self, x: u32, y: u32, ink: Rgba<u8>, coverage: u8) {
        let px = self.get_pixel_mut(x, y);
        *px = Rgba(over_rgba(px.0, ink.0, coverage));
    }
}

impl<C> Surface for ImageBuffer<Rgb<u8>, C>
where
    C: Deref<Target = [u8]> + DerefMut,
{
    fn dimensions(&self) -> (u32, u32) {
        ImageBuffer::dimensions(self)
    }

    fn composite(&mut self, x: u32, y: u32, ink: Rgba<u8>, coverage: u8) {
        let px = self.get_pixel_mut(x, y);
        for i in 0..3 {
            px.0[i] = over_opaque(px.0[i], ink.0[i], ink.0[3], coverage);
        }
    }
}

impl<C> Surface for ImageBuffer<Luma<u8>, C>
where
    C: Deref<Target = [u8]> + DerefMut,
{
    fn dimensions(&self) -> (u32, u32) {
        ImageBuffer::dimensions(self)
    }

    fn composite(&mut self, x: u32, y: u32, ink: Rgba<u8>, coverage: u8) {
        let luma = ink.to_luma().0[0];
        let px = self.get_pixel_mut(x, y);
        px.0[0] = over_opaque(px.0[0], luma, ink.0[3], coverage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, RgbImage, RgbaImage};

    #[test]
    fn test_rgb_composite() {
        let mut img = RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]));
        img.composite(1, 0, Rgba([255, 0, 0, 255]), 255);
        assert_eq!(img.get_pixel(1, 0), &Rgb([255, 0, 0]));
        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_rgba_composite_keeps_untouched_alpha() {
        let mut img = RgbaImage::new(1, 1);
        img.composite(0, 0, Rgba([0, 0, 255, 255]), 0);
        assert_eq!(img.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
        img.composite(0, 0, Rgba([0, 0, 255, 255]), 255);
        assert_eq!(img.get_pixel(0, 0), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_gray_composite() {
        let mut img = GrayImage::from_pixel(1, 1, Luma([255]));
        img.composite(0, 0, Rgba([0, 0, 0, 255]), 255);
        assert_eq!(img.get_pixel(0, 0), &Luma([0]));
        assert_eq!(Surface::dimensions(&img), (1, 1));
    }
}
