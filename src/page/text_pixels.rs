//! Loading text-pixel masks produced by an external differential renderer

use std::path::Path;

use image::DynamicImage;

use crate::grid::PixelMask;
use crate::Result;

/// Mask images mark text pixels light on a dark background.
pub const TEXT_LUMA_THRESHOLD: u8 = 128;

/// A pixel is text when its 8-bit luma is at least [`TEXT_LUMA_THRESHOLD`].
pub fn from_image(image: &DynamicImage) -> Result<PixelMask> {
    let luma = image.to_luma8();
    let (w, h) = luma.dimensions();
    let cells = luma.pixels().map(|p| p.0[0] >= TEXT_LUMA_THRESHOLD).collect();
    PixelMask::from_vec(w as usize, h as usize, cells)
}

pub fn open<P: AsRef<Path>>(path: P) -> Result<PixelMask> {
    let image = image::open(path)?;
    from_image(&image)
}

/// Render a mask the way [`from_image`] reads it back: text white, rest black.
pub fn to_image(mask: &PixelMask) -> image::GrayImage {
    image::GrayImage::from_fn(mask.width() as u32, mask.height() as u32, |x, y| {
        image::Luma([if mask[(x as usize, y as usize)] { 255 } else { 0 }])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_pixels_are_text() {
        let mut img = image::GrayImage::new(3, 1);
        img.put_pixel(0, 0, image::Luma([127]));
        img.put_pixel(1, 0, image::Luma([128]));
        img.put_pixel(2, 0, image::Luma([255]));
        let mask = from_image(&DynamicImage::ImageLuma8(img)).unwrap();
        assert!(!mask[(0, 0)]);
        assert!(mask[(1, 0)]);
        assert!(mask[(2, 0)]);
    }

    #[test]
    fn to_image_reads_back() {
        let mut mask = PixelMask::new(4, 4).unwrap();
        mask[(1, 2)] = true;
        mask[(3, 0)] = true;
        let back = from_image(&DynamicImage::ImageLuma8(to_image(&mask))).unwrap();
        assert_eq!(mask, back);
    }
}
