use image::{DynamicImage, ImageBuffer as RasterBuffer, Rgb, Rgba};

use crate::error::{RecolorError, Result};
use crate::pixels::{ImageBuffer, Pixel, SubPixel};

/// A decoded image as floating point RGB (or HSV, depending on the stage)
/// samples in [0, 1], stored row-major. Alpha, if the source had any,
/// rides along untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub data: ImageBuffer,
    pub height: usize,
    pub width: usize,
    pub alpha: Option<Vec<SubPixel>>,
}

impl Image {
    pub fn new(data: ImageBuffer, width: usize, height: usize) -> Result<Image> {
        if data.is_empty() {
            return Err(RecolorError::EmptyImage);
        }
        if width * height != data.len() {
            return Err(RecolorError::InvalidArgument(format!(
                "{width}x{height} image needs {} pixels, got {}",
                width * height,
                data.len()
            )));
        }
        Ok(Image {
            data,
            height,
            width,
            alpha: None,
        })
    }

    /// Solid image, mostly handy for tests and previews.
    pub fn filled(pixel: Pixel, width: usize, height: usize) -> Result<Image> {
        Image::new(vec![pixel; width * height], width, height)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn from_dynamic(source: &DynamicImage) -> Result<Image> {
        let width = source.width() as usize;
        let height = source.height() as usize;

        let mut image = if source.color().has_alpha() {
            let rgba = source.to_rgba32f();
            let (data, alpha): (ImageBuffer, Vec<SubPixel>) = rgba
                .pixels()
                .map(|Rgba([r, g, b, a])| ([*r, *g, *b], *a))
                .unzip();
            let mut image = Image::new(data, width, height)?;
            image.alpha = Some(alpha);
            image
        } else {
            let rgb = source.to_rgb32f();
            let data = rgb.pixels().map(|Rgb(p)| *p).collect();
            Image::new(data, width, height)?
        };
        image.data.iter_mut().for_each(|p| *p = p.map(|c| c.clamp(0.0, 1.0)));
        return Ok(image);
    }

    /// Quantizes back to 8 bits per channel. `keep_alpha = false` drops the
    /// alpha plane for encoders that cannot store it.
    pub fn to_dynamic(&self, keep_alpha: bool) -> DynamicImage {
        let to_u8 = |x: SubPixel| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
        let width = self.width as u32;
        let height = self.height as u32;

        match (&self.alpha, keep_alpha) {
            (Some(alpha), true) => {
                let buffer = RasterBuffer::from_fn(width, height, |x, y| {
                    let idx = y as usize * self.width + x as usize;
                    let [r, g, b] = self.data[idx].map(to_u8);
                    Rgba([r, g, b, to_u8(alpha[idx])])
                });
                DynamicImage::ImageRgba8(buffer)
            }
            _ => {
                let buffer = RasterBuffer::from_fn(width, height, |x, y| {
                    let idx = y as usize * self.width + x as usize;
                    Rgb(self.data[idx].map(to_u8))
                });
                DynamicImage::ImageRgb8(buffer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{RgbImage, RgbaImage};

    #[test]
    fn test_new_rejects_empty(){
        assert!(matches!(Image::new(vec![], 0, 0), Err(RecolorError::EmptyImage)));
        assert!(matches!(Image::new(vec![], 4, 4), Err(RecolorError::EmptyImage)));
    }

    #[test]
    fn test_new_rejects_size_mismatch(){
        let err = Image::new(vec![[0.0; 3]; 3], 2, 2).unwrap_err();
        assert!(matches!(err, RecolorError::InvalidArgument(_)));
        assert!(err.to_string().contains("2x2"), "{err}");
    }

    #[test]
    fn test_from_rgb8(){
        let mut source = RgbImage::new(2, 1);
        source.put_pixel(0, 0, Rgb([255, 0, 0]));
        source.put_pixel(1, 0, Rgb([0, 51, 255]));
        let image = Image::from_dynamic(&DynamicImage::ImageRgb8(source)).unwrap();

        assert_eq!(image.width, 2);
        assert_eq!(image.height, 1);
        assert!(image.alpha.is_none());
        assert_eq!(image.data[0], [1.0, 0.0, 0.0]);
        assert!((image.data[1][1] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_alpha_survives_round_trip(){
        let mut source = RgbaImage::new(1, 2);
        source.put_pixel(0, 0, Rgba([10, 20, 30, 128]));
        source.put_pixel(0, 1, Rgba([200, 100, 0, 0]));
        let image = Image::from_dynamic(&DynamicImage::ImageRgba8(source.clone())).unwrap();
        assert!(image.alpha.is_some());

        let back = image.to_dynamic(true).to_rgba8();
        assert_eq!(back, source);

        let flat = image.to_dynamic(false);
        assert!(!flat.color().has_alpha());
    }

    #[test]
    fn test_row_major_layout(){
        let mut source = RgbImage::new(2, 2);
        source.put_pixel(1, 0, Rgb([255, 255, 255]));
        let image = Image::from_dynamic(&DynamicImage::ImageRgb8(source)).unwrap();
        assert_eq!(image.data[1], [1.0, 1.0, 1.0]);
        assert_eq!(image.data[2], [0.0, 0.0, 0.0]);
    }
}
