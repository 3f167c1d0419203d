//! The colour shift itself: find the most saturated pixel, measure how far
//! it is from the target in HSV, and move every pixel by that amount
//! weighted by a saturation mask.

use std::time::Instant;

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::cst::{hsv_to_rgb_buffer, rgb_to_hsv, rgb_to_hsv_buffer, wrap_hue};
use crate::error::{RecolorError, Result};
use crate::image::Image;
use crate::mask::{Mask, SaturationMask, DEFAULT_MASK_GAIN};
use crate::parallel::prelude::*;
use crate::pixels::{Pixel, PixelOps, SubPixel};

/// How the saturation channel follows the target.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SaturationMode {
    /// Add the saturation difference, `s + mask * diff_s`.
    #[default]
    Offset,
    /// Scale by the saturation ratio, `s * mask * factor_s + s * (1 - mask)`.
    Scale,
}

/// HSV sample of the most saturated pixel, the colour the image is
/// assumed to be drawn in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DominantColor {
    pub index: usize,
    pub hsv: Pixel,
}

impl DominantColor {
    /// Expects `image` in HSV. Ties resolve to the first pixel in row-major
    /// order.
    pub fn find(image: &Image) -> Result<DominantColor> {
        let mut best: Option<DominantColor> = None;
        for (index, pixel) in image.data.iter().enumerate() {
            match best {
                Some(current) if pixel.saturation() <= current.hsv.saturation() => {}
                _ => best = Some(DominantColor { index, hsv: *pixel }),
            }
        }
        best.ok_or(RecolorError::EmptyImage)
    }
}

/// Offsets and ratios from the dominant colour to the target, both HSV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorShift {
    pub diff_h: SubPixel,
    pub diff_s: SubPixel,
    pub factor_s: SubPixel,
    pub factor_v: SubPixel,
}

impl ColorShift {
    pub fn new(original: Pixel, target: Pixel) -> ColorShift {
        let factor = |t: SubPixel, o: SubPixel| if o != 0.0 { t / o } else { 1.0 };
        ColorShift {
            diff_h: target.hue() - original.hue(),
            diff_s: target.saturation() - original.saturation(),
            factor_s: factor(target.saturation(), original.saturation()),
            factor_v: factor(target.value(), original.value()),
        }
    }

    /// Shifts a single HSV pixel with blend weight `mask`.
    #[inline]
    pub fn apply(&self, pixel: Pixel, mask: SubPixel, value_factor: SubPixel, saturation_mode: SaturationMode) -> Pixel {
        let [h, s, v] = pixel;
        let inv_mask = 1.0 - mask;

        let out_h = wrap_hue(h + mask * self.diff_h);
        let out_s = match saturation_mode {
            SaturationMode::Offset => s + mask * self.diff_s,
            SaturationMode::Scale => s * mask * self.factor_s + s * inv_mask,
        };
        let raw_v = v * mask * self.factor_v + v * inv_mask;
        let out_v = value_factor * raw_v + (1.0 - value_factor) * v;

        [out_h, out_s.clamp(0.0, 1.0), out_v.clamp(0.0, 1.0)]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recolor {
    /// Target colour as RGB in [0, 1]
    pub target: Pixel,
    pub value_factor: SubPixel,
    pub mask_gain: SubPixel,
    pub saturation_mode: SaturationMode,
}

impl Recolor {
    pub fn new(target: Pixel, value_factor: SubPixel) -> Recolor {
        Recolor {
            target,
            value_factor,
            mask_gain: DEFAULT_MASK_GAIN,
            saturation_mode: SaturationMode::Offset,
        }
    }

    /// Takes an RGB image and returns the recoloured RGB image.
    pub fn process(&self, mut image: Image) -> Result<Image> {
        if image.is_empty() {
            return Err(RecolorError::EmptyImage);
        }
        let now = Instant::now();

        rgb_to_hsv_buffer(&mut image.data);
        let target = rgb_to_hsv(self.target.map(|c| c.clamp(0.0, 1.0)));
        let original = DominantColor::find(&image)?;
        debug!("dominant color hsv {:?} at pixel {}, target hsv {:?}", original.hsv, original.index, target);

        let mask = SaturationMask::new(original.hsv.saturation(), self.mask_gain)?;
        let mask_value = mask.create(&image);
        debug!("{} reference saturation {}", mask.get_name(), mask.reference_saturation);
        let shift = ColorShift::new(original.hsv, target);
        debug!("{:?}", shift);

        image.data.par_iter_mut().zip(mask_value.par_iter()).for_each(
            |(pixel, pixel_mask_value)| {
                *pixel = shift.apply(*pixel, *pixel_mask_value, self.value_factor, self.saturation_mode);
            }
        );

        hsv_to_rgb_buffer(&mut image.data);
        debug!("{} execution time: {:.2?}", self.get_name(), now.elapsed());
        return Ok(image);
    }

    pub fn get_name(&self) -> String {
        "Recolor".to_string()
    }
}

/// Shifts the dominant colour of `image` (RGB) toward `target` (RGB).
/// `value_factor` blends the computed brightness change in: 0 keeps the
/// original value channel, 1 applies it fully.
pub fn transform(image: Image, target: Pixel, value_factor: SubPixel) -> Result<Image> {
    Recolor::new(target, value_factor).process(image)
}
