use crate::error::{RecolorError, Result};
use crate::image::Image;
use crate::parallel::prelude::*;
use crate::pixels::{BufferOps, SubPixel};

pub const DEFAULT_MASK_GAIN: SubPixel = 32.0;

/// Per-pixel blend weight in [0, 1], same length as the image buffer.
pub trait Mask: Sync {
    fn create(&self, image: &Image) -> Vec<SubPixel>;
    fn get_name(&self) -> String;
}

/// Weights each pixel by its saturation relative to a reference
/// saturation. Reaches full weight at `reference / gain`.
#[derive(Debug, Clone, PartialEq)]
pub struct SaturationMask {
    pub reference_saturation: SubPixel,
    pub gain: SubPixel,
}

impl SaturationMask {
    pub fn new(reference_saturation: SubPixel, gain: SubPixel) -> Result<SaturationMask> {
        if reference_saturation <= 0.0 || !reference_saturation.is_finite() {
            return Err(RecolorError::DegenerateSaturation);
        }
        if gain <= 0.0 || !gain.is_finite() {
            return Err(RecolorError::InvalidArgument(format!("mask gain must be positive, got {gain}")));
        }
        Ok(SaturationMask {
            reference_saturation,
            gain,
        })
    }

    #[inline]
    pub fn mask(&self, saturation: SubPixel) -> SubPixel {
        (saturation / self.reference_saturation * self.gain).clamp(0.0, 1.0)
    }
}

impl Mask for SaturationMask {
    fn create(&self, image: &Image) -> Vec<SubPixel> {
        let saturation = image.data.saturation_channel();
        saturation.par_iter().map(|s| self.mask(*s)).collect()
    }

    fn get_name(&self) -> String {
        "SaturationMask".to_string()
    }
}
