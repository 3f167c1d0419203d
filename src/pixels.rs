pub type SubPixel = f32;
pub type Pixel = [SubPixel; CHANNELS_PER_PIXEL];
pub type ImageBuffer = Vec<Pixel>;

pub const CHANNELS_PER_PIXEL: usize = 3;

/// Channel accessors for a pixel that holds HSV samples.
pub trait PixelOps {
    fn hue(self) -> SubPixel;
    fn saturation(self) -> SubPixel;
    fn value(self) -> SubPixel;
}

impl PixelOps for Pixel {
    fn hue(self) -> SubPixel {
        self[0]
    }
    fn saturation(self) -> SubPixel {
        self[1]
    }
    fn value(self) -> SubPixel {
        self[2]
    }
}

pub trait BufferOps {
    fn saturation_channel(&self) -> Vec<SubPixel>;
}

impl BufferOps for ImageBuffer {
    fn saturation_channel(&self) -> Vec<SubPixel> {
        self.iter().map(|pixel| pixel.saturation()).collect()
    }
}
