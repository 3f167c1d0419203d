//! Colour space transforms between RGB and HSV.
//!
//! All channels live in [0, 1], hue included (a full turn is 1.0, not 360).
//! Gray pixels get hue 0 and saturation 0, black gets saturation 0.

use crate::parallel::prelude::*;
use crate::pixels::{ImageBuffer, Pixel, SubPixel};

const ONE_SIXTH: SubPixel = 1.0 / 6.0;

/// Wraps a hue into [0, 1). `rem_euclid` can round a tiny negative
/// input up to exactly 1.0, which is folded back to 0.
#[inline]
pub fn wrap_hue(h: SubPixel) -> SubPixel {
    let wrapped = h.rem_euclid(1.0);
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

#[inline]
pub fn rgb_to_hsv(src: Pixel) -> Pixel {
    let [r, g, b] = src;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        (g - b) / delta
    } else if max == g {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };

    [wrap_hue(h * ONE_SIXTH), s, v]
}

#[inline]
pub fn hsv_to_rgb(src: Pixel) -> Pixel {
    let [h, s, v] = src;
    let h6 = wrap_hue(h) * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;

    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let rgb = match sector as u32 % 6 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    };
    rgb.map(|c| c.clamp(0.0, 1.0))
}

pub fn rgb_to_hsv_buffer(image_buffer: &mut ImageBuffer) {
    image_buffer.par_iter_mut().for_each(
        |pixel| {
            *pixel = rgb_to_hsv(*pixel)
        }
    );
}

pub fn hsv_to_rgb_buffer(image_buffer: &mut ImageBuffer) {
    image_buffer.par_iter_mut().for_each(
        |pixel| {
            *pixel = hsv_to_rgb(*pixel)
        }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use color::ColorSpaceTag;

    const EPS: SubPixel = 1e-5;

    fn assert_close(a: Pixel, b: Pixel) {
        for c in 0..3 {
            assert!((a[c] - b[c]).abs() < EPS, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_primaries(){
        assert_close(rgb_to_hsv([1.0, 0.0, 0.0]), [0.0, 1.0, 1.0]);
        assert_close(rgb_to_hsv([0.0, 1.0, 0.0]), [1.0 / 3.0, 1.0, 1.0]);
        assert_close(rgb_to_hsv([0.0, 0.0, 1.0]), [2.0 / 3.0, 1.0, 1.0]);
        assert_close(rgb_to_hsv([1.0, 0.0, 1.0]), [5.0 / 6.0, 1.0, 1.0]);
    }

    #[test]
    fn test_gray_and_black(){
        assert_close(rgb_to_hsv([0.5, 0.5, 0.5]), [0.0, 0.0, 0.5]);
        assert_close(rgb_to_hsv([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
        assert_close(hsv_to_rgb([0.7, 0.0, 0.25]), [0.25, 0.25, 0.25]);
    }

    #[test]
    fn test_round_trip(){
        let steps = [0.0, 0.1, 0.25, 0.4, 0.5, 0.66, 0.8, 0.95, 1.0];
        for r in steps {
            for g in steps {
                for b in steps {
                    let rgb = [r, g, b];
                    assert_close(hsv_to_rgb(rgb_to_hsv(rgb)), rgb);
                }
            }
        }
    }

    #[test]
    fn test_hue_agrees_with_hwb(){
        // HWB shares the HSV hue, in degrees
        let samples = [[0.9, 0.2, 0.1], [0.1, 0.6, 0.3], [0.3, 0.2, 0.8], [0.7, 0.1, 0.6]];
        for rgb in samples {
            let [hue_degrees, _, _] = ColorSpaceTag::Srgb.convert(ColorSpaceTag::Hwb, rgb);
            let hsv = rgb_to_hsv(rgb);
            assert!((hsv[0] * 360.0 - hue_degrees).abs() < 1e-2, "{:?}: {} vs {}", rgb, hsv[0] * 360.0, hue_degrees);
        }
    }

    #[test]
    fn test_wrap_hue(){
        assert_eq!(wrap_hue(1.0), 0.0);
        assert!((wrap_hue(-0.25) - 0.75).abs() < EPS);
        assert!((wrap_hue(1.5) - 0.5).abs() < EPS);
        assert!(wrap_hue(-1e-9) < 1.0);
    }

    #[test]
    fn test_buffer_conversion(){
        let mut data: ImageBuffer = vec![[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        rgb_to_hsv_buffer(&mut data);
        assert_close(data[1], [2.0 / 3.0, 1.0, 1.0]);
        hsv_to_rgb_buffer(&mut data);
        assert_close(data[0], [1.0, 0.0, 0.0]);
        assert_close(data[1], [0.0, 0.0, 1.0]);
    }
}
