//! Parsing of the `--color` argument.
//!
//! Anything CSS Color 4 accepts works: `#f00`, `#ff0000`, `rgb(255, 0, 0)`,
//! `rgb(100% 0% 0%)`, `hsl(359, 100%, 50%)`, `rebeccapurple`, ...
//! Alpha is ignored.

use color::{parse_color, Srgb};

use crate::error::{RecolorError, Result};
use crate::pixels::Pixel;

pub fn parse_target_color(spec: &str) -> Result<Pixel> {
    let trimmed = spec.trim();
    if trimmed.is_empty() {
        return Err(RecolorError::MissingColor);
    }

    let parsed = parse_color(trimmed).map_err(|err| RecolorError::InvalidColor {
        spec: spec.to_string(),
        reason: err.to_string(),
    })?;
    let [r, g, b, _alpha] = parsed.to_alpha_color::<Srgb>().components;

    let rgb = [r, g, b];
    if rgb.iter().any(|c| !c.is_finite()) {
        return Err(RecolorError::InvalidColor {
            spec: spec.to_string(),
            reason: "color has no sRGB representation".to_string(),
        });
    }
    Ok(rgb.map(|c| c.clamp(0.0, 1.0)))
}
