use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color_spec::parse_target_color;
use crate::error::{RecolorError, Result};
use crate::mask::DEFAULT_MASK_GAIN;
use crate::output::OutputTarget;
use crate::pixels::{Pixel, SubPixel};
use crate::recolor::{Recolor, SaturationMode};

/// Optional TOML defaults, e.g.
///
/// ```toml
/// color = "#1e90ff"
/// value_factor = 0.5
/// outdir = "recolored"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub color: Option<String>,
    pub value_factor: Option<SubPixel>,
    pub mask_gain: Option<SubPixel>,
    pub saturation_mode: Option<SaturationMode>,
    pub outdir: Option<PathBuf>,
    pub force: Option<bool>,
}

pub fn parse_config(config_path: &Path) -> Result<FileConfig> {
    let data_string = std::fs::read_to_string(config_path).map_err(|err| RecolorError::Config {
        path: config_path.to_path_buf(),
        reason: err.to_string(),
    })?;
    parse_config_str(&data_string).map_err(|reason| RecolorError::Config {
        path: config_path.to_path_buf(),
        reason,
    })
}

fn parse_config_str(data: &str) -> std::result::Result<FileConfig, String> {
    toml::from_str(data).map_err(|err| err.to_string())
}

/// Options as given on the command line, before defaults are merged in.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub color: Option<String>,
    pub value_factor: Option<SubPixel>,
    pub saturation_mode: Option<SaturationMode>,
    pub outdir: Option<PathBuf>,
    pub outfile: Option<PathBuf>,
    pub force: bool,
}

/// Everything one run needs, resolved and validated.
#[derive(Debug, Clone, PartialEq)]
pub struct RecolorConfig {
    pub target: Pixel,
    pub value_factor: SubPixel,
    pub mask_gain: SubPixel,
    pub saturation_mode: SaturationMode,
    pub output: OutputTarget,
    pub force: bool,
}

impl RecolorConfig {
    pub fn new(target: Pixel) -> RecolorConfig {
        RecolorConfig {
            target,
            value_factor: 0.0,
            mask_gain: DEFAULT_MASK_GAIN,
            saturation_mode: SaturationMode::Offset,
            output: OutputTarget::Beside,
            force: false,
        }
    }

    /// Command line values win over the config file. `input_count` is used
    /// to reject `--outfile` with several inputs.
    pub fn resolve(overrides: Overrides, file: FileConfig, input_count: usize) -> Result<RecolorConfig> {
        let color = overrides.color.or(file.color).ok_or(RecolorError::MissingColor)?;
        let target = parse_target_color(&color)?;

        let value_factor = overrides.value_factor.or(file.value_factor).unwrap_or(0.0);
        if !value_factor.is_finite() {
            return Err(RecolorError::InvalidArgument(format!("value factor must be finite, got {value_factor}")));
        }

        let mask_gain = file.mask_gain.unwrap_or(DEFAULT_MASK_GAIN);
        if !(mask_gain.is_finite() && mask_gain > 0.0) {
            return Err(RecolorError::InvalidArgument(format!("mask gain must be positive, got {mask_gain}")));
        }

        let output = match (overrides.outfile, overrides.outdir.or(file.outdir)) {
            (Some(_), _) if input_count > 1 => {
                return Err(RecolorError::InvalidArgument(
                    "--outfile can only be used with a single input file".to_string(),
                ))
            }
            (Some(path), _) => OutputTarget::File(path),
            (None, Some(dir)) => OutputTarget::Directory(dir),
            (None, None) => OutputTarget::Beside,
        };

        Ok(RecolorConfig {
            target,
            value_factor,
            mask_gain,
            saturation_mode: overrides.saturation_mode.or(file.saturation_mode).unwrap_or_default(),
            output,
            force: overrides.force || file.force.unwrap_or(false),
        })
    }

    pub fn recolor(&self) -> Recolor {
        Recolor {
            target: self.target,
            value_factor: self.value_factor,
            mask_gain: self.mask_gain,
            saturation_mode: self.saturation_mode,
        }
    }
}
