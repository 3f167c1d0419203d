//! Error types for the recolor library

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecolorError>;

#[derive(Error, Debug)]
pub enum RecolorError {
    /// No target color was given on the command line or in the config file
    #[error("no target color given, use --color")]
    MissingColor,

    #[error("invalid color '{spec}': {reason}")]
    InvalidColor { spec: String, reason: String },

    /// The codec could not read or write the file
    #[error("unsupported image format for {}: {source}", path.display())]
    UnsupportedFormat {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image has no pixels")]
    EmptyImage,

    /// The most saturated pixel is fully gray, so there is no color to shift
    #[error("dominant color has zero saturation, nothing to recolor")]
    DegenerateSaturation,

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl RecolorError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn unsupported_format(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::UnsupportedFormat {
            path: path.into(),
            source,
        }
    }

    /// Short name of the failure kind, used in batch summaries
    pub fn kind(&self) -> &'static str {
        match self {
            RecolorError::MissingColor | RecolorError::InvalidColor { .. } => "InvalidColor",
            RecolorError::UnsupportedFormat { .. } => "UnsupportedFormat",
            RecolorError::EmptyImage => "EmptyImage",
            RecolorError::DegenerateSaturation => "DegenerateSaturation",
            RecolorError::Io { .. } => "Io",
            RecolorError::Config { .. } => "Config",
            RecolorError::InvalidArgument(_) => "InvalidArgument",
        }
    }
}
