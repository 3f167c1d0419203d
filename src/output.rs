use std::path::{Path, PathBuf};

use crate::error::{RecolorError, Result};

/// Where recoloured files go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputTarget {
    /// Next to the input, as `name.out.ext` (or `name.out.N.ext`)
    #[default]
    Beside,
    /// `<dir>/<input file name>`
    Directory(PathBuf),
    /// A single explicit file
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan {
    pub path: PathBuf,
    /// The path is already taken and writing would replace it.
    pub overwrites: bool,
}

/// `name.ext` -> `name.out.ext`, then `name.out.1.ext`, `name.out.2.ext`, ...
/// until a free path is found.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let extension = input.extension().map(|e| format!(".{}", e.to_string_lossy())).unwrap_or_default();

    let mut candidate = input.with_file_name(format!("{stem}.out{extension}"));
    let mut index = 1;
    while candidate.exists() {
        candidate = input.with_file_name(format!("{stem}.out.{index}{extension}"));
        index += 1;
    }
    return candidate;
}

pub fn resolve_output_path(input: &Path, target: &OutputTarget) -> Result<OutputPlan> {
    let path = match target {
        OutputTarget::Beside => {
            return Ok(OutputPlan {
                path: default_output_path(input),
                overwrites: false,
            })
        }
        OutputTarget::Directory(dir) => {
            let file_name = input.file_name().ok_or_else(|| {
                RecolorError::InvalidArgument(format!("input {} has no file name", input.display()))
            })?;
            dir.join(file_name)
        }
        OutputTarget::File(path) => path.clone(),
    };
    let overwrites = path.exists();
    Ok(OutputPlan { path, overwrites })
}
