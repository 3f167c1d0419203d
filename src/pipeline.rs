use std::collections::HashSet;
use std::fs::{self, Permissions};
use std::path::{Path, PathBuf};
use std::time::Instant;

use image::ImageFormat;
use log::{debug, info, warn};

use crate::config::RecolorConfig;
use crate::error::{RecolorError, Result};
use crate::image::Image;
use crate::output::resolve_output_path;
use crate::prompt::Confirm;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Written(PathBuf),
    /// The output existed and the overwrite was declined.
    Skipped(PathBuf),
}

#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub result: Result<FileOutcome>,
}

impl FileReport {
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Mode for the temporary output file: 0o666 filtered through the umask,
/// like any plain create. tempfile would otherwise use 0o600.
#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}

/// Decodes `input`, recolours it and writes `output`. The image is encoded
/// into a temporary file next to `output` and renamed over it, so a
/// failure leaves nothing behind.
pub fn process_file(input: &Path, output: &Path, config: &RecolorConfig) -> Result<()> {
    let output_format = ImageFormat::from_path(output)
        .map_err(|err| RecolorError::unsupported_format(output, err))?;

    let decode = Instant::now();
    let reader = image::ImageReader::open(input)
        .map_err(|err| RecolorError::io(input, err))?
        .with_guessed_format()
        .map_err(|err| RecolorError::io(input, err))?;
    let source = reader
        .decode()
        .map_err(|err| RecolorError::unsupported_format(input, err))?;
    debug!("decode file: {:.2?}", decode.elapsed());

    let image = Image::from_dynamic(&source)?;
    let recolored = config.recolor().process(image)?;

    let encode = Instant::now();
    let keep_alpha = !matches!(output_format, ImageFormat::Jpeg);
    let result = recolored.to_dynamic(keep_alpha);

    let out_dir = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&out_dir).map_err(|err| RecolorError::io(&out_dir, err))?;

    let existing = fs::metadata(output).ok().map(|metadata| metadata.permissions());
    let mut builder = tempfile::Builder::new();
    builder.prefix(".recolor-");
    if let Some(permissions) = default_permissions() {
        builder.permissions(permissions);
    }
    let temp = builder
        .tempfile_in(&out_dir)
        .map_err(|err| RecolorError::io(&out_dir, err))?;
    result
        .save_with_format(temp.path(), output_format)
        .map_err(|err| RecolorError::unsupported_format(output, err))?;
    temp.persist(output)
        .map_err(|err| RecolorError::io(output, err.error))?;
    // a replaced file keeps its own mode
    if let Some(permissions) = existing {
        fs::set_permissions(output, permissions).map_err(|err| RecolorError::io(output, err))?;
    }
    debug!("encode file: {:.2?}", encode.elapsed());

    Ok(())
}

/// Handles each input on its own: a failing file is reported and the
/// batch moves on.
pub fn run_batch(config: &RecolorConfig, inputs: &[PathBuf], confirm: &mut dyn Confirm) -> Vec<FileReport> {
    let mut written: HashSet<PathBuf> = HashSet::new();
    inputs
        .iter()
        .map(|input| {
            let now = Instant::now();
            let result = run_one(config, input, confirm, &mut written);
            match &result {
                Ok(FileOutcome::Written(path)) => {
                    info!("{} -> {} ({:.2?})", input.display(), path.display(), now.elapsed())
                }
                Ok(FileOutcome::Skipped(path)) => {
                    info!("{} exists, nothing done", path.display())
                }
                Err(err) => warn!("{}: {}", input.display(), err),
            }
            FileReport {
                input: input.clone(),
                result,
            }
        })
        .collect()
}

/// `written` holds the outputs produced earlier in the batch. Two inputs
/// that map to the same output (same file name with `--outdir`) must not
/// overwrite each other.
fn run_one(
    config: &RecolorConfig,
    input: &Path,
    confirm: &mut dyn Confirm,
    written: &mut HashSet<PathBuf>,
) -> Result<FileOutcome> {
    let plan = resolve_output_path(input, &config.output)?;
    if written.contains(&plan.path) {
        return Err(RecolorError::InvalidArgument(format!(
            "{} was already written by an earlier input of this run",
            plan.path.display()
        )));
    }
    if plan.overwrites && !config.force && !confirm.confirm_overwrite(&plan.path) {
        return Ok(FileOutcome::Skipped(plan.path));
    }
    process_file(input, &plan.path, config)?;
    written.insert(plan.path.clone());
    Ok(FileOutcome::Written(plan.path))
}
