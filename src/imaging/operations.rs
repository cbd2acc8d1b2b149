//! High-level resize pipeline.
//!
//! These functions combine calculations with backend execution. They decide
//! whether a file is skipped, copied or re-encoded, own every filesystem
//! access, and hand the pixel work to an [`ImageBackend`].

use super::backend::{Dimensions, ImageBackend, ResizeError};
use super::calculations::compute_ratio;
use super::params::{DecodePolicy, SourceFormat, SourceImage};
use super::rust_backend::RustBackend;
use crate::config::ResizeConfig;
use crate::naming::{SUFFIX_REQUIRED, output_path};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, ResizeError>;

/// What the pipeline did with one source file.
#[derive(Debug, Clone, PartialEq)]
pub enum ResizeOutcome {
    /// Extension is not JPEG, PNG or GIF; nothing was read or written.
    Skipped,
    /// Already within bounds; the source bytes were copied verbatim.
    Copied { output: PathBuf },
    /// Resampled and re-encoded in the source format.
    Resized {
        output: PathBuf,
        width: u32,
        height: u32,
    },
}

/// Knobs that don't change what the output looks like.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResizeOptions {
    pub policy: DecodePolicy,
    /// Refuse sources larger than this many bytes.
    pub max_input_bytes: Option<u64>,
}

impl ResizeOptions {
    pub fn from_config(config: &ResizeConfig) -> Self {
        Self {
            policy: config.decode_policy(),
            max_input_bytes: config.limits.max_input_bytes,
        }
    }
}

/// Read the source file into memory, enforcing the size limit first.
fn read_source(path: &Path, format: SourceFormat, limit: Option<u64>) -> Result<SourceImage> {
    if let Some(limit) = limit {
        let size = fs::metadata(path)
            .map_err(|e| ResizeError::io(path, e))?
            .len();
        if size > limit {
            return Err(ResizeError::InputTooLarge {
                path: path.to_path_buf(),
                size,
                limit,
            });
        }
    }
    let bytes = fs::read(path).map_err(|e| ResizeError::io(path, e))?;
    Ok(SourceImage { format, bytes })
}

/// Shrink `source` to fit inside `max_dimension` and write it next to the
/// original with `suffix` inserted before the extension.
///
/// - Unsupported extensions are a successful no-op ([`ResizeOutcome::Skipped`]).
/// - Images already within bounds are copied byte-for-byte.
/// - The source file is never modified.
pub fn resize_file(
    backend: &impl ImageBackend,
    source: &Path,
    max_dimension: f64,
    suffix: &str,
    options: &ResizeOptions,
) -> Result<ResizeOutcome> {
    if suffix.is_empty() {
        return Err(ResizeError::Validation(SUFFIX_REQUIRED.into()));
    }
    if !max_dimension.is_finite() || max_dimension <= 0.0 {
        return Err(ResizeError::Validation(format!(
            "max dimension must be positive, got {max_dimension}"
        )));
    }

    let Some(format) = SourceFormat::from_path(source) else {
        log::debug!("{}: unsupported extension, skipping", source.display());
        return Ok(ResizeOutcome::Skipped);
    };

    let image = read_source(source, format, options.max_input_bytes)?;
    let decoded = backend.decode(&image, options.policy)?;
    let Dimensions { width, height } = decoded.dimensions;
    let ratio = compute_ratio(width as f64, height as f64, max_dimension);
    log::debug!(
        "{}: {format} {width}x{height}, bound {max_dimension}, ratio {ratio}",
        source.display()
    );

    let output = output_path(source, suffix);
    if ratio == 1.0 {
        fs::write(&output, &image.bytes).map_err(|e| ResizeError::io(&output, e))?;
        log::info!("{} -> {} (copied)", source.display(), output.display());
        return Ok(ResizeOutcome::Copied { output });
    }

    let file = File::create(&output).map_err(|e| ResizeError::io(&output, e))?;
    let mut writer = BufWriter::new(file);
    let resized = backend.encode(decoded, ratio, &mut writer)?;
    writer.flush().map_err(|e| ResizeError::io(&output, e))?;

    log::info!(
        "{} -> {} ({}x{})",
        source.display(),
        output.display(),
        resized.width,
        resized.height
    );
    Ok(ResizeOutcome::Resized {
        output,
        width: resized.width,
        height: resized.height,
    })
}

/// [`resize_file`] with the built-in backend and settings from `config`.
pub fn resize_image(source: &Path, config: &ResizeConfig) -> Result<ResizeOutcome> {
    resize_file(
        &RustBackend::new(),
        source,
        config.max_dimension,
        &config.suffix,
        &ResizeOptions::from_config(config),
    )
}
