//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: decode (pixels + declared dimensions) and encode (resample by a
//! ratio and write the same format back out).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image` and
//! `gif` crates.

use super::animation::AnimatedImage;
use super::params::{DecodePolicy, SourceFormat, SourceImage};
use image::DynamicImage;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error("Invalid argument: {0}")]
    Validation(String),
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
    #[error("{} is {size} bytes, over the {limit} byte limit", .path.display())]
    InputTooLarge { path: PathBuf, size: u64, limit: u64 },
}

impl ResizeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Declared image size, as read from the file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Pixel content of a decoded image.
#[derive(Debug)]
pub enum Content {
    /// Single-frame JPEG or PNG.
    Still(DynamicImage),
    /// Every frame of a GIF, with its own rectangle and palette.
    Animated(AnimatedImage),
    /// Pixel decode failed under [`DecodePolicy::Lenient`]; holds the reason.
    Unavailable(String),
}

/// Result of decoding a [`SourceImage`].
#[derive(Debug)]
pub struct DecodedImage {
    pub format: SourceFormat,
    pub dimensions: Dimensions,
    pub content: Content,
}

/// Trait for image processing backends.
///
/// Backends never touch the filesystem: they receive bytes and write to a
/// caller-owned writer, so the pipeline alone decides which paths are read
/// and created.
pub trait ImageBackend {
    /// Decode pixels and declared dimensions from the source bytes.
    fn decode(
        &self,
        source: &SourceImage,
        policy: DecodePolicy,
    ) -> Result<DecodedImage, ResizeError>;

    /// Resample `image` by `ratio` and encode it in its original format.
    ///
    /// Returns the dimensions of the encoded image.
    fn encode(
        &self,
        image: DecodedImage,
        ratio: f64,
        output: &mut dyn Write,
    ) -> Result<Dimensions, ResizeError>;
}
