//! Parameter types for image operations.
//!
//! These types describe *what* to work on, not *how*. They are the interface
//! between the high-level [`operations`](super::operations) pipeline (which
//! decides whether a file is resized, copied or skipped) and the
//! [`backend`](super::backend) (which does the actual pixel work).
//!
//! ## Types
//!
//! - [`SourceFormat`] — The three supported codecs, detected from the extension.
//! - [`DecodePolicy`] — Whether a JPEG pixel-decode failure aborts or is logged.
//! - [`SourceImage`] — The raw bytes of one input file plus its format.

use crate::naming;
use std::path::Path;

/// Supported input (and output) formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Jpeg,
    Png,
    Gif,
}

impl SourceFormat {
    /// Detect the format from a path's extension, case-insensitively.
    ///
    /// Returns `None` for anything that is not `.jpg`, `.jpeg`, `.png` or `.gif`.
    /// A name that is only an extension, like `.png`, still counts.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = naming::extension(path)?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// The matching `image` crate format.
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Png => image::ImageFormat::Png,
            Self::Gif => image::ImageFormat::Gif,
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Jpeg => write!(f, "JPEG"),
            Self::Png => write!(f, "PNG"),
            Self::Gif => write!(f, "GIF"),
        }
    }
}

/// How to treat a JPEG whose pixel data is damaged.
///
/// - `Lenient`: log the damage and carry on with whatever pixels could be
///   recovered. With none at all, only the header dimensions are known; if no
///   resize turns out to be needed the source is copied as-is.
/// - `Strict`: fail immediately.
///
/// PNG and GIF decode failures always fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    #[default]
    Lenient,
    Strict,
}

impl DecodePolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Lenient }
    }
}

/// Raw bytes of one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pub format: SourceFormat,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_supported_extensions() {
        assert_eq!(SourceFormat::from_path(Path::new("a.jpg")), Some(SourceFormat::Jpeg));
        assert_eq!(SourceFormat::from_path(Path::new("a.jpeg")), Some(SourceFormat::Jpeg));
        assert_eq!(SourceFormat::from_path(Path::new("a.png")), Some(SourceFormat::Png));
        assert_eq!(SourceFormat::from_path(Path::new("a.gif")), Some(SourceFormat::Gif));
    }

    #[test]
    fn detection_is_case_insensitive() {
        assert_eq!(SourceFormat::from_path(Path::new("A.JPG")), Some(SourceFormat::Jpeg));
        assert_eq!(SourceFormat::from_path(Path::new("dir/b.Png")), Some(SourceFormat::Png));
        assert_eq!(SourceFormat::from_path(Path::new("c.GiF")), Some(SourceFormat::Gif));
    }

    #[test]
    fn unsupported_extensions_are_none() {
        assert_eq!(SourceFormat::from_path(Path::new("a.bmp")), None);
        assert_eq!(SourceFormat::from_path(Path::new("a.webp")), None);
        assert_eq!(SourceFormat::from_path(Path::new("noext")), None);
        assert_eq!(SourceFormat::from_path(Path::new("trailing.")), None);
    }

    #[test]
    fn bare_extension_name_is_detected() {
        assert_eq!(SourceFormat::from_path(Path::new(".png")), Some(SourceFormat::Png));
        assert_eq!(SourceFormat::from_path(Path::new("dir/.JPG")), Some(SourceFormat::Jpeg));
    }

    #[test]
    fn decode_policy_default_is_lenient() {
        assert_eq!(DecodePolicy::default(), DecodePolicy::Lenient);
        assert_eq!(DecodePolicy::from_strict(true), DecodePolicy::Strict);
        assert_eq!(DecodePolicy::from_strict(false), DecodePolicy::Lenient);
    }
}
