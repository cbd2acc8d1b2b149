//! Output filename derivation.
//!
//! The resized copy lives next to its source, named after it with a suffix
//! inserted before the extension:
//!
//! - `photos/cat.jpg` + `_small` → `photos/cat_small.jpg`
//! - `IMG_0042.JPG` + `-web` → `IMG_0042-web.JPG` (extension casing kept)
//! - `anim.gif` + `.thumb` → `anim.thumb.gif`

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Error text for an empty suffix.
pub const SUFFIX_REQUIRED: &str = "postfix required";

/// Split a file name at its last dot into `(stem, extension)`.
///
/// A leading dot counts too, so `.png` is an empty stem with extension
/// `png`. Names that are not valid UTF-8 fall back to [`Path`]'s own
/// splitting.
fn split_name(source: &Path) -> Option<(&str, &str)> {
    source.file_name()?.to_str()?.rsplit_once('.')
}

/// The extension of `source`'s file name, without the dot.
pub fn extension(source: &Path) -> Option<&str> {
    match split_name(source) {
        Some((_, ext)) => Some(ext),
        None => source.extension()?.to_str(),
    }
}

/// Build the output path for `source` with `suffix` inserted before the extension.
///
/// The extension string is reused verbatim, so detection can be
/// case-insensitive while the output keeps the original casing. A source
/// without an extension simply gets the suffix appended.
pub fn output_path(source: &Path, suffix: &str) -> PathBuf {
    let name = match split_name(source) {
        Some((stem, ext)) => OsString::from(format!("{stem}{suffix}.{ext}")),
        None => {
            let mut name = source.file_stem().map(OsString::from).unwrap_or_default();
            name.push(suffix);
            if let Some(ext) = source.extension() {
                name.push(".");
                name.push(ext);
            }
            name
        }
    };
    source.with_file_name(name)
}
