//! # imgfit
//!
//! Shrink one JPEG, PNG or GIF so its longer edge fits a bounding box, and
//! write the result next to the original with a suffix before the extension.
//!
//! ```text
//! photos/cat.jpg (4000x3000)  --max 1000 --suffix _web →  photos/cat_web.jpg (1000x750)
//! photos/dog.png (800x600)    --max 1000 --suffix _web →  photos/dog_web.png (byte copy)
//! photos/anim.gif             --max 1000 --suffix _web →  every frame scaled alike
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Format dispatch, decode, ratio, resize, re-encode (incl. animated GIF) |
//! | [`naming`] | Output path derivation (`stem + suffix + ext`) |
//! | [`config`] | Optional TOML config: bound, suffix, decode policy, input limits |
//! | [`output`] | CLI output formatting of pipeline outcomes |
//!
//! # Design Decisions
//!
//! ## Never Upscale, Never Recompress Needlessly
//!
//! The scale ratio is clamped to `(0, 1]`. When an image already fits, the
//! output is a byte-for-byte copy of the input: re-encoding a JPEG that
//! needs no resize would only lose quality.
//!
//! ## Same Format Out
//!
//! A JPEG stays a JPEG, a GIF stays a GIF. Animated GIFs are resized frame
//! by frame, keeping each frame's sub-rectangle, timing and disposal, with
//! a palette rebuilt from the resized pixels.
//!
//! ## Errors Are Values
//!
//! Library code never exits the process. A missing source is an
//! [`imaging::ResizeError::Io`]; the binary decides to exit non-zero.
//! Unsupported extensions are not errors at all, just a skipped outcome.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
