//! Image processing in pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Detect** | file extension, case-insensitive |
//! | **Decode JPEG / PNG** | `image` crate |
//! | **Decode / encode GIF** | `gif` crate, frame by frame |
//! | **Resize** | Lanczos3 |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for ratio and dimension math (unit testable)
//! - **Parameters**: Formats, decode policy, source bytes
//! - **Palette**: Indexed ↔ RGBA conversion and palette rebuilding
//! - **Animation**: GIF frame model and per-frame resizing
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: The file-level pipeline combining calculations + backend

pub mod animation;
pub mod backend;
mod calculations;
mod operations;
mod palette;
mod params;
pub mod rust_backend;

pub use animation::{AnimatedImage, DecodedFrame};
pub use backend::{Content, DecodedImage, Dimensions, ImageBackend, ResizeError};
pub use calculations::{compute_ratio, scaled_dimensions};
pub use operations::{ResizeOptions, ResizeOutcome, resize_file, resize_image};
pub use params::{DecodePolicy, SourceFormat, SourceImage};
pub use rust_backend::RustBackend;
