//! Animated GIF decode, per-frame resize, and encode.
//!
//! The `image` crate's animation API composites every frame onto the full
//! canvas, which throws away what a GIF frame really is: a sub-rectangle
//! with its own palette and offset. This module talks to the `gif` crate
//! directly so each frame keeps its rectangle, timing and disposal.
//!
//! ## Frame Resizing
//!
//! Every frame is scaled by the same ratio:
//!
//! ```text
//! canvas 200x100, ratio 0.5
//! frame 0  (0,0)   200x100  →  (0,0)   100x50
//! frame 1  (20,10)  50x50   →  (10,5)   25x25
//! ```
//!
//! Frame 0 is always placed at the canvas origin. Later frames usually carry
//! only the region that changed, so their offsets are scaled (floored) too.

use super::backend::ResizeError;
use super::calculations::{scale_length, scale_offset, scaled_dimensions};
use super::palette::{expand_indexed, index_pixels};
use gif::{DisposalMethod, Repeat};
use image::imageops::{self, FilterType};
use std::borrow::Cow;
use std::io::{Cursor, Write};

/// NeuQuant speed used when a resized frame has too many colors (1-30).
const QUANTIZE_SPEED: i32 = 10;

/// One GIF frame: a palette-indexed rectangle placed on the canvas.
///
/// Rows are always in display order, whatever the source's interlacing.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    /// Delay in hundredths of a second.
    pub delay: u16,
    pub dispose: DisposalMethod,
    pub needs_user_input: bool,
    pub transparent: Option<u8>,
    /// Packed RGB, the frame's local table or the global one it referenced.
    pub palette: Vec<u8>,
    /// One palette index per pixel, row-major, `width * height` long.
    pub indices: Vec<u8>,
}

/// All frames of a GIF plus the canvas they are drawn on.
#[derive(Debug, Clone)]
pub struct AnimatedImage {
    pub width: u16,
    pub height: u16,
    /// `Finite(0)` means the source had no loop extension.
    pub repeat: Repeat,
    pub frames: Vec<DecodedFrame>,
}

fn decode_error(err: gif::DecodingError) -> ResizeError {
    ResizeError::Decode(format!("GIF: {err}"))
}

fn encode_error(err: gif::EncodingError) -> ResizeError {
    ResizeError::Encode(format!("GIF: {err}"))
}

/// Decode every frame of a GIF, keeping palette indices.
pub fn decode_gif(bytes: &[u8]) -> Result<AnimatedImage, ResizeError> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = options.read_info(Cursor::new(bytes)).map_err(decode_error)?;

    let global_palette = decoder.global_palette().map(<[u8]>::to_vec).unwrap_or_default();
    let mut frames = Vec::new();
    while let Some(frame) = decoder.read_next_frame().map_err(decode_error)? {
        frames.push(DecodedFrame {
            left: frame.left,
            top: frame.top,
            width: frame.width,
            height: frame.height,
            delay: frame.delay,
            dispose: frame.dispose,
            needs_user_input: frame.needs_user_input,
            transparent: frame.transparent,
            palette: frame.palette.clone().unwrap_or_else(|| global_palette.clone()),
            indices: frame.buffer.to_vec(),
        });
    }

    if frames.is_empty() {
        return Err(ResizeError::Decode("GIF contains no frames".into()));
    }

    Ok(AnimatedImage {
        width: decoder.width(),
        height: decoder.height(),
        repeat: decoder.repeat(),
        frames,
    })
}

/// Scale every frame and the canvas by `ratio`.
///
/// Builds a fresh frame sequence in the original order; per-frame timing,
/// disposal and flags are carried over unchanged.
pub fn resize_animation(image: &AnimatedImage, ratio: f64) -> AnimatedImage {
    let frames = image
        .frames
        .iter()
        .enumerate()
        .map(|(index, frame)| resize_frame(index, frame, ratio))
        .collect();

    AnimatedImage {
        width: scale_length(image.width as u32, ratio) as u16,
        height: scale_length(image.height as u32, ratio) as u16,
        repeat: image.repeat,
        frames,
    }
}

fn resize_frame(index: usize, frame: &DecodedFrame, ratio: f64) -> DecodedFrame {
    let (src_w, src_h) = (frame.width as u32, frame.height as u32);
    let rgba = expand_indexed(src_w, src_h, &frame.indices, &frame.palette, frame.transparent);
    let (width, height) = scaled_dimensions((src_w, src_h), ratio);
    let resized = imageops::resize(&rgba, width, height, FilterType::Lanczos3);

    let (left, top) = if index == 0 {
        (0, 0)
    } else {
        (
            scale_offset(frame.left as u32, ratio),
            scale_offset(frame.top as u32, ratio),
        )
    };
    log::debug!(
        "frame {index}: ({},{}) {src_w}x{src_h} -> ({left},{top}) {width}x{height}",
        frame.left,
        frame.top
    );

    let (palette, indices, transparent) = match index_pixels(&resized) {
        Some(indexed) => (indexed.palette_bytes(), indexed.indices, indexed.transparent),
        None => {
            log::debug!("frame {index}: more than 256 colors after resize, quantizing");
            let mut raw = resized.into_raw();
            let quantized =
                gif::Frame::from_rgba_speed(width as u16, height as u16, &mut raw, QUANTIZE_SPEED);
            (
                quantized.palette.unwrap_or_default(),
                quantized.buffer.into_owned(),
                quantized.transparent,
            )
        }
    };

    DecodedFrame {
        left: left as u16,
        top: top as u16,
        width: width as u16,
        height: height as u16,
        delay: frame.delay,
        dispose: frame.dispose,
        needs_user_input: frame.needs_user_input,
        transparent,
        palette,
        indices,
    }
}

/// Encode all frames, each with its own local palette.
pub fn encode_gif(image: &AnimatedImage, output: &mut dyn Write) -> Result<(), ResizeError> {
    let mut encoder =
        gif::Encoder::new(output, image.width, image.height, &[]).map_err(encode_error)?;
    // No loop extension in the source means none in the output
    if !matches!(image.repeat, Repeat::Finite(0)) {
        encoder.set_repeat(image.repeat).map_err(encode_error)?;
    }

    // Decoded buffers are already in display order, so frames go out
    // non-interlaced.
    for frame in &image.frames {
        let gif_frame = gif::Frame {
            left: frame.left,
            top: frame.top,
            width: frame.width,
            height: frame.height,
            delay: frame.delay,
            dispose: frame.dispose,
            needs_user_input: frame.needs_user_input,
            transparent: frame.transparent,
            palette: Some(frame.palette.clone()),
            buffer: Cow::Borrowed(frame.indices.as_slice()),
            ..gif::Frame::default()
        };
        encoder.write_frame(&gif_frame).map_err(encode_error)?;
    }

    encoder
        .into_inner()
        .map_err(|e| ResizeError::Encode(format!("GIF trailer: {e}")))?;
    Ok(())
}
