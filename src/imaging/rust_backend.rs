//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG) | `image::load_from_memory_with_format` |
//! | JPEG damage check | `zune_jpeg::JpegDecoder` in strict mode |
//! | Declared dimensions | `image::ImageReader::into_dimensions` (header only) |
//! | Decode / encode (GIF) | `gif` crate, see [`animation`](super::animation) |
//! | Resize | `DynamicImage::resize_exact` / `imageops::resize` with `Lanczos3` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (default quality) |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (default compression) |

use super::animation::{decode_gif, encode_gif, resize_animation};
use super::backend::{Content, DecodedImage, Dimensions, ImageBackend, ResizeError};
use super::calculations::scaled_dimensions;
use super::params::{DecodePolicy, SourceFormat, SourceImage};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::borrow::Cow;
use std::io::{Cursor, Write};
use zune_core::options::DecoderOptions;

/// Pure Rust backend using the `image` and `gif` crates.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Read width and height from the header without touching pixel data.
fn read_dimensions(bytes: &[u8], format: SourceFormat) -> Result<Dimensions, ResizeError> {
    let (width, height) = ImageReader::with_format(Cursor::new(bytes), format.image_format())
        .into_dimensions()
        .map_err(|e| ResizeError::Decode(format!("{format} header: {e}")))?;
    Ok(Dimensions { width, height })
}

/// Decode a JPEG with `zune-jpeg` in strict mode.
///
/// The `image` crate's JPEG path fills truncated or corrupt scan data with
/// filler and reports success; strict mode turns that damage into an error.
fn verify_jpeg(bytes: &[u8]) -> Result<(), String> {
    let options = DecoderOptions::default().set_strict_mode(true);
    let mut decoder = zune_jpeg::JpegDecoder::new_with_options(Cursor::new(bytes), options);
    decoder.decode().map(drop).map_err(|e| e.to_string())
}

/// Decode the pixels of a still image, applying `policy` to JPEG damage.
///
/// A damaged JPEG is an error under [`DecodePolicy::Strict`]. Under
/// [`DecodePolicy::Lenient`] it is logged and whatever pixels the decoder
/// recovered are used; if nothing could be recovered the content is
/// [`Content::Unavailable`].
fn decode_pixels(
    bytes: &[u8],
    format: SourceFormat,
    policy: DecodePolicy,
) -> Result<Content, ResizeError> {
    let damage = match format {
        SourceFormat::Jpeg => verify_jpeg(bytes).err(),
        _ => None,
    };
    if let (Some(reason), DecodePolicy::Strict) = (&damage, policy) {
        return Err(ResizeError::Decode(format!("{format} pixel data: {reason}")));
    }

    match image::load_from_memory_with_format(bytes, format.image_format()) {
        Ok(img) => {
            if let Some(reason) = damage {
                log::warn!("JPEG pixel data damaged, continuing with recovered pixels: {reason}");
            }
            Ok(Content::Still(img))
        }
        Err(e) if format == SourceFormat::Jpeg && policy == DecodePolicy::Lenient => {
            log::warn!("JPEG pixel decode failed, continuing with header only: {e}");
            Ok(Content::Unavailable(e.to_string()))
        }
        Err(e) => Err(ResizeError::Decode(format!("{format}: {e}"))),
    }
}

/// Encode a still image in `format` with the codec's default settings.
fn save_still(
    img: &DynamicImage,
    format: SourceFormat,
    output: &mut dyn Write,
) -> Result<(), ResizeError> {
    let result = match format {
        SourceFormat::Jpeg => {
            // The JPEG encoder only takes 8-bit gray or RGB
            let img = match img {
                DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => Cow::Borrowed(img),
                other => Cow::Owned(DynamicImage::ImageRgb8(other.to_rgb8())),
            };
            img.write_with_encoder(JpegEncoder::new(output))
        }
        SourceFormat::Png => img.write_with_encoder(PngEncoder::new(output)),
        SourceFormat::Gif => {
            return Err(ResizeError::Encode(
                "GIF frames are encoded by the animation encoder".into(),
            ));
        }
    };
    result.map_err(|e| ResizeError::Encode(format!("{format}: {e}")))
}

impl ImageBackend for RustBackend {
    fn decode(
        &self,
        source: &SourceImage,
        policy: DecodePolicy,
    ) -> Result<DecodedImage, ResizeError> {
        let format = source.format;
        if format == SourceFormat::Gif {
            let animation = decode_gif(&source.bytes)?;
            return Ok(DecodedImage {
                format,
                dimensions: Dimensions {
                    width: animation.width as u32,
                    height: animation.height as u32,
                },
                content: Content::Animated(animation),
            });
        }

        let content = decode_pixels(&source.bytes, format, policy)?;
        let dimensions = read_dimensions(&source.bytes, format)?;
        Ok(DecodedImage {
            format,
            dimensions,
            content,
        })
    }

    fn encode(
        &self,
        image: DecodedImage,
        ratio: f64,
        output: &mut dyn Write,
    ) -> Result<Dimensions, ResizeError> {
        match image.content {
            Content::Animated(animation) => {
                let resized = resize_animation(&animation, ratio);
                encode_gif(&resized, output)?;
                Ok(Dimensions {
                    width: resized.width as u32,
                    height: resized.height as u32,
                })
            }
            Content::Still(img) => {
                let (width, height) = scaled_dimensions(
                    (image.dimensions.width, image.dimensions.height),
                    ratio,
                );
                let resized = img.resize_exact(width, height, FilterType::Lanczos3);
                save_still(&resized, image.format, output)?;
                Ok(Dimensions { width, height })
            }
            Content::Unavailable(reason) => Err(ResizeError::Decode(format!(
                "{} pixels unavailable, cannot resize: {reason}",
                image.format
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    fn encoded(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        }))
    }

    fn source(format: SourceFormat, bytes: Vec<u8>) -> SourceImage {
        SourceImage { format, bytes }
    }

    #[test]
    fn decode_png_reports_dimensions() {
        let bytes = encoded(&gradient(40, 30), ImageFormat::Png);
        let decoded = RustBackend::new()
            .decode(&source(SourceFormat::Png, bytes), DecodePolicy::Strict)
            .unwrap();
        assert_eq!(decoded.dimensions, Dimensions { width: 40, height: 30 });
        assert!(matches!(decoded.content, Content::Still(_)));
    }

    #[test]
    fn jpeg_resize_halves_dimensions() {
        let backend = RustBackend::new();
        let bytes = encoded(&gradient(200, 100), ImageFormat::Jpeg);
        let decoded = backend
            .decode(&source(SourceFormat::Jpeg, bytes), DecodePolicy::Lenient)
            .unwrap();

        let mut out: Vec<u8> = Vec::new();
        let dims = backend.encode(decoded, 0.5, &mut out).unwrap();
        assert_eq!(dims, Dimensions { width: 100, height: 50 });

        let reread = image::load_from_memory_with_format(&out, ImageFormat::Jpeg).unwrap();
        assert_eq!((reread.width(), reread.height()), (100, 50));
    }

    #[test]
    fn png_resize_keeps_alpha() {
        let backend = RustBackend::new();
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 32, Rgba([10, 20, 30, 100])));
        let bytes = encoded(&img, ImageFormat::Png);
        let decoded = backend
            .decode(&source(SourceFormat::Png, bytes), DecodePolicy::Strict)
            .unwrap();

        let mut out: Vec<u8> = Vec::new();
        backend.encode(decoded, 0.25, &mut out).unwrap();
        let reread = image::load_from_memory_with_format(&out, ImageFormat::Png).unwrap();
        assert_eq!((reread.width(), reread.height()), (16, 8));
        assert!(reread.color().has_alpha());
    }

    #[test]
    fn rgba_still_is_flattened_for_jpeg() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([1, 2, 3, 4])));
        let mut out: Vec<u8> = Vec::new();
        save_still(&img, SourceFormat::Jpeg, &mut out).unwrap();
        assert!(image::load_from_memory_with_format(&out, ImageFormat::Jpeg).is_ok());
    }

    #[test]
    fn lenient_jpeg_swallows_pixel_failure() {
        let content = decode_pixels(b"not a jpeg", SourceFormat::Jpeg, DecodePolicy::Lenient).unwrap();
        assert!(matches!(content, Content::Unavailable(_)));
    }

    #[test]
    fn strict_jpeg_propagates_pixel_failure() {
        let err = decode_pixels(b"not a jpeg", SourceFormat::Jpeg, DecodePolicy::Strict).unwrap_err();
        assert!(matches!(err, ResizeError::Decode(_)));
    }

    /// A real JPEG cut in half: headers intact, scan data missing.
    fn truncated_jpeg() -> Vec<u8> {
        let mut bytes = encoded(&gradient(300, 200), ImageFormat::Jpeg);
        bytes.truncate(bytes.len() / 2);
        bytes
    }

    #[test]
    fn intact_jpeg_passes_strict_decode() {
        let bytes = encoded(&gradient(300, 200), ImageFormat::Jpeg);
        let content = decode_pixels(&bytes, SourceFormat::Jpeg, DecodePolicy::Strict).unwrap();
        assert!(matches!(content, Content::Still(_)));
    }

    #[test]
    fn strict_jpeg_rejects_truncated_scan() {
        let err = decode_pixels(&truncated_jpeg(), SourceFormat::Jpeg, DecodePolicy::Strict)
            .unwrap_err();
        assert!(matches!(err, ResizeError::Decode(msg) if msg.contains("pixel data")));
    }

    #[test]
    fn lenient_jpeg_keeps_recovered_pixels() {
        let content =
            decode_pixels(&truncated_jpeg(), SourceFormat::Jpeg, DecodePolicy::Lenient).unwrap();
        match content {
            Content::Still(img) => assert_eq!((img.width(), img.height()), (300, 200)),
            other => panic!("expected recovered pixels, got {other:?}"),
        }
    }

    #[test]
    fn png_failure_ignores_policy() {
        let err = decode_pixels(b"not a png", SourceFormat::Png, DecodePolicy::Lenient).unwrap_err();
        assert!(matches!(err, ResizeError::Decode(_)));
    }

    #[test]
    fn unreadable_jpeg_header_fails_even_when_lenient() {
        let err = RustBackend::new()
            .decode(&source(SourceFormat::Jpeg, b"garbage".to_vec()), DecodePolicy::Lenient)
            .unwrap_err();
        assert!(matches!(err, ResizeError::Decode(msg) if msg.contains("header")));
    }

    #[test]
    fn encode_without_pixels_is_decode_error() {
        let decoded = DecodedImage {
            format: SourceFormat::Jpeg,
            dimensions: Dimensions { width: 10, height: 10 },
            content: Content::Unavailable("truncated".into()),
        };
        let err = RustBackend::new()
            .encode(decoded, 0.5, &mut Vec::<u8>::new())
            .unwrap_err();
        assert!(matches!(err, ResizeError::Decode(msg) if msg.contains("truncated")));
    }
}
