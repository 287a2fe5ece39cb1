// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output encoding. Quality and compression are fixed constants so every call
// with the same input produces the same bytes.

use image::DynamicImage;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use thriftgenie_core::OutputFormat;
use thriftgenie_core::error::{Result, ThriftGenieError};

/// JPEG quality of the primary enhancement pipeline and manual adjustments.
pub const PRIMARY_JPEG_QUALITY: u8 = 90;

/// JPEG quality of web-optimised output.
pub const WEB_JPEG_QUALITY: u8 = 85;

/// Encode `image` in `format`. `quality` only applies to JPEG.
pub fn encode(image: &DynamicImage, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(image, quality),
        OutputFormat::Png => encode_png(image),
    }
}

/// Progressive JPEG with optimised Huffman tables, via mozjpeg.
///
/// Alpha, if any, is dropped.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(ThriftGenieError::EmptyImage);
    }

    let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
    comp.set_size(width as usize, height as usize);
    comp.set_quality(f32::from(quality.clamp(1, 100)));
    comp.set_progressive_mode();
    comp.set_optimize_coding(true);

    let mut comp = comp.start_compress(Vec::new()).map_err(encode_error)?;
    comp.write_scanlines(rgb.as_raw()).map_err(encode_error)?;
    comp.finish().map_err(encode_error)
}

/// Lossless RGBA PNG at the encoder's default (zlib level 6) compression
/// with adaptive row filtering.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let rgba = image.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(ThriftGenieError::EmptyImage);
    }

    let mut buffer = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut buffer, CompressionType::Default, PngFilter::Adaptive);
    rgba.write_with_encoder(encoder)
        .map_err(|err| ThriftGenieError::Encode(format!("PNG encoding failed: {err}")))?;
    Ok(buffer)
}

fn encode_error(err: std::io::Error) -> ThriftGenieError {
    ThriftGenieError::Encode(format!("JPEG encoding failed: {err}"))
}
