// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Media helpers for callers of the engine: data URLs, MIME detection,
// output naming, and small reporting utilities.

use std::path::Path;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};

use crate::error::{Result, ThriftGenieError};
use crate::types::{BackgroundType, EnhancementOptions, OutputFormat};

/// File extensions accepted as listing photos, with their MIME types.
const IMAGE_MIME_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("tiff", "image/tiff"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
];

const DEFAULT_MIME: &str = "image/jpeg";

/// Encode `bytes` as a `data:<mime>;base64,...` URL.
pub fn encode_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Split a base64 data URL into its MIME type and decoded payload.
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>)> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| ThriftGenieError::InvalidDataUrl("missing 'data:' prefix".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ThriftGenieError::InvalidDataUrl("missing ',' separator".into()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| ThriftGenieError::InvalidDataUrl("only base64 payloads are supported".into()))?;
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| ThriftGenieError::InvalidDataUrl(e.to_string()))?;
    let mime = if mime.is_empty() { DEFAULT_MIME } else { mime };
    Ok((mime.to_string(), bytes))
}

/// MIME type for a file name or data URL. Unknown inputs map to `image/jpeg`.
pub fn mime_from_name(input: &str) -> &str {
    if let Some(rest) = input.strip_prefix("data:") {
        return rest
            .split([';', ','])
            .next()
            .filter(|mime| !mime.is_empty())
            .unwrap_or(DEFAULT_MIME);
    }
    extension_of(input)
        .and_then(|ext| lookup_mime(&ext))
        .unwrap_or(DEFAULT_MIME)
}

/// True for `data:image/...` URLs and names with a known image extension.
pub fn is_supported_image_name(input: &str) -> bool {
    if input.starts_with("data:") {
        return input.starts_with("data:image/");
    }
    extension_of(input).is_some_and(|ext| lookup_mime(&ext).is_some())
}

/// Output file name for an enhanced copy of `original`.
///
/// `shoe.jpg` enhanced with lighting on a white backdrop becomes
/// `shoe-bg-removed-lighting-corrected-bg-white-<millis>.jpg`.
pub fn enhanced_file_name(
    original: &str,
    options: &EnhancementOptions,
    timestamp: DateTime<Utc>,
) -> String {
    let stem = Path::new(original)
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("image");

    let mut tags = Vec::new();
    if options.remove_background {
        tags.push("bg-removed".to_string());
    }
    if options.correct_lighting {
        tags.push("lighting-corrected".to_string());
    }
    if let Some(bg) = options
        .effective_background()
        .filter(|bg| *bg != BackgroundType::None)
    {
        tags.push(format!("bg-{bg}"));
    }
    let suffix = if tags.is_empty() {
        "-enhanced".to_string()
    } else {
        format!("-{}", tags.join("-"))
    };

    let ext = OutputFormat::for_options(options).extension();
    format!("{stem}{suffix}-{}.{ext}", timestamp.timestamp_millis())
}

/// Percentage saved going from `original` to `new` bytes, rounded.
///
/// Negative when the output grew. Zero for an empty original.
pub fn size_reduction_percent(original: usize, new: usize) -> i64 {
    if original == 0 {
        return 0;
    }
    let saved = original as f64 - new as f64;
    (saved / original as f64 * 100.0).round() as i64
}

/// `"850ms"` below one second, otherwise one-decimal seconds (`"1.5s"`).
pub fn format_processing_time(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    if millis < 1000 {
        format!("{millis}ms")
    } else {
        format!("{:.1}s", elapsed.as_secs_f64())
    }
}

fn extension_of(input: &str) -> Option<String> {
    Path::new(input)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

fn lookup_mime(ext: &str) -> Option<&'static str> {
    IMAGE_MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn data_url_round_trip_keeps_mime() {
        let url = encode_data_url(&[0xFF, 0xD8, 0xFF], "image/jpeg");
        assert!(url.starts_with("data:image/jpeg;base64,"));
        let (mime, bytes) = decode_data_url(&url).unwrap();
        assert_eq!(mime, "image/jpeg");
        assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn malformed_data_urls_are_rejected() {
        assert!(decode_data_url("http://example.com/a.jpg").is_err());
        assert!(decode_data_url("data:image/png;base64").is_err());
        assert!(decode_data_url("data:image/png,rawtext").is_err());
        assert!(decode_data_url("data:image/png;base64,!!!").is_err());
    }

    #[test]
    fn mime_detection() {
        assert_eq!(mime_from_name("photo.JPG"), "image/jpeg");
        assert_eq!(mime_from_name("/tmp/lamp.webp"), "image/webp");
        assert_eq!(mime_from_name("data:image/png;base64,AAAA"), "image/png");
        assert_eq!(mime_from_name("notes.txt"), "image/jpeg");
    }

    #[test]
    fn supported_names() {
        assert!(is_supported_image_name("chair.heic"));
        assert!(is_supported_image_name("data:image/gif;base64,R0lG"));
        assert!(!is_supported_image_name("data:text/plain;base64,aGk="));
        assert!(!is_supported_image_name("README"));
    }

    #[test]
    fn enhanced_names_describe_options() {
        let ts = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let options = EnhancementOptions {
            remove_background: true,
            correct_lighting: true,
            background_type: BackgroundType::White,
        };
        assert_eq!(
            enhanced_file_name("uploads/shoe.front.jpg", &options, ts),
            "shoe-bg-removed-lighting-corrected-bg-white-1700000000000.jpg"
        );

        let transparent = EnhancementOptions {
            remove_background: true,
            correct_lighting: false,
            background_type: BackgroundType::None,
        };
        assert_eq!(
            enhanced_file_name("lamp.png", &transparent, ts),
            "lamp-bg-removed-1700000000000.png"
        );

        assert_eq!(
            enhanced_file_name("vase.jpeg", &EnhancementOptions::default(), ts),
            "vase-enhanced-1700000000000.jpg"
        );
    }

    #[test]
    fn size_reduction() {
        assert_eq!(size_reduction_percent(1000, 250), 75);
        assert_eq!(size_reduction_percent(1000, 1500), -50);
        assert_eq!(size_reduction_percent(0, 10), 0);
    }

    #[test]
    fn processing_time_formatting() {
        assert_eq!(format_processing_time(Duration::from_millis(850)), "850ms");
        assert_eq!(format_processing_time(Duration::from_millis(1500)), "1.5s");
    }
}
