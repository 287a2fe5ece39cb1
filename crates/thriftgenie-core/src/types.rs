// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the ThriftGenie enhancement engine.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThriftGenieError};

/// Lowest and highest accepted value for each manual adjustment.
pub const ADJUSTMENT_RANGE: std::ops::RangeInclusive<i32> = -50..=50;

/// What to put behind the subject when background processing is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    /// Solid white studio backdrop.
    #[default]
    White,
    /// Diagonal near-white to white gradient.
    Gradient,
    /// Warm radial gradient with soft highlight accents.
    Lifestyle,
    /// Transparent intent. Re-encodes losslessly with alpha; no segmentation.
    None,
}

impl BackgroundType {
    /// Every variant, in declaration order.
    pub const ALL: [BackgroundType; 4] = [
        BackgroundType::White,
        BackgroundType::Gradient,
        BackgroundType::Lifestyle,
        BackgroundType::None,
    ];

    /// Lowercase wire name (`"white"`, `"gradient"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            BackgroundType::White => "white",
            BackgroundType::Gradient => "gradient",
            BackgroundType::Lifestyle => "lifestyle",
            BackgroundType::None => "none",
        }
    }
}

impl std::fmt::Display for BackgroundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BackgroundType {
    type Err = ThriftGenieError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        BackgroundType::ALL
            .into_iter()
            .find(|bg| bg.as_str() == lower)
            .ok_or_else(|| ThriftGenieError::InvalidOption(format!("unknown background type '{s}'")))
    }
}

/// Options for the automatic enhancement pipeline.
///
/// Field names serialise in camelCase so the JSON sent by the listing web
/// client (`{"removeBackground":true,...}`) deserialises unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementOptions {
    pub remove_background: bool,
    pub correct_lighting: bool,
    #[serde(default)]
    pub background_type: BackgroundType,
}

impl EnhancementOptions {
    /// The background to synthesise, if any.
    ///
    /// `background_type` only matters when `remove_background` is set.
    pub fn effective_background(&self) -> Option<BackgroundType> {
        self.remove_background.then_some(self.background_type)
    }

    /// True when the pipeline would only re-encode the input.
    pub fn is_noop(&self) -> bool {
        !self.remove_background && !self.correct_lighting
    }
}

/// Manual brightness/contrast/saturation deltas, each in `-50..=50`.
///
/// Zero means "leave this property alone".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomAdjustments {
    #[serde(default)]
    pub brightness: i32,
    #[serde(default)]
    pub contrast: i32,
    #[serde(default)]
    pub saturation: i32,
}

impl CustomAdjustments {
    pub fn new(brightness: i32, contrast: i32, saturation: i32) -> Self {
        Self {
            brightness,
            contrast,
            saturation,
        }
    }

    /// Reject any value outside [`ADJUSTMENT_RANGE`].
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("saturation", self.saturation),
        ] {
            if !ADJUSTMENT_RANGE.contains(&value) {
                return Err(ThriftGenieError::InvalidAdjustment { name, value });
            }
        }
        Ok(())
    }

    pub fn is_noop(&self) -> bool {
        self.brightness == 0 && self.contrast == 0 && self.saturation == 0
    }

    pub fn brightness_factor(&self) -> f32 {
        percent_factor(self.brightness)
    }

    pub fn contrast_factor(&self) -> f32 {
        percent_factor(self.contrast)
    }

    pub fn saturation_factor(&self) -> f32 {
        percent_factor(self.saturation)
    }
}

fn percent_factor(value: i32) -> f32 {
    1.0 + value as f32 / 100.0
}

/// Encoded raster formats the engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    /// The format the primary pipeline produces for `options`.
    pub fn for_options(options: &EnhancementOptions) -> Self {
        match options.effective_background() {
            Some(BackgroundType::None) => OutputFormat::Png,
            _ => OutputFormat::Jpeg,
        }
    }
}

/// Metadata derived from an encoded image buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Container format as detected from the bytes (e.g. `"jpeg"`), if known.
    pub format: Option<String>,
    /// Pixel layout of the decoded raster (e.g. `"Rgb8"`).
    pub color: String,
    pub has_alpha: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_deserialize_from_web_client_json() {
        let json = r#"{"removeBackground":true,"correctLighting":false,"backgroundType":"gradient"}"#;
        let options: EnhancementOptions = serde_json::from_str(json).unwrap();
        assert!(options.remove_background);
        assert!(!options.correct_lighting);
        assert_eq!(options.background_type, BackgroundType::Gradient);
    }

    #[test]
    fn unknown_background_type_is_rejected() {
        let json = r#"{"removeBackground":true,"correctLighting":false,"backgroundType":"beach"}"#;
        assert!(serde_json::from_str::<EnhancementOptions>(json).is_err());
        assert!("beach".parse::<BackgroundType>().is_err());
    }

    #[test]
    fn background_type_parses_case_insensitively() {
        assert_eq!("Lifestyle".parse::<BackgroundType>().unwrap(), BackgroundType::Lifestyle);
        assert_eq!(" NONE ".parse::<BackgroundType>().unwrap(), BackgroundType::None);
    }

    #[test]
    fn background_only_applies_when_removal_requested() {
        let mut options = EnhancementOptions {
            remove_background: false,
            correct_lighting: true,
            background_type: BackgroundType::Lifestyle,
        };
        assert_eq!(options.effective_background(), None);
        assert_eq!(OutputFormat::for_options(&options), OutputFormat::Jpeg);

        options.remove_background = true;
        assert_eq!(options.effective_background(), Some(BackgroundType::Lifestyle));

        options.background_type = BackgroundType::None;
        assert_eq!(OutputFormat::for_options(&options), OutputFormat::Png);
    }

    #[test]
    fn adjustment_validation_bounds() {
        assert!(CustomAdjustments::new(-50, 50, 0).validate().is_ok());
        match CustomAdjustments::new(0, 51, 0).validate() {
            Err(ThriftGenieError::InvalidAdjustment { name, value }) => {
                assert_eq!(name, "contrast");
                assert_eq!(value, 51);
            }
            other => panic!("expected InvalidAdjustment, got {other:?}"),
        }
        assert!(CustomAdjustments::new(0, 0, -51).validate().is_err());
    }

    #[test]
    fn adjustment_factors() {
        let adj = CustomAdjustments::new(20, -10, 50);
        assert!((adj.brightness_factor() - 1.2).abs() < 1e-6);
        assert!((adj.contrast_factor() - 0.9).abs() < 1e-6);
        assert!((adj.saturation_factor() - 1.5).abs() < 1e-6);
        assert!(CustomAdjustments::default().is_noop());
        assert!(!adj.is_noop());
    }

    #[test]
    fn options_without_stages_are_noop() {
        assert!(EnhancementOptions::default().is_noop());
        let lighting = EnhancementOptions {
            correct_lighting: true,
            ..Default::default()
        };
        assert!(!lighting.is_noop());
        let background = EnhancementOptions {
            remove_background: true,
            ..Default::default()
        };
        assert!(!background.is_noop());
    }

    #[test]
    fn missing_adjustment_fields_default_to_zero() {
        let adj: CustomAdjustments = serde_json::from_str(r#"{"brightness":5}"#).unwrap();
        assert_eq!(adj, CustomAdjustments::new(5, 0, 0));
    }
}
