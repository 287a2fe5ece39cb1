// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments shared by the binary and the command runners.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thriftgenie_core::{BackgroundType, CustomAdjustments, EnhancementOptions};

#[derive(Debug, Parser)]
#[command(name = "thriftgenie")]
#[command(version, about = "Photo enhancement for secondhand marketplace listings", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Enhance a listing photo (lighting, background, adjustments, web sizing)
    Enhance(EnhanceArgs),

    /// Apply manual brightness/contrast/saturation changes
    Adjust {
        /// Input file or data URL
        #[arg(value_name = "INPUT")]
        input: String,

        #[command(flatten)]
        adjustments: AdjustmentArgs,

        /// Output file (defaults to "<stem>-adjusted.jpg" next to the input)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Downscale and re-encode a photo for the web
    Optimize {
        /// Input file or data URL
        #[arg(value_name = "INPUT")]
        input: String,

        /// Maximum output width in pixels (defaults to the configured width)
        #[arg(long, value_name = "PX")]
        max_width: Option<u32>,

        /// Output file (defaults to "<stem>-web.jpg" next to the input)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print size, format and colour layout of an image as JSON
    Inspect {
        /// Input file or data URL
        #[arg(value_name = "INPUT")]
        input: String,
    },

    /// Enhance many photos concurrently with shared settings
    Batch {
        /// Input files
        #[arg(value_name = "INPUTS", required = true)]
        inputs: Vec<String>,

        /// Directory for the enhanced copies
        #[arg(long, value_name = "DIR")]
        out_dir: PathBuf,

        /// Number of photos processed at once (defaults to the CPU count)
        #[arg(short = 'j', long, value_name = "N")]
        jobs: Option<usize>,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Show the effective configuration, or write the defaults
    Config {
        /// Write a default config.json to the data directory
        #[arg(long)]
        init: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct EnhanceArgs {
    /// Input file or data URL
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Output file (defaults to a tagged, timestamped name next to the input)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the result as a data URL instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub data_url: bool,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    #[command(flatten)]
    pub adjustments: AdjustmentArgs,
}

/// Switches for the automatic pipeline. Unset switches fall back to the
/// configured defaults.
#[derive(Debug, Clone, Default, Args)]
pub struct PipelineArgs {
    /// Replace the background
    #[arg(long)]
    pub remove_background: bool,

    /// Backdrop style: white, gradient, lifestyle or none
    #[arg(long, value_name = "TYPE")]
    pub background: Option<BackgroundType>,

    /// Force lighting correction on
    #[arg(long, conflicts_with = "no_lighting")]
    pub correct_lighting: bool,

    /// Force lighting correction off
    #[arg(long)]
    pub no_lighting: bool,

    /// Skip web optimisation
    #[arg(long)]
    pub no_web: bool,

    /// Maximum width for web optimisation
    #[arg(long, value_name = "PX")]
    pub max_width: Option<u32>,
}

impl PipelineArgs {
    /// Merge these switches over `defaults`.
    pub fn options(&self, defaults: &EnhancementOptions) -> EnhancementOptions {
        let correct_lighting = if self.correct_lighting {
            true
        } else if self.no_lighting {
            false
        } else {
            defaults.correct_lighting
        };
        EnhancementOptions {
            remove_background: self.remove_background
                || self.background.is_some()
                || defaults.remove_background,
            correct_lighting,
            background_type: self.background.unwrap_or(defaults.background_type),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct AdjustmentArgs {
    /// Brightness change, -50 to 50
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub brightness: i32,

    /// Contrast change, -50 to 50
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub contrast: i32,

    /// Saturation change, -50 to 50
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub saturation: i32,
}

impl AdjustmentArgs {
    pub fn adjustments(&self) -> CustomAdjustments {
        CustomAdjustments::new(self.brightness, self.contrast, self.saturation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn enhance_flags_parse() {
        let cli = Cli::try_parse_from([
            "thriftgenie",
            "enhance",
            "shoe.jpg",
            "--background",
            "Gradient",
            "--no-lighting",
            "--brightness",
            "-10",
        ])
        .unwrap();
        let Commands::Enhance(args) = cli.command else {
            panic!("expected enhance");
        };
        let options = args.pipeline.options(&EnhancementOptions::default());
        assert!(options.remove_background);
        assert!(!options.correct_lighting);
        assert_eq!(options.background_type, BackgroundType::Gradient);
        assert_eq!(args.adjustments.brightness, -10);
    }

    #[test]
    fn unset_switches_use_defaults() {
        let defaults = EnhancementOptions {
            remove_background: false,
            correct_lighting: true,
            background_type: BackgroundType::Lifestyle,
        };
        let options = PipelineArgs::default().options(&defaults);
        assert_eq!(options, defaults);
    }

    #[test]
    fn unknown_background_is_rejected() {
        let result = Cli::try_parse_from(["thriftgenie", "enhance", "a.jpg", "--background", "neon"]);
        assert!(result.is_err());
    }
}
