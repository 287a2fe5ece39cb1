// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command runners. Each returns a report; printing is left to `main`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use chrono::Utc;
use serde::Serialize;
use thriftgenie_core::error::ThriftGenieError;
use thriftgenie_core::human_errors::{Severity, humanize_error};
use thriftgenie_core::{AppConfig, CustomAdjustments, EnhancementOptions, OutputFormat, media};
use thriftgenie_enhance::{engine, task};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::args::{EnhanceArgs, PipelineArgs};
use crate::input::{self, LoadedInput};

/// Where a command's result went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum Destination {
    File(PathBuf),
    DataUrl(String),
}

/// Outcome of one processed photo.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub input: String,
    pub destination: Destination,
    pub original_size: usize,
    pub processed_size: usize,
    pub size_reduction: i64,
    pub processing_time: String,
}

impl Report {
    fn new(input: &LoadedInput, destination: Destination, processed_size: usize, elapsed: Duration) -> Self {
        Self {
            input: input.name.clone(),
            destination,
            original_size: input.bytes.len(),
            processed_size,
            size_reduction: media::size_reduction_percent(input.bytes.len(), processed_size),
            processing_time: media::format_processing_time(elapsed),
        }
    }
}

/// Turn an engine error into the message a seller would see.
pub fn describe(err: &ThriftGenieError) -> anyhow::Error {
    let human = humanize_error(err);
    let label = match human.severity {
        Severity::Transient => "Temporary problem: ",
        Severity::ActionRequired => "Action needed: ",
        Severity::Permanent => "",
    };
    let retry = if human.retriable { " Retrying may succeed." } else { "" };
    anyhow!("{label}{} {}{retry}", human.message, human.suggestion).context(err.to_string())
}

/// Settings for one enhancement run after merging flags over the config.
#[derive(Debug, Clone, Copy)]
pub struct EnhancePlan {
    pub options: EnhancementOptions,
    pub adjustments: CustomAdjustments,
    /// `None` skips web optimisation.
    pub web_max_width: Option<u32>,
}

impl EnhancePlan {
    pub fn new(pipeline: &PipelineArgs, adjustments: CustomAdjustments, config: &AppConfig) -> Self {
        let web = config.optimize_for_web && !pipeline.no_web;
        Self {
            options: pipeline.options(&config.default_options),
            adjustments,
            web_max_width: web.then(|| pipeline.max_width.unwrap_or(config.web_max_width)),
        }
    }

    /// True when the pipeline keeps an alpha channel and emits PNG.
    pub fn is_transparent(&self) -> bool {
        OutputFormat::for_options(&self.options) == OutputFormat::Png
    }

    /// Reject settings the pipeline cannot honour.
    ///
    /// Manual adjustments re-encode as JPEG and would drop the alpha channel
    /// of transparent output, so that combination is refused.
    pub fn validate(&self) -> Result<()> {
        adjustments_in_range(&self.adjustments)?;
        if self.is_transparent() && !self.adjustments.is_noop() {
            let err = ThriftGenieError::InvalidOption(
                "manual adjustments need a background; they cannot keep transparency".into(),
            );
            return Err(describe(&err));
        }
        Ok(())
    }

    /// Enhance, then adjust, then optimise for the web.
    ///
    /// Web optimisation emits JPEG, so it is skipped for transparent output.
    pub async fn run(&self, bytes: Vec<u8>) -> Result<Vec<u8>> {
        self.validate()?;
        let mut output = task::enhance(bytes, self.options).await;

        if self.is_transparent() {
            if self.web_max_width.is_some() {
                debug!("transparent output: skipping web optimisation");
            }
            return Ok(output);
        }

        if !self.adjustments.is_noop() {
            output = task::apply_custom_adjustments(output, self.adjustments)
                .await
                .map_err(|err| describe(&err))?;
        }
        if let Some(max_width) = self.web_max_width {
            output = task::optimize_for_web(output, max_width).await;
        }
        Ok(output)
    }

    /// Output name; the extension matches what [`EnhancePlan::run`] emits.
    pub fn file_name(&self, original: &str) -> String {
        let name = media::enhanced_file_name(original, &self.options, Utc::now());
        if self.web_max_width.is_some() && !self.is_transparent() {
            // Web optimisation always re-encodes as JPEG.
            return Path::new(&name).with_extension("jpg").to_string_lossy().into_owned();
        }
        name
    }
}

fn adjustments_in_range(adjustments: &CustomAdjustments) -> Result<()> {
    adjustments.validate().map_err(|err| describe(&err))
}

/// `thriftgenie enhance`.
pub async fn enhance(args: &EnhanceArgs, config: &AppConfig) -> Result<Report> {
    let started = Instant::now();
    let loaded = input::load(&args.input)?;
    let plan = EnhancePlan::new(&args.pipeline, args.adjustments.adjustments(), config);
    info!(input = %loaded.name, options = ?plan.options, "enhancing");

    let output = plan.run(loaded.bytes.clone()).await?;
    let destination = if args.data_url {
        let mime = engine::inspect(&output)
            .ok()
            .and_then(|info| info.format)
            .map_or_else(|| loaded.mime.clone(), |format| format!("image/{format}"));
        Destination::DataUrl(media::encode_data_url(&output, &mime))
    } else {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| loaded.sibling(&plan.file_name(&loaded.name)));
        input::write(&path, &output)?;
        Destination::File(path)
    };
    Ok(Report::new(&loaded, destination, output.len(), started.elapsed()))
}

/// `thriftgenie adjust`.
pub async fn adjust(
    input_arg: &str,
    adjustments: CustomAdjustments,
    output: Option<PathBuf>,
) -> Result<Report> {
    let started = Instant::now();
    adjustments_in_range(&adjustments)?;
    let loaded = input::load(input_arg)?;
    let bytes = task::apply_custom_adjustments(loaded.bytes.clone(), adjustments)
        .await
        .map_err(|err| describe(&err))?;
    let path = output.unwrap_or_else(|| loaded.sibling(&loaded.tagged_name("adjusted", "jpg")));
    input::write(&path, &bytes)?;
    Ok(Report::new(&loaded, Destination::File(path), bytes.len(), started.elapsed()))
}

/// `thriftgenie optimize`.
pub async fn optimize(
    input_arg: &str,
    max_width: Option<u32>,
    output: Option<PathBuf>,
    config: &AppConfig,
) -> Result<Report> {
    let started = Instant::now();
    let loaded = input::load(input_arg)?;
    let max_width = max_width.unwrap_or(config.web_max_width);
    let bytes = task::optimize_for_web(loaded.bytes.clone(), max_width).await;
    let path = output.unwrap_or_else(|| loaded.sibling(&loaded.tagged_name("web", "jpg")));
    input::write(&path, &bytes)?;
    Ok(Report::new(&loaded, Destination::File(path), bytes.len(), started.elapsed()))
}

/// `thriftgenie inspect`, as pretty JSON.
pub fn inspect(input_arg: &str) -> Result<String> {
    let loaded = input::load(input_arg)?;
    let info = engine::inspect(&loaded.bytes).map_err(|err| describe(&err))?;
    Ok(serde_json::to_string_pretty(&info)?)
}

/// Result of one batch entry.
#[derive(Debug)]
pub struct BatchEntry {
    pub input: String,
    pub result: Result<Report>,
}

/// `thriftgenie batch`: enhance every input into `out_dir`, at most `jobs`
/// at a time. Failures are collected, never fatal.
pub async fn batch(
    inputs: &[String],
    out_dir: &Path,
    jobs: usize,
    pipeline: &PipelineArgs,
    config: &AppConfig,
) -> Vec<BatchEntry> {
    let plan = EnhancePlan::new(pipeline, CustomAdjustments::default(), config);
    let permits = Arc::new(Semaphore::new(jobs.max(1)));
    let mut set = JoinSet::new();

    for (index, input_arg) in inputs.iter().cloned().enumerate() {
        let permits = Arc::clone(&permits);
        let out_dir = out_dir.to_path_buf();
        set.spawn(async move {
            let result = match permits.acquire_owned().await {
                Ok(_permit) => batch_one(&input_arg, &out_dir, &plan).await,
                Err(err) => Err(anyhow!("batch cancelled: {err}")),
            };
            (index, BatchEntry { input: input_arg, result })
        });
    }

    let mut finished = Vec::with_capacity(inputs.len());
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(entry) => finished.push(entry),
            Err(err) => warn!(error = %err, "batch task failed"),
        }
    }
    let entries = collect_entries(inputs, finished);
    info!(
        total = inputs.len(),
        failed = entries.iter().filter(|e| e.result.is_err()).count(),
        "batch complete"
    );
    entries
}

/// Order finished entries by input position. Inputs whose task never
/// reported back (a panic or abort) become failed entries.
fn collect_entries(inputs: &[String], finished: Vec<(usize, BatchEntry)>) -> Vec<BatchEntry> {
    let mut slots: Vec<Option<BatchEntry>> = inputs.iter().map(|_| None).collect();
    for (index, entry) in finished {
        if let Some(slot) = slots.get_mut(index) {
            *slot = Some(entry);
        }
    }
    slots
        .into_iter()
        .zip(inputs)
        .map(|(slot, input)| {
            slot.unwrap_or_else(|| BatchEntry {
                input: input.clone(),
                result: Err(describe(&ThriftGenieError::Task(format!(
                    "processing of {input} stopped unexpectedly"
                )))),
            })
        })
        .collect()
}

async fn batch_one(input_arg: &str, out_dir: &Path, plan: &EnhancePlan) -> Result<Report> {
    let started = Instant::now();
    let loaded = input::load(input_arg)?;
    let output = plan.run(loaded.bytes.clone()).await?;
    let path = out_dir.join(plan.file_name(&loaded.name));
    input::write(&path, &output)?;
    Ok(Report::new(&loaded, Destination::File(path), output.len(), started.elapsed()))
}

/// `thriftgenie config`: the effective configuration, or the path written
/// by `--init`.
pub fn config(init: bool, data_dir: &Path, config: &AppConfig) -> Result<String> {
    if init {
        let path = AppConfig::default().save(data_dir)?;
        return Ok(format!("wrote {}", path.display()));
    }
    Ok(serde_json::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};
    use thriftgenie_core::BackgroundType;
    use thriftgenie_enhance::pipeline::encode::encode_jpeg;

    fn write_photo(dir: &Path, name: &str, width: u32) -> PathBuf {
        let img = RgbImage::from_fn(width, width / 2, |x, _| Rgb([(x % 100) as u8 + 30, 60, 70]));
        let path = dir.join(name);
        std::fs::write(&path, encode_jpeg(&DynamicImage::ImageRgb8(img), 90).unwrap()).unwrap();
        path
    }

    fn enhance_args(input: &Path) -> EnhanceArgs {
        EnhanceArgs {
            input: input.to_string_lossy().into_owned(),
            output: None,
            data_url: false,
            pipeline: PipelineArgs::default(),
            adjustments: Default::default(),
        }
    }

    #[tokio::test]
    async fn enhance_writes_tagged_file_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let photo = write_photo(dir.path(), "mug.jpg", 1600);

        let report = enhance(&enhance_args(&photo), &AppConfig::default()).await.unwrap();
        let Destination::File(path) = &report.destination else {
            panic!("expected a file");
        };
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("mug-lighting-corrected-"), "{name}");
        assert!(name.ends_with(".jpg"));

        let info = engine::inspect(&std::fs::read(path).unwrap()).unwrap();
        assert_eq!(info.width, 1200);
    }

    #[tokio::test]
    async fn transparent_output_stays_png() {
        let dir = tempfile::tempdir().unwrap();
        let photo = write_photo(dir.path(), "lamp.jpg", 200);
        let mut args = enhance_args(&photo);
        args.pipeline.background = Some(BackgroundType::None);
        args.data_url = true;

        let report = enhance(&args, &AppConfig::default()).await.unwrap();
        let Destination::DataUrl(url) = report.destination else {
            panic!("expected a data URL");
        };
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn transparent_file_output_keeps_png_extension() {
        let dir = tempfile::tempdir().unwrap();
        let photo = write_photo(dir.path(), "lamp.jpg", 200);
        let mut args = enhance_args(&photo);
        args.pipeline.background = Some(BackgroundType::None);

        let report = enhance(&args, &AppConfig::default()).await.unwrap();
        let Destination::File(path) = &report.destination else {
            panic!("expected a file");
        };
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        let info = engine::inspect(&std::fs::read(path).unwrap()).unwrap();
        assert_eq!(info.format.as_deref(), Some("png"));
    }

    #[tokio::test]
    async fn transparent_output_rejects_manual_adjustments() {
        let dir = tempfile::tempdir().unwrap();
        let photo = write_photo(dir.path(), "vase.jpg", 200);
        let mut args = enhance_args(&photo);
        args.pipeline.background = Some(BackgroundType::None);
        args.adjustments.brightness = 10;

        let err = enhance(&args, &AppConfig::default()).await.unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Action needed"), "{message}");
        assert!(message.contains("transparency"), "{message}");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn lost_batch_tasks_count_as_failures() {
        let inputs = vec!["a.jpg".to_string(), "b.jpg".to_string()];
        let finished = vec![(
            1,
            BatchEntry {
                input: "b.jpg".into(),
                result: Err(anyhow!("unreadable")),
            },
        )];
        let entries = collect_entries(&inputs, finished);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].input, "a.jpg");
        let message = format!("{:#}", entries[0].result.as_ref().unwrap_err());
        assert!(message.contains("interrupted"), "{message}");
        assert!(message.contains("Retrying may succeed"), "{message}");
        assert_eq!(entries[1].input, "b.jpg");
    }

    #[tokio::test]
    async fn adjust_reports_human_errors() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("broken.jpg");
        std::fs::write(&bogus, b"not a photo").unwrap();

        let err = adjust(bogus.to_str().unwrap(), CustomAdjustments::new(10, 0, 0), None)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("couldn't read this photo"));

        let err = adjust(bogus.to_str().unwrap(), CustomAdjustments::new(99, 0, 0), None)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("brightness"));
    }

    #[tokio::test]
    async fn batch_reports_each_input() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_photo(dir.path(), "a.jpg", 120);
        let out_dir = dir.path().join("out");
        let inputs = vec![
            good.to_string_lossy().into_owned(),
            dir.path().join("missing.jpg").to_string_lossy().into_owned(),
        ];

        let entries = batch(&inputs, &out_dir, 2, &PipelineArgs::default(), &AppConfig::default()).await;
        assert_eq!(entries.len(), 2);
        assert!(entries[0].result.is_ok());
        assert!(entries[1].result.is_err());
        assert_eq!(std::fs::read_dir(&out_dir).unwrap().count(), 1);
    }

    #[test]
    fn config_init_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let message = config(true, dir.path(), &AppConfig::default()).unwrap();
        assert!(message.starts_with("wrote "));
        assert_eq!(AppConfig::load(dir.path()), Some(AppConfig::default()));
    }
}
