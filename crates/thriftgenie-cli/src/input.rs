// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Reading photos from paths or data URLs, and naming the results.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thriftgenie_core::error::ThriftGenieError;
use thriftgenie_core::media;
use tracing::{debug, warn};

/// A photo loaded into memory.
#[derive(Debug, Clone)]
pub struct LoadedInput {
    /// File name used to derive output names (`image.<ext>` for data URLs).
    pub name: String,
    /// Directory of the source file, if it came from disk.
    pub dir: Option<PathBuf>,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Load `input`, which is either a file path or a `data:` URL.
pub fn load(input: &str) -> Result<LoadedInput> {
    if !media::is_supported_image_name(input) {
        warn!(input = %short(input), "input does not look like a supported image");
    }

    if input.starts_with("data:") {
        let (mime, bytes) = media::decode_data_url(input).context("invalid data URL")?;
        if !mime.starts_with("image/") {
            return Err(ThriftGenieError::UnsupportedMedia(mime).into());
        }
        let ext = mime.rsplit('/').next().unwrap_or("jpg");
        debug!(%mime, len = bytes.len(), "loaded data URL");
        return Ok(LoadedInput {
            name: format!("image.{ext}"),
            dir: None,
            mime,
            bytes,
        });
    }

    let path = Path::new(input);
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();
    debug!(path = %path.display(), len = bytes.len(), "loaded file");
    Ok(LoadedInput {
        mime: media::mime_from_name(input).to_string(),
        dir: path.parent().map(Path::to_path_buf),
        name,
        bytes,
    })
}

impl LoadedInput {
    /// Path for an output called `file_name`, next to the source when it
    /// came from disk, otherwise in the working directory.
    pub fn sibling(&self, file_name: &str) -> PathBuf {
        match &self.dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    /// `<stem>-<tag>.<ext>`.
    pub fn tagged_name(&self, tag: &str, ext: &str) -> String {
        let stem = self.name.split('.').next().filter(|s| !s.is_empty()).unwrap_or("image");
        format!("{stem}-{tag}.{ext}")
    }
}

/// Write `bytes` to `path`, creating parent directories.
pub fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

/// Data URLs can be megabytes long; log only the head.
fn short(input: &str) -> &str {
    match input.char_indices().nth(48) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_file_and_names_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jacket.photo.png");
        std::fs::write(&path, b"bytes").unwrap();

        let loaded = load(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.name, "jacket.photo.png");
        assert_eq!(loaded.mime, "image/png");
        assert_eq!(loaded.bytes, b"bytes");
        assert_eq!(loaded.tagged_name("web", "jpg"), "jacket-web.jpg");
        assert_eq!(loaded.sibling("out.jpg"), dir.path().join("out.jpg"));
    }

    #[test]
    fn loads_data_url() {
        let url = media::encode_data_url(b"\x89PNG", "image/png");
        let loaded = load(&url).unwrap();
        assert_eq!(loaded.name, "image.png");
        assert_eq!(loaded.mime, "image/png");
        assert_eq!(loaded.bytes, b"\x89PNG");
        assert_eq!(loaded.sibling("x.jpg"), PathBuf::from("x.jpg"));
    }

    #[test]
    fn non_image_data_url_is_rejected() {
        let url = media::encode_data_url(b"hello", "text/plain");
        let err = load(&url).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ThriftGenieError>(),
            Some(ThriftGenieError::UnsupportedMedia(mime)) if mime == "text/plain"
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path().join("gone.jpg").to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.jpg");
        write(&path, b"data").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"data");
    }
}
