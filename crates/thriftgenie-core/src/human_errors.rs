// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for sellers editing their listing photos.
//
// Automatic enhancements never fail loudly, but manual edits do: the seller
// asked for that specific change, so the failure is shown to them. Every
// technical error is mapped to plain English with a clear suggestion.

use crate::error::ThriftGenieError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Resource hiccup; trying again is likely to work.
    Transient,
    /// User must change something (a slider value, a file choice).
    ActionRequired,
    /// Cannot be fixed by retrying: damaged file, unknown format, etc.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether the caller may retry the same request unchanged.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `ThriftGenieError` into a `HumanError` a seller can act on.
pub fn humanize_error(err: &ThriftGenieError) -> HumanError {
    match err {
        // -- Image errors --
        ThriftGenieError::Decode(_) => HumanError {
            message: "We couldn't read this photo.".into(),
            suggestion: "The file may be damaged or in an unusual format. Try saving it as a JPEG or PNG and upload it again.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        ThriftGenieError::Encode(_) => HumanError {
            message: "We couldn't save the edited photo.".into(),
            suggestion: "Try the edit again. If it keeps failing, try a smaller photo.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        ThriftGenieError::EmptyImage => HumanError {
            message: "This photo is empty.".into(),
            suggestion: "The file has no picture in it. Please choose a different photo.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        ThriftGenieError::InvalidAdjustment { name, value } => HumanError {
            message: format!("That {name} setting is too strong."),
            suggestion: format!("Choose a {name} value between -50 and 50 (you picked {value})."),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ThriftGenieError::InvalidWidth(width) => HumanError {
            message: "That image size isn't possible.".into(),
            suggestion: format!("Pick a maximum width larger than zero (you picked {width})."),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ThriftGenieError::InvalidOption(detail) => HumanError {
            message: "That enhancement option isn't available.".into(),
            suggestion: format!("Check the chosen options and try again ({detail})."),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Media helpers --
        ThriftGenieError::InvalidDataUrl(_) => HumanError {
            message: "The photo didn't arrive correctly.".into(),
            suggestion: "Try uploading the photo again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ThriftGenieError::UnsupportedMedia(detail) => HumanError {
            message: "This type of file isn't supported.".into(),
            suggestion: format!("Please upload a JPEG, PNG, or WebP photo. (File type: {detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        ThriftGenieError::Task(_) => HumanError {
            message: "Photo processing was interrupted.".into(),
            suggestion: "Please try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        // -- Storage --
        ThriftGenieError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The photo couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "We don't have permission to read that photo.".into(),
                    suggestion: "Check the file permissions, or copy the photo somewhere else first.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your disk may be full.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        ThriftGenieError::Serialization(_) => HumanError {
            message: "The settings file couldn't be read.".into(),
            suggestion: "Recreate it with `thriftgenie config --init`.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
    }
}
