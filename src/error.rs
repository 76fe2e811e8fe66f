//! Error types for Scaffoldor operations.
//!
//! This module defines [`ScaffoldorError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `ScaffoldorError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `ScaffoldorError::Other`) for unexpected errors
//! - Remote registry failures never surface here; they collapse to local-only data
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

use crate::registry::ValidationErrors;

/// Core error type for Scaffoldor operations.
#[derive(Debug, Error)]
pub enum ScaffoldorError {
    /// Failed to parse a settings or registry file.
    #[error("Failed to parse {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Template metadata violated the record schema.
    #[error("Invalid template metadata:\n{0}")]
    Validation(ValidationErrors),

    /// Template reference resolved to nothing locally or remotely.
    #[error("Template '{reference}' not found")]
    TemplateNotFound { reference: String },

    /// Scaffold destination is already present on disk.
    #[error("Destination {path} already exists")]
    DestinationExists { path: PathBuf },

    /// The external Git client failed.
    #[error("`{command}` failed: {message}")]
    GitFailed { command: String, message: String },

    /// Template is a premium template and cannot be scaffolded yet.
    #[error("Template '{reference}' is a premium template")]
    PremiumTemplate {
        reference: String,
        purchase_url: Option<String>,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ValidationErrors> for ScaffoldorError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Result type alias for Scaffoldor operations.
pub type Result<T> = std::result::Result<T, ScaffoldorError>;
