//! Structured error types shared across maskgen crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`MaskError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (sizes, parameter values, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for maskgen.
///
/// Construction-time failures (`Configuration`, `Parameter`) surface before any
/// sweep executes. `Engine` failures surface from `advance`/`snapshot` and end
/// the sample stream that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum MaskError {
    /// Invalid run shape: lattice size or sample count.
    #[error("invalid configuration: {0}")]
    Configuration(ErrorInfo),
    /// Model parameter outside the engine's domain.
    #[error("invalid parameter: {0}")]
    Parameter(ErrorInfo),
    /// Failure raised while advancing or reading an engine.
    #[error("engine failure: {0}")]
    Engine(ErrorInfo),
    /// Serialization, configuration file and I/O errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl MaskError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            MaskError::Configuration(info)
            | MaskError::Parameter(info)
            | MaskError::Engine(info)
            | MaskError::Serde(info) => info,
        }
    }

    /// Shorthand for a configuration error with a single context entry.
    pub fn configuration(code: &str, message: impl Into<String>) -> Self {
        MaskError::Configuration(ErrorInfo::new(code, message))
    }

    /// Shorthand for an out-of-domain parameter error.
    pub fn parameter(model: &str, name: &str, value: f64, domain: &str) -> Self {
        MaskError::Parameter(
            ErrorInfo::new(
                "parameter-out-of-domain",
                format!("{name} = {value} is outside {domain}"),
            )
            .with_context("model", model)
            .with_context(name, value.to_string())
            .with_hint("omit the parameter to use the engine default"),
        )
    }

    /// Returns true for errors raised while validating a run before it starts.
    pub fn is_construction_error(&self) -> bool {
        matches!(self, MaskError::Configuration(_) | MaskError::Parameter(_))
    }
}
