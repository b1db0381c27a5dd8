//! Structured error types shared across modmig crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`MigrationError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (module ids, versions, paths).
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

/// Canonical error type for the migration engine.
///
/// The families follow the engine's error taxonomy: registration problems
/// are reported per candidate and never abort a discovery pass;
/// compatibility problems are raised before any mutation and may be
/// suppressed by force mode; execution problems always propagate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum MigrationError {
    /// Version string parsing errors.
    #[error("version error: {0}")]
    Version(ErrorInfo),
    /// Invalid migration candidates rejected at registration time.
    #[error("registration error: {0}")]
    Registration(ErrorInfo),
    /// Pre-execution compatibility failures (missing module, downgrade,
    /// no migration path).
    #[error("compatibility error: {0}")]
    Compatibility(ErrorInfo),
    /// A migration step failed while being applied.
    #[error("execution error: {0}")]
    Execution(ErrorInfo),
    /// Filesystem and tree serialization failures.
    #[error("io error: {0}")]
    Io(ErrorInfo),
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

impl MigrationError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            MigrationError::Version(info)
            | MigrationError::Registration(info)
            | MigrationError::Compatibility(info)
            | MigrationError::Execution(info)
            | MigrationError::Io(info) => info,
        }
    }

    /// Appends a context entry without changing the error family.
    ///
    /// Used by outer layers (the orchestrator) to attach identifying
    /// context such as the module id to an error raised further down.
    pub fn with_context(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match self {
            MigrationError::Version(info) => {
                MigrationError::Version(info.with_context(key, value))
            }
            MigrationError::Registration(info) => {
                MigrationError::Registration(info.with_context(key, value))
            }
            MigrationError::Compatibility(info) => {
                MigrationError::Compatibility(info.with_context(key, value))
            }
            MigrationError::Execution(info) => {
                MigrationError::Execution(info.with_context(key, value))
            }
            MigrationError::Io(info) => MigrationError::Io(info.with_context(key, value)),
        }
    }
}
