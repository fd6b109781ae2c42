//! Diagnostics for the fleet-sim command interpreter.
//!
//! Provides [`Diagnostic`], [`Severity`], and [`Span`] types used to report
//! errors, warnings, and informational messages from the grammar gate, the
//! token validator, and the simulation session. Diagnostic codes are defined
//! in the [`codes`] module.
//!
//! Diagnostics are the interpreter's internal channel: they carry per-token
//! detail (offending text, span, limits) that is never shown to the end user
//! as individual messages, but is available to tooling and to the CLI.

#![warn(missing_docs)]

/// Diagnostic ID constants.
pub mod codes;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// Hard error: the command is rejected.
    Error,
    /// Warning: the command runs but may not do what was meant.
    Warn,
    /// Informational note.
    Info,
}

/// Byte span in the command text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character (0-based).
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }

    /// Create a zero-width span at the given position.
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Number of bytes covered by the span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A diagnostic message produced while interpreting or simulating a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique diagnostic code (e.g., `"FSM2003"`).
    pub id: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Optional byte span in the command text that this diagnostic relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Machine-readable context for tooling. Keys and values are free-form strings.
    ///
    /// Uses `BTreeMap` for deterministic key ordering in serialized output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        severity: Severity,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Shorthand for an `Error` diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Error, message, span)
    }

    /// Shorthand for an `Info` diagnostic.
    pub fn info(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Info, message, span)
    }

    /// Attach machine-readable context metadata (builder pattern).
    ///
    /// Keys are short descriptors like `"token"`, `"value"`, `"max"`.
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Whether this diagnostic is an error.
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Returns the human-readable explanation for this diagnostic's code, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warn => write!(f, "warn"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message)
    }
}

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    let text = match id {
        codes::INVALID_FORMAT => {
            "The command does not match the movement grammar. A command is one or more \
             steps written back to back, each an uppercase direction letter (F, B, L, R) \
             followed by a whole number, e.g. F10R90L90B5."
        }
        codes::UNEXPECTED_CHARACTER => {
            "Only the uppercase letters F, B, L, R and the digits 0-9 may appear in a \
             command. Spaces, separators, signs, and lowercase letters are rejected."
        }
        codes::MISSING_MAGNITUDE => {
            "Every direction letter must be followed by at least one digit giving the \
             distance in metres (F, B) or the angle in degrees (L, R)."
        }
        codes::EMPTY_COMMAND => "The command is empty; enter at least one step such as F10.",
        codes::LINEAR_OUT_OF_RANGE => {
            "Forward and backward distances are whole metres of 0 or more, with no upper \
             limit. Every distance the grammar can express is valid."
        }
        codes::ROTATION_OUT_OF_RANGE => {
            "Turn angles must lie between 0 and 360 degrees inclusive."
        }
        codes::ROTATION_NOT_RIGHT_ANGLE => {
            "Turn angles must be a multiple of 90 degrees: 0, 90, 180, 270, or 360."
        }
        codes::TURN_REJECTED => {
            "The command contains at least one invalid turn, so none of its steps run. \
             Each offending turn has its own diagnostic: FSM2002 for angles above 360, \
             FSM2003 for angles that are not a multiple of 90."
        }
        codes::SELECTION_MISSING => {
            "A simulation needs a selected forklift. Choose one by model number before \
             simulating."
        }
        codes::EQUIPMENT_NOT_FOUND => {
            "The selected model number is not in the current inventory snapshot. The run \
             is still recorded, without equipment details."
        }
        _ => return None,
    };
    Some(text)
}
