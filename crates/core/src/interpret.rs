//! Gate → tokenizer → validator → compiler, without a session.

use crate::compile::{Action, compile_actions};
use crate::error::SimulationError;
use crate::grammar::diag::Diagnostic;
use crate::grammar::gate::check_format;
use crate::grammar::lexer::tokenize;
use crate::validate::validate_tokens;
use serde::Serialize;

/// Result of interpreting one command string.
#[derive(Debug, Clone, Serialize)]
pub struct Interpretation {
    /// `true` if the command compiled to a non-empty action list.
    pub ok: bool,
    /// Compiled actions in source order (empty on rejection).
    pub actions: Vec<Action>,
    /// The aggregate failure, if rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<SimulationError>,
    /// Diagnostics from the gate or the validator.
    pub diagnostics: Vec<Diagnostic>,
}

impl Interpretation {
    fn rejected(error: SimulationError, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            ok: false,
            actions: Vec::new(),
            error: Some(error),
            diagnostics,
        }
    }

    /// The actions, or the aggregate error.
    pub fn into_result(self) -> Result<Vec<Action>, SimulationError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.actions),
        }
    }
}

/// Interpret a raw command string into actions.
///
/// Grammar failures stop before tokenizing. Range failures are reported only
/// after every step has been checked; no actions are returned unless every
/// step is valid.
pub fn interpret(command: &str) -> Interpretation {
    if let Err(violation) = check_format(command) {
        return Interpretation::rejected(SimulationError::Format, vec![violation.to_diagnostic()]);
    }

    let vr = validate_tokens(tokenize(command));
    if let Some(error) = vr.error() {
        return Interpretation::rejected(error, vr.issues);
    }

    let actions = compile_actions(&vr.tokens);
    if actions.is_empty() {
        // Unreachable after the gate (it requires one step); kept as a guard.
        return Interpretation::rejected(SimulationError::Format, vr.issues);
    }

    Interpretation {
        ok: true,
        actions,
        error: None,
        diagnostics: vr.issues,
    }
}
