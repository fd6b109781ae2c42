//! Range validation of lexed steps.
//!
//! The validator scans every step, even after a failure, so that each invalid
//! step gets its own diagnostic. Acceptance is decided only after the scan, per
//! class: a single invalid step rejects the whole command.

use crate::error::SimulationError;
use crate::grammar::diag::{Diagnostic, codes};
use crate::grammar::token::{MotionClass, Token};
use serde::Serialize;

/// Largest accepted turn angle, in degrees.
pub const MAX_TURN_DEGREES: u32 = 360;

/// Turn angles must be a multiple of this many degrees.
pub const TURN_STEP_DEGREES: u32 = 90;

/// Result of validating a token stream.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// `true` if every linear step and every rotational step is valid.
    pub ok: bool,
    /// `true` if no forward/backward step failed.
    pub linear_ok: bool,
    /// `true` if no turn failed.
    pub rotational_ok: bool,
    /// Every step that passed its class rule, in source order.
    pub tokens: Vec<Token>,
    /// One diagnostic per invalid step, in source order.
    pub issues: Vec<Diagnostic>,
}

impl ValidationResult {
    /// The aggregate error, if any. Linear failures take priority.
    pub fn error(&self) -> Option<SimulationError> {
        if !self.linear_ok {
            Some(SimulationError::LinearRange)
        } else if !self.rotational_ok {
            Some(SimulationError::RotationalRange)
        } else {
            None
        }
    }

    /// The accepted tokens, or the aggregate error.
    ///
    /// On error the partially valid tokens are discarded.
    pub fn into_result(self) -> Result<Vec<Token>, SimulationError> {
        match self.error() {
            Some(e) => Err(e),
            None => Ok(self.tokens),
        }
    }
}

/// Check a single step against its class rule.
///
/// Returns a diagnostic describing the violation, or `None` when valid.
pub fn check_token(token: &Token) -> Option<Diagnostic> {
    match token.direction.class() {
        // Any written distance is a whole number >= 0, however long.
        MotionClass::Linear => None,
        MotionClass::Rotational => match token.magnitude.as_u32() {
            Some(degrees) if degrees <= MAX_TURN_DEGREES => {
                (degrees % TURN_STEP_DEGREES != 0).then(|| {
                    Diagnostic::error(
                        codes::ROTATION_NOT_RIGHT_ANGLE,
                        format!("turn {token} is not a multiple of {TURN_STEP_DEGREES} degrees"),
                        Some(token.span),
                    )
                    .with_context(ctx!(
                        "token" => token.to_string(),
                        "class" => MotionClass::Rotational.name(),
                        "value" => degrees.to_string(),
                        "step" => TURN_STEP_DEGREES.to_string(),
                    ))
                })
            }
            _ => Some(
                Diagnostic::error(
                    codes::ROTATION_OUT_OF_RANGE,
                    format!("turn {token} exceeds {MAX_TURN_DEGREES} degrees"),
                    Some(token.span),
                )
                .with_context(ctx!(
                    "token" => token.to_string(),
                    "class" => MotionClass::Rotational.name(),
                    "value" => token.magnitude.to_string(),
                    "max" => MAX_TURN_DEGREES.to_string(),
                )),
            ),
        },
    }
}

/// Validate every step from a token stream.
///
/// Never stops early; the two class flags are independent.
pub fn validate_tokens<I>(tokens: I) -> ValidationResult
where
    I: IntoIterator<Item = Token>,
{
    let mut linear_ok = true;
    let mut rotational_ok = true;
    let mut accepted = Vec::new();
    let mut issues = Vec::new();

    for token in tokens {
        match check_token(&token) {
            None => accepted.push(token),
            Some(issue) => {
                match token.direction.class() {
                    MotionClass::Linear => linear_ok = false,
                    MotionClass::Rotational => rotational_ok = false,
                }
                issues.push(issue);
            }
        }
    }

    ValidationResult {
        ok: linear_ok && rotational_ok,
        linear_ok,
        rotational_ok,
        tokens: accepted,
        issues,
    }
}
