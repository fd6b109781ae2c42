//! Simulation failure taxonomy.

use serde::Serialize;

use crate::grammar::diag::codes;

/// Why a simulation (or a stand-alone interpretation) was rejected.
///
/// Every variant is terminal for the invocation and maps to exactly one
/// user-facing message (its `Display` text). Per-token detail lives in the
/// accompanying diagnostics, never in the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum SimulationError {
    /// No equipment was selected before simulating.
    #[error("Please select a forklift before simulating.")]
    SelectionMissing,
    /// The command text failed the surface grammar.
    #[error("Invalid command format. Use like: F10R90L90B5")]
    Format,
    /// At least one forward/backward step has an invalid distance.
    #[error("Invalid meter command: metres must be 0 or greater.")]
    LinearRange,
    /// At least one turn has an invalid angle (and no linear step failed).
    #[error("Invalid turn command: degrees must be a multiple of 90, between 0 and 360.")]
    RotationalRange,
}

impl SimulationError {
    /// Diagnostic code summarizing this failure.
    ///
    /// Range failures get an aggregate code; the exact reason for each
    /// rejected step is in its own diagnostic.
    pub fn code(self) -> &'static str {
        match self {
            SimulationError::SelectionMissing => codes::SELECTION_MISSING,
            SimulationError::Format => codes::INVALID_FORMAT,
            SimulationError::LinearRange => codes::LINEAR_OUT_OF_RANGE,
            SimulationError::RotationalRange => codes::TURN_REJECTED,
        }
    }

    /// The message shown to the user for this failure.
    pub fn user_message(self) -> String {
        self.to_string()
    }
}
