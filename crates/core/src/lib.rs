//! Forklift movement-command interpreter.
//!
//! Turns command strings such as `F10R90L90B5` into validated motion
//! [`Action`]s and records successful simulations in a per-session
//! [`Ledger`]. The main entry points are [`interpret`] for stand-alone
//! checking and [`Session::simulate`] for the full select-simulate-record
//! flow.

#![warn(missing_docs)]

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        std::collections::BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// Action compiler.
pub mod compile;
/// Equipment lookup by model number.
pub mod equipment;
/// Simulation failure taxonomy.
pub mod error;
/// Command grammar: gate, lexer, tokens, diagnostics.
pub mod grammar;
/// Stand-alone interpretation pipeline.
pub mod interpret;
/// Simulation run history.
pub mod ledger;
/// Notification channel.
pub mod notify;
/// Session state and orchestration.
pub mod session;
/// Range validation of lexed steps.
pub mod validate;

// ── Convenience re-exports ──────────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Pipeline
pub use grammar::gate::{FormatViolation, check_format, is_well_formed};
pub use grammar::lexer::{TokenStream, tokenize};
pub use grammar::token::{Direction, Magnitude, MotionClass, Token};
pub use interpret::{Interpretation, interpret};
pub use validate::{ValidationResult, check_token, validate_tokens};

// Actions and runs
pub use compile::{Action, Glyph, compile_actions};
pub use equipment::resolve_equipment;
pub use ledger::{Ledger, SimulationRun};

// Session
pub use error::SimulationError;
pub use notify::{Notification, NotificationKind, Notifier, RecordingNotifier};
pub use session::{SUCCESS_MESSAGE, Session, SimulationReport};

// Diagnostics (re-exported from the diagnostics crate)
pub use grammar::diag::{Diagnostic, Severity, Span, codes};

// Inventory record (re-exported from the inventory crate)
pub use fleet_sim_inventory::Equipment;
