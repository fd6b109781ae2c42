//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete. Every constant has an entry in [`crate::explain`].

// ── Grammar (FSM1xxx) ───────────────────────────────────────────────────

/// Command text does not match the movement mini-language.
pub const INVALID_FORMAT: &str = "FSM1001";

/// A character that is neither a direction letter nor a digit.
pub const UNEXPECTED_CHARACTER: &str = "FSM1002";

/// A direction letter that is not followed by any digits.
pub const MISSING_MAGNITUDE: &str = "FSM1003";

/// The command text is empty.
pub const EMPTY_COMMAND: &str = "FSM1004";

// ── Magnitude ranges (FSM2xxx) ──────────────────────────────────────────

/// At least one forward/backward distance is invalid.
///
/// Any written distance is a whole number of 0 or more, so grammar-valid
/// commands never produce this code.
pub const LINEAR_OUT_OF_RANGE: &str = "FSM2001";

/// A turn angle above 360 degrees.
pub const ROTATION_OUT_OF_RANGE: &str = "FSM2002";

/// A turn angle that is not a multiple of 90 degrees.
pub const ROTATION_NOT_RIGHT_ANGLE: &str = "FSM2003";

/// At least one turn failed; the per-step diagnostics (`FSM2002`, `FSM2003`)
/// say which and why.
pub const TURN_REJECTED: &str = "FSM2004";

// ── Session (FSM3xxx) ───────────────────────────────────────────────────

/// Simulation requested with no equipment selected.
pub const SELECTION_MISSING: &str = "FSM3001";

/// The selected model number is not present in the inventory snapshot.
pub const EQUIPMENT_NOT_FOUND: &str = "FSM3002";

/// Every known diagnostic code, in numeric order.
pub const ALL: &[&str] = &[
    INVALID_FORMAT,
    UNEXPECTED_CHARACTER,
    MISSING_MAGNITUDE,
    EMPTY_COMMAND,
    LINEAR_OUT_OF_RANGE,
    ROTATION_OUT_OF_RANGE,
    ROTATION_NOT_RIGHT_ANGLE,
    TURN_REJECTED,
    SELECTION_MISSING,
    EQUIPMENT_NOT_FOUND,
];
