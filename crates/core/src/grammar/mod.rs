/// Re-exports from the diagnostics crate.
pub mod diag;
/// Grammar gate: whole-string check of the command surface syntax.
pub mod gate;
/// Command lexer: lazy stream of `(direction, magnitude)` steps.
pub mod lexer;
/// Step tokens and directions.
pub mod token;
