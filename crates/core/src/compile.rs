//! Action compiler: validated steps to display-ready motion instructions.

use crate::grammar::token::{Direction, Magnitude, Token};
use serde::Serialize;

/// Directional icon shown next to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    /// Upward arrow (forward travel).
    ArrowUp,
    /// Downward arrow (backward travel).
    ArrowDown,
    /// Left-pointing arrow (left turn).
    ArrowBack,
    /// Right-pointing arrow (right turn).
    ArrowForward,
}

impl Glyph {
    /// Unicode arrow for terminal rendering.
    pub fn symbol(self) -> char {
        match self {
            Glyph::ArrowUp => '↑',
            Glyph::ArrowDown => '↓',
            Glyph::ArrowBack => '←',
            Glyph::ArrowForward => '→',
        }
    }
}

/// A validated motion instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    /// Step direction.
    pub kind: Direction,
    /// Distance in metres or angle in degrees.
    pub magnitude: Magnitude,
    /// Human-readable description, e.g. `"Turn Left by 90 degrees"`.
    pub description: String,
    /// Icon reference for the direction.
    pub glyph: Glyph,
}

impl Action {
    /// Compile one validated step.
    pub fn from_token(token: &Token) -> Self {
        let n = &token.magnitude;
        let (description, glyph) = match token.direction {
            Direction::Forward => (format!("Move Forward by {n} metres"), Glyph::ArrowUp),
            Direction::Backward => (format!("Move Backward by {n} metres"), Glyph::ArrowDown),
            Direction::TurnLeft => (format!("Turn Left by {n} degrees"), Glyph::ArrowBack),
            Direction::TurnRight => (format!("Turn Right by {n} degrees"), Glyph::ArrowForward),
        };
        Self {
            kind: token.direction,
            magnitude: n.clone(),
            description,
            glyph,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.glyph.symbol(), self.description)
    }
}

/// Compile validated steps 1:1 into actions, preserving order.
pub fn compile_actions(tokens: &[Token]) -> Vec<Action> {
    tokens.iter().map(Action::from_token).collect()
}
