use fleet_sim_diagnostics::Span;
use serde::{Deserialize, Serialize};

/// Direction of a single movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// `F`: drive forward, magnitude in metres.
    Forward,
    /// `B`: drive backward, magnitude in metres.
    Backward,
    /// `L`: turn left, magnitude in degrees.
    TurnLeft,
    /// `R`: turn right, magnitude in degrees.
    TurnRight,
}

/// Validation class of a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionClass {
    /// Forward/backward travel measured in metres.
    Linear,
    /// Left/right turns measured in degrees.
    Rotational,
}

impl MotionClass {
    /// Lower-case name, as used in diagnostic context.
    pub fn name(self) -> &'static str {
        match self {
            MotionClass::Linear => "linear",
            MotionClass::Rotational => "rotational",
        }
    }
}

impl Direction {
    /// Map a command letter to its direction, ignoring ASCII case.
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'F' => Some(Direction::Forward),
            'B' => Some(Direction::Backward),
            'L' => Some(Direction::TurnLeft),
            'R' => Some(Direction::TurnRight),
            _ => None,
        }
    }

    /// Canonical (uppercase) command letter.
    pub fn letter(self) -> char {
        match self {
            Direction::Forward => 'F',
            Direction::Backward => 'B',
            Direction::TurnLeft => 'L',
            Direction::TurnRight => 'R',
        }
    }

    /// The validation class this direction belongs to.
    pub fn class(self) -> MotionClass {
        match self {
            Direction::Forward | Direction::Backward => MotionClass::Linear,
            Direction::TurnLeft | Direction::TurnRight => MotionClass::Rotational,
        }
    }

    /// Unit the magnitude is expressed in.
    pub fn unit(self) -> &'static str {
        match self.class() {
            MotionClass::Linear => "metres",
            MotionClass::Rotational => "degrees",
        }
    }
}

/// Step size as written: a non-negative decimal integer of any length.
///
/// Digits are stored without leading zeros (`"007"` becomes `7`), so two
/// magnitudes are equal iff they denote the same number. Distances are never
/// bounded; turns are range-checked through [`Magnitude::as_u32`].
///
/// Serializes as a JSON number when the value fits in a `u64`, otherwise as
/// its decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Magnitude {
    digits: String,
}

impl Magnitude {
    /// Build from a run of ASCII digits. Returns `None` for an empty run or
    /// any non-digit byte.
    pub fn from_digits(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let trimmed = digits.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };
        Some(Self {
            digits: digits.to_string(),
        })
    }

    /// Canonical decimal digits.
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// The value, if it fits in a `u32`.
    pub fn as_u32(&self) -> Option<u32> {
        self.digits.parse().ok()
    }

    /// Whether the value is zero.
    pub fn is_zero(&self) -> bool {
        self.digits == "0"
    }
}

impl From<u32> for Magnitude {
    fn from(n: u32) -> Self {
        Self {
            digits: n.to_string(),
        }
    }
}

impl PartialEq<u32> for Magnitude {
    fn eq(&self, other: &u32) -> bool {
        self.as_u32() == Some(*other)
    }
}

impl std::fmt::Display for Magnitude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.digits)
    }
}

impl Serialize for Magnitude {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.digits.parse::<u64>() {
            Ok(n) => serializer.serialize_u64(n),
            Err(_) => serializer.serialize_str(&self.digits),
        }
    }
}

/// A parsed `(direction, magnitude)` pair, before range validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Step direction.
    pub direction: Direction,
    /// Distance in metres or angle in degrees.
    pub magnitude: Magnitude,
    /// Source span of the letter and its digits.
    pub span: Span,
}

impl Token {
    /// Create a token.
    pub fn new(direction: Direction, magnitude: impl Into<Magnitude>, span: Span) -> Self {
        Self {
            direction,
            magnitude: magnitude.into(),
            span,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.direction.letter(), self.magnitude)
    }
}
