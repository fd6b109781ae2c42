use super::diag::{Diagnostic, Span, codes};

/// Why a command failed the surface grammar.
///
/// Only the first violation is reported: the gate is a predicate, not a
/// recovering parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatViolation {
    /// The command text is empty.
    Empty,
    /// A character that is not allowed at this position.
    UnexpectedCharacter {
        /// The offending character.
        found: char,
        /// Byte offset of the character.
        offset: usize,
    },
    /// A direction letter with no digits after it.
    MissingMagnitude {
        /// The direction letter.
        letter: char,
        /// Byte offset of the letter.
        offset: usize,
    },
}

impl FormatViolation {
    /// Convert the violation into a diagnostic for the internal channel.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match *self {
            FormatViolation::Empty => {
                Diagnostic::error(codes::EMPTY_COMMAND, "command is empty", Some(Span::empty(0)))
            }
            FormatViolation::UnexpectedCharacter { found, offset } => Diagnostic::error(
                codes::UNEXPECTED_CHARACTER,
                format!("unexpected character {found:?}; expected one of F, B, L, R or a digit"),
                Some(Span::new(offset, offset + found.len_utf8())),
            )
            .with_context(ctx!("found" => found.to_string())),
            FormatViolation::MissingMagnitude { letter, offset } => Diagnostic::error(
                codes::MISSING_MAGNITUDE,
                format!("direction {letter} has no magnitude"),
                Some(Span::new(offset, offset + 1)),
            )
            .with_context(ctx!("letter" => letter.to_string())),
        }
    }
}

fn is_gate_letter(c: char) -> bool {
    matches!(c, 'F' | 'B' | 'L' | 'R')
}

/// Check that `input` is one or more `{F|B|L|R}{digit+}` steps with nothing else.
///
/// The letter set is matched case-sensitively: `f10` is rejected. The check is
/// pure and allocation-free.
pub fn check_format(input: &str) -> Result<(), FormatViolation> {
    if input.is_empty() {
        return Err(FormatViolation::Empty);
    }

    // `pending` holds the letter (and its offset) that still needs a digit.
    let mut pending: Option<(char, usize)> = None;
    for (offset, c) in input.char_indices() {
        if c.is_ascii_digit() {
            if offset == 0 {
                return Err(FormatViolation::UnexpectedCharacter { found: c, offset });
            }
            pending = None;
        } else if is_gate_letter(c) {
            if let Some((letter, offset)) = pending {
                return Err(FormatViolation::MissingMagnitude { letter, offset });
            }
            pending = Some((c, offset));
        } else {
            return Err(match pending {
                Some((letter, offset)) => FormatViolation::MissingMagnitude { letter, offset },
                None => FormatViolation::UnexpectedCharacter { found: c, offset },
            });
        }
    }

    match pending {
        Some((letter, offset)) => Err(FormatViolation::MissingMagnitude { letter, offset }),
        None => Ok(()),
    }
}

/// Whether `input` passes [`check_format`].
pub fn is_well_formed(input: &str) -> bool {
    check_format(input).is_ok()
}
