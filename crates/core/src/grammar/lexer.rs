use super::diag::Span;
use super::token::{Direction, Magnitude, Token};

/// Lazy, restartable stream of steps over borrowed command text.
///
/// The stream matches `{letter}{digits}` left to right. The letter is matched
/// case-insensitively. Text that cannot start a step is passed over, so the
/// stream only accounts for every byte when the input already passed
/// [`check_format`](super::gate::check_format).
///
/// Cloning a stream snapshots its position; [`TokenStream::restart`] rewinds
/// to the beginning. Magnitudes are unbounded, so every match becomes a
/// [`Token`].
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    input: &'a str,
    pos: usize,
}

/// Tokenize command text into a lazy stream of steps.
pub fn tokenize(input: &str) -> TokenStream<'_> {
    TokenStream { input, pos: 0 }
}

impl<'a> TokenStream<'a> {
    /// The full text this stream reads from.
    pub fn source(&self) -> &'a str {
        self.input
    }

    /// Rewind to the start of the input.
    pub fn restart(&mut self) {
        self.pos = 0;
    }

    /// Find the next position where a letter is immediately followed by a digit.
    fn seek_step(&self) -> Option<(usize, Direction)> {
        let b = self.input.as_bytes();
        let mut i = self.pos;
        while i + 1 < b.len() {
            if let Some(dir) = Direction::from_letter(b[i] as char)
                && b[i + 1].is_ascii_digit()
            {
                return Some((i, dir));
            }
            i += 1;
        }
        None
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        // Bytes 0x80.. are UTF-8 lead/continuation bytes; `from_letter` and
        // `is_ascii_digit` reject them, so byte-wise scanning never splits a char.
        let (start, direction) = self.seek_step()?;
        let b = self.input.as_bytes();

        let digits_start = start + 1;
        let mut end = digits_start;
        while end < b.len() && b[end].is_ascii_digit() {
            end += 1;
        }
        self.pos = end;

        // `seek_step` guarantees at least one digit.
        let magnitude = Magnitude::from_digits(&self.input[digits_start..end])?;
        Some(Token::new(direction, magnitude, Span::new(start, end)))
    }
}

impl std::iter::FusedIterator for TokenStream<'_> {}
