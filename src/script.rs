//! Flicker script reader
//!
//! A flicker script is a plain comma separated list of decimal brightness
//! values, e.g. `"10,50,90"`. The script is borrowed, never copied; a
//! [`ScriptCursor`] walks it lazily one token at a time.

use crate::DimmerError;

/// Token separator
pub const SEPARATOR: u8 = b',';

/// Parse one leading decimal integer
///
/// Leading spaces and tabs are skipped and an optional sign is accepted.
/// Returns the value and the number of bytes consumed, or `None` if the
/// input does not start with a number or the number overflows `i32`.
pub fn parse_leading_int(input: &str) -> Option<(i32, usize)> {
    let bytes = input.as_bytes();
    let mut pos = bytes
        .iter()
        .position(|b| *b != b' ' && *b != b'\t')
        .unwrap_or(bytes.len());
    let start = pos;
    if matches!(bytes.get(pos), Some(b'+' | b'-')) {
        pos += 1;
    }
    let digits = bytes[pos..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let end = pos + digits;
    let value = input[start..end].parse::<i32>().ok()?;
    Some((value, end))
}

/// One step of reading a script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptToken {
    /// A number was read. `more` tells if a separator followed it.
    Value { value: i32, more: bool },
    /// Nothing left to read
    Exhausted,
    /// The token starting at `offset` is not a number
    Malformed { offset: usize },
}

/// Immutable brightness script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlickerScript<'a> {
    source: &'a str,
}

impl<'a> FlickerScript<'a> {
    pub const fn new(source: &'a str) -> Self {
        Self { source }
    }

    pub const fn as_str(&self) -> &'a str {
        self.source
    }

    /// Cursor positioned at the start of the script
    pub const fn cursor(&self) -> ScriptCursor<'a> {
        ScriptCursor {
            source: self.source,
            offset: 0,
            finished: false,
        }
    }

    /// Check that the whole script parses
    ///
    /// Returns the number of tokens, out of range values included.
    pub fn validate(&self) -> Result<usize, DimmerError> {
        self.cursor()
            .try_fold(0, |count, token| token.map(|_| count + 1))
    }
}

/// Lazy reader over a [`FlickerScript`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptCursor<'a> {
    source: &'a str,
    offset: usize,
    finished: bool,
}

impl ScriptCursor<'_> {
    /// Byte offset of the next token
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Read the next token
    ///
    /// After the last token (one not followed by a separator), after an
    /// exhausted read, or after a malformed token, the cursor stays
    /// finished and only returns [`ScriptToken::Exhausted`].
    pub fn next_token(&mut self) -> ScriptToken {
        if self.finished {
            return ScriptToken::Exhausted;
        }
        let rest = &self.source[self.offset..];
        if rest.is_empty() {
            self.finished = true;
            return ScriptToken::Exhausted;
        }
        let Some((value, consumed)) = parse_leading_int(rest) else {
            self.finished = true;
            return ScriptToken::Malformed {
                offset: self.offset,
            };
        };
        let more = rest.as_bytes().get(consumed) == Some(&SEPARATOR);
        if more {
            self.offset += consumed + 1;
        } else {
            self.offset += consumed;
            self.finished = true;
        }
        ScriptToken::Value { value, more }
    }
}

impl Iterator for ScriptCursor<'_> {
    type Item = Result<i32, DimmerError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            ScriptToken::Value { value, .. } => Some(Ok(value)),
            ScriptToken::Exhausted => None,
            ScriptToken::Malformed { offset } => Some(Err(DimmerError::ParseFailure { offset })),
        }
    }
}
