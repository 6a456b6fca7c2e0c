//! Input stream capabilities consumed by machine instances.
//!
//! The engine never reads input itself. State actions and guards read and
//! advance the stream owned by the instance context; the engine only asks the
//! context whether its input is exhausted (see [`Context`]).

use thiserror::Error;

/// Errors raised by stream operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StreamError {
    /// `advance` was called while already at the end of input.
    #[error("Cannot advance past end of input at position {position}")]
    Exhausted { position: usize },

    /// `seek` named a position the stream never reported.
    #[error("Position {position} is outside the input (length {len})")]
    OutOfRange { position: usize, len: usize },
}

/// Sequential symbol source.
pub trait Stream {
    type Symbol;

    /// The symbol under the cursor, or `None` at end of input.
    fn current(&self) -> Option<&Self::Symbol>;

    /// Move to the next symbol and return it.
    ///
    /// Advancing onto the end marker succeeds and returns `None`; advancing
    /// again fails with [`StreamError::Exhausted`].
    fn advance(&mut self) -> Result<Option<&Self::Symbol>, StreamError>;

    /// True once every symbol has been consumed.
    fn is_exhausted(&self) -> bool {
        self.current().is_none()
    }
}

/// Stream that can return to a previously reported position.
///
/// Required by contexts that back their [`Rewind`](crate::backtrack::Rewind)
/// implementation with stream positions. Seeks must be repeatable.
pub trait Seekable: Stream {
    type Position: Clone + PartialEq + std::fmt::Debug;

    fn position(&self) -> Self::Position;

    fn seek(&mut self, position: Self::Position) -> Result<(), StreamError>;
}

/// Capability every machine instance context provides to the engine.
///
/// The default no-transition policy accepts only when the context reports
/// that its input has been fully consumed.
pub trait Context {
    fn at_end(&self) -> bool;
}

/// In-memory input tape.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{Stream, Tape};
///
/// let mut tape = Tape::from("ab");
/// assert_eq!(tape.current(), Some(&'a'));
/// assert_eq!(tape.advance().unwrap(), Some(&'b'));
/// assert_eq!(tape.advance().unwrap(), None);
/// assert!(tape.advance().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tape<T> {
    symbols: Vec<T>,
    position: usize,
}

impl<T> Tape<T> {
    pub fn new(symbols: Vec<T>) -> Self {
        Self {
            symbols,
            position: 0,
        }
    }

    /// Symbols consumed so far.
    pub fn consumed(&self) -> &[T] {
        &self.symbols[..self.position]
    }

    /// Symbols not yet consumed, starting at the cursor.
    pub fn remaining(&self) -> &[T] {
        &self.symbols[self.position..]
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl From<&str> for Tape<char> {
    fn from(input: &str) -> Self {
        Tape::new(input.chars().collect())
    }
}

impl<T> FromIterator<T> for Tape<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Tape::new(iter.into_iter().collect())
    }
}

impl<T> Stream for Tape<T> {
    type Symbol = T;

    fn current(&self) -> Option<&T> {
        self.symbols.get(self.position)
    }

    fn advance(&mut self) -> Result<Option<&T>, StreamError> {
        if self.position >= self.symbols.len() {
            return Err(StreamError::Exhausted {
                position: self.position,
            });
        }
        self.position += 1;
        Ok(self.symbols.get(self.position))
    }
}

impl<T> Seekable for Tape<T> {
    type Position = usize;

    fn position(&self) -> usize {
        self.position
    }

    fn seek(&mut self, position: usize) -> Result<(), StreamError> {
        if position > self.symbols.len() {
            return Err(StreamError::OutOfRange {
                position,
                len: self.symbols.len(),
            });
        }
        self.position = position;
        Ok(())
    }
}

impl<T> Context for Tape<T> {
    fn at_end(&self) -> bool {
        self.is_exhausted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tape_starts_exhausted() {
        let tape = Tape::from("");
        assert!(tape.is_exhausted());
        assert!(tape.at_end());
        assert_eq!(tape.current(), None);
    }

    #[test]
    fn advance_past_end_is_signalled() {
        let mut tape = Tape::from("x");
        assert_eq!(tape.advance().unwrap(), None);
        assert_eq!(
            tape.advance(),
            Err(StreamError::Exhausted { position: 1 })
        );
    }

    #[test]
    fn seek_restores_cursor() {
        let mut tape = Tape::from("pqr");
        let start = tape.position();
        tape.advance().unwrap();
        tape.advance().unwrap();
        assert_eq!(tape.current(), Some(&'r'));

        tape.seek(start).unwrap();
        assert_eq!(tape.current(), Some(&'p'));
        assert_eq!(tape.consumed(), &[] as &[char]);
        assert_eq!(tape.remaining(), &['p', 'q', 'r']);
    }

    #[test]
    fn seek_beyond_input_fails() {
        let mut tape = Tape::from("pq");
        assert_eq!(
            tape.seek(3),
            Err(StreamError::OutOfRange { position: 3, len: 2 })
        );
        assert!(tape.seek(2).is_ok());
        assert!(tape.is_exhausted());
    }

    #[test]
    fn tape_collects_from_iterator() {
        let tape: Tape<u8> = vec![1, 2, 3].into_iter().collect();
        assert_eq!(tape.len(), 3);
        assert_eq!(tape.current(), Some(&1));
    }
}
