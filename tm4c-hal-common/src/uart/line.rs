//! Line input with backspace editing
//!
//! [`read_line`] collects characters into a caller supplied buffer until a
//! carriage return. Characters past the length limit are dropped without an
//! echo, a backspace removes the last character, and the finished line is
//! NUL terminated in the buffer.

use embedded_hal_nb::serial::{Read, Write};

use crate::ascii::{BS, CR};

/// What feeding one character to a [`LineBuffer`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edit {
    /// The character was stored. Echo it.
    Appended(u8),
    /// A backspace removed the last character. Echo the backspace.
    Erased,
    /// Backspace on an empty line, or the line is full. Don't echo.
    Ignored,
    /// Carriage return, the line is complete.
    Finished,
}

/// A line being edited in borrowed storage.
#[derive(Debug)]
pub struct LineBuffer<'b> {
    storage: &'b mut [u8],
    len: usize,
    max: usize,
}

impl<'b> LineBuffer<'b> {
    /// Start an empty line of at most `max_len` characters.
    ///
    /// One byte of `storage` is kept back for the terminator, so the limit
    /// is never more than `storage.len() - 1`.
    pub fn new(storage: &'b mut [u8], max_len: usize) -> Self {
        let max = max_len.min(storage.len().saturating_sub(1));
        Self {
            storage,
            len: 0,
            max,
        }
    }

    /// Number of characters currently in the line.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the line is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Most characters the line accepts.
    pub fn capacity(&self) -> usize {
        self.max
    }

    /// The characters entered so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// Process one received character.
    pub fn feed(&mut self, character: u8) -> Edit {
        match character {
            CR => Edit::Finished,
            BS if self.len > 0 => {
                self.len -= 1;
                Edit::Erased
            }
            BS => Edit::Ignored,
            _ if self.len < self.max => {
                self.storage[self.len] = character;
                self.len += 1;
                Edit::Appended(character)
            }
            _ => Edit::Ignored,
        }
    }

    /// Terminate the line with a NUL and hand back its characters.
    pub fn finish(self) -> &'b [u8] {
        let storage = self.storage;
        if let Some(terminator) = storage.get_mut(self.len) {
            *terminator = 0;
        }
        let storage: &'b [u8] = storage;
        &storage[..self.len]
    }
}

/// Reads a line of at most `max_len` characters into `buffer`.
///
/// Returns the characters typed, without the terminator. `buffer` holds a
/// NUL right after them.
pub fn read_line<'b, S>(
    serial: &mut S,
    buffer: &'b mut [u8],
    max_len: usize,
) -> Result<&'b [u8], S::Error>
where
    S: Read<u8> + Write<u8>,
{
    let mut line = LineBuffer::new(buffer, max_len);

    loop {
        let character = nb::block!(serial.read())?;
        match line.feed(character) {
            Edit::Appended(character) => nb::block!(serial.write(character))?,
            Edit::Erased => nb::block!(serial.write(BS))?,
            Edit::Ignored => {}
            Edit::Finished => return Ok(line.finish()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::terminal::Terminal;
    use super::*;

    #[test]
    fn reads_until_carriage_return() {
        let mut terminal = Terminal::new(b"hello\rworld");
        let mut buffer = [0xAA; 20];
        let line = read_line(&mut terminal, &mut buffer, 19).unwrap();
        assert_eq!(line, b"hello");
        assert_eq!(terminal.echo(), b"hello");
        assert_eq!(&buffer[..6], b"hello\0");
    }

    #[test]
    fn characters_past_the_limit_are_dropped() {
        let mut terminal = Terminal::new(b"abcd\r");
        let mut buffer = [0xAA; 8];
        let line = read_line(&mut terminal, &mut buffer, 3).unwrap();
        assert_eq!(line, b"abc");
        assert_eq!(terminal.echo(), b"abc");
        assert_eq!(&buffer[..4], b"abc\0");
    }

    #[test]
    fn backspace_makes_room_again() {
        let mut terminal = Terminal::new(b"abcd\x08\x08xy\r");
        let mut buffer = [0; 8];
        let line = read_line(&mut terminal, &mut buffer, 3).unwrap();
        assert_eq!(line, b"axy");
        assert_eq!(terminal.echo(), b"abc\x08\x08xy");
    }

    #[test]
    fn backspace_on_empty_line_is_ignored() {
        let mut terminal = Terminal::new(b"\x08\x08a\r");
        let mut buffer = [0; 4];
        let line = read_line(&mut terminal, &mut buffer, 3).unwrap();
        assert_eq!(line, b"a");
        assert_eq!(terminal.echo(), b"a");
    }

    #[test]
    fn control_characters_other_than_cr_and_bs_are_stored() {
        let mut terminal = Terminal::new(b"a\x1b\nb\r");
        let mut buffer = [0; 8];
        let line = read_line(&mut terminal, &mut buffer, 7).unwrap();
        assert_eq!(line, b"a\x1b\nb");
    }

    #[test]
    fn limit_leaves_room_for_the_terminator() {
        let mut terminal = Terminal::new(b"abcdef\r");
        let mut buffer = [0xAA; 4];
        let line = read_line(&mut terminal, &mut buffer, 100).unwrap();
        assert_eq!(line, b"abc");
        assert_eq!(buffer, *b"abc\0");
    }

    #[test]
    fn empty_buffer_accepts_nothing() {
        let mut terminal = Terminal::new(b"abc\r");
        let mut buffer = [0u8; 0];
        let line = read_line(&mut terminal, &mut buffer, 10).unwrap();
        assert!(line.is_empty());
        assert!(terminal.echo().is_empty());
    }

    #[test]
    fn line_buffer_tracks_edits() {
        let mut storage = [0; 4];
        let mut line = LineBuffer::new(&mut storage, 2);
        assert_eq!(line.capacity(), 2);
        assert_eq!(line.feed(b'x'), Edit::Appended(b'x'));
        assert_eq!(line.feed(b'y'), Edit::Appended(b'y'));
        assert_eq!(line.feed(b'z'), Edit::Ignored);
        assert_eq!(line.as_bytes(), b"xy");
        assert_eq!(line.feed(BS), Edit::Erased);
        assert_eq!(line.len(), 1);
        assert_eq!(line.feed(CR), Edit::Finished);
        assert_eq!(line.finish(), b"x");
        assert_eq!(storage, [b'x', 0, 0, 0]);
    }
}
