//! Unsigned decimal and hexadecimal numbers over a character stream
//!
//! Decoding reads characters until a carriage return and echoes every
//! accepted digit, so a terminal user sees what they type. Characters that
//! are not digits of the radix are dropped without an echo. A backspace
//! erases the last digit (and is echoed) as long as there is one.
//!
//! There is no overflow detection: typing more digits than fit in a `u32`
//! wraps around, e.g. `4294967296` decodes to `0`.
//!
//! Encoding writes the digits most significant first, without leading zeros
//! and with uppercase `A`-`F`.

use embedded_hal_nb::serial::{Read, Write};

use crate::ascii::{BS, CR};

/// Most digits a `u32` takes in any supported radix (10 in decimal).
pub const MAX_DIGITS: usize = 10;

/// Number base of a text protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Radix {
    /// `0`-`9`
    Decimal,
    /// `0`-`9`, `A`-`F`, case insensitive on input
    Hexadecimal,
}

impl Radix {
    /// The numeric base.
    pub const fn base(self) -> u32 {
        match self {
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }

    /// Value of `character` as a digit of this radix, if it is one.
    pub fn digit_value(self, character: u8) -> Option<u32> {
        char::from(character).to_digit(self.base())
    }

    fn digit_character(self, value: u32) -> u8 {
        match value {
            0..=9 => b'0' + value as u8,
            _ => b'A' + (value - 10) as u8,
        }
    }
}

/// What feeding one character to an [`Accumulator`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feed {
    /// The character was a digit and was appended. Echo it.
    Digit,
    /// A backspace removed the last digit. Echo it.
    Erased,
    /// Nothing happened, don't echo.
    Ignored,
    /// Carriage return, input is complete.
    Done(u32),
}

/// Number being typed in, one character at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Accumulator {
    radix: Radix,
    value: u32,
    digits: usize,
}

impl Accumulator {
    /// An empty accumulator for `radix`.
    pub const fn new(radix: Radix) -> Self {
        Self {
            radix,
            value: 0,
            digits: 0,
        }
    }

    /// Current value.
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Number of digits appended and not erased yet.
    pub const fn digits(&self) -> usize {
        self.digits
    }

    /// Process one received character.
    pub fn feed(&mut self, character: u8) -> Feed {
        if character == CR {
            return Feed::Done(self.value);
        }

        let base = self.radix.base();
        if let Some(digit) = self.radix.digit_value(character) {
            self.value = self.value.wrapping_mul(base).wrapping_add(digit);
            self.digits += 1;
            Feed::Digit
        } else if character == BS && self.digits > 0 {
            self.value /= base;
            self.digits -= 1;
            Feed::Erased
        } else {
            Feed::Ignored
        }
    }
}

/// Reads a number in `radix`, echoing accepted digits and backspaces,
/// until a carriage return arrives.
pub fn decode_unsigned<S>(serial: &mut S, radix: Radix) -> Result<u32, S::Error>
where
    S: Read<u8> + Write<u8>,
{
    let mut accumulator = Accumulator::new(radix);

    loop {
        let character = nb::block!(serial.read())?;
        match accumulator.feed(character) {
            Feed::Digit | Feed::Erased => nb::block!(serial.write(character))?,
            Feed::Ignored => {}
            Feed::Done(value) => return Ok(value),
        }
    }
}

/// Reads an unsigned decimal number. See [`decode_unsigned`].
pub fn decode_unsigned_decimal<S>(serial: &mut S) -> Result<u32, S::Error>
where
    S: Read<u8> + Write<u8>,
{
    decode_unsigned(serial, Radix::Decimal)
}

/// Reads an unsigned hexadecimal number, no `0x` prefix. See [`decode_unsigned`].
pub fn decode_unsigned_hex<S>(serial: &mut S) -> Result<u32, S::Error>
where
    S: Read<u8> + Write<u8>,
{
    decode_unsigned(serial, Radix::Hexadecimal)
}

/// Formats `n` into the tail of `buffer` and returns the digits.
///
/// Digits are produced least significant first from the end of the buffer,
/// so the returned slice is already in reading order.
pub fn format_unsigned(mut n: u32, radix: Radix, buffer: &mut [u8; MAX_DIGITS]) -> &[u8] {
    let base = radix.base();
    let mut start = MAX_DIGITS;

    loop {
        start -= 1;
        buffer[start] = radix.digit_character(n % base);
        n /= base;
        if n == 0 {
            break;
        }
    }

    &buffer[start..]
}

/// Writes `n` in `radix`.
pub fn encode_unsigned<S>(serial: &mut S, n: u32, radix: Radix) -> Result<(), S::Error>
where
    S: Write<u8>,
{
    let mut buffer = [0; MAX_DIGITS];
    for &digit in format_unsigned(n, radix, &mut buffer) {
        nb::block!(serial.write(digit))?;
    }
    Ok(())
}

/// Writes `n` in decimal, 1 to 10 characters.
pub fn encode_unsigned_decimal<S>(serial: &mut S, n: u32) -> Result<(), S::Error>
where
    S: Write<u8>,
{
    encode_unsigned(serial, n, Radix::Decimal)
}

/// Writes `n` in uppercase hexadecimal, 1 to 8 characters.
pub fn encode_unsigned_hex<S>(serial: &mut S, n: u32) -> Result<(), S::Error>
where
    S: Write<u8>,
{
    encode_unsigned(serial, n, Radix::Hexadecimal)
}

/// Writes `text` up to, not including, its first NUL byte.
pub fn send_string<S>(serial: &mut S, text: &[u8]) -> Result<(), S::Error>
where
    S: Write<u8>,
{
    for &character in text.iter().take_while(|&&c| c != 0) {
        nb::block!(serial.write(character))?;
    }
    Ok(())
}
