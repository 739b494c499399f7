//! Universal Asynchronous Receiver Transmitter (UART) building blocks
//!
//! Configuration types and divisor math, plus the text protocols that run on
//! top of any blocking character stream:
//!
//! * [`text`] reads and writes unsigned decimal and hexadecimal numbers,
//! * [`line`] reads a line of text with backspace editing.
//!
//! Both are generic over the [`embedded_hal_nb::serial`] traits and poll the
//! stream with [`nb::block!`], so every character transfer busy-waits until
//! the device is ready.

mod utils;

pub mod line;
pub mod text;

/// Common configurations for UART.
pub mod common_configs;

pub use self::line::{read_line, Edit, LineBuffer};
pub use self::text::{
    decode_unsigned, decode_unsigned_decimal, decode_unsigned_hex, encode_unsigned,
    encode_unsigned_decimal, encode_unsigned_hex, format_unsigned, send_string, Accumulator,
    Feed, Radix, MAX_DIGITS,
};
pub use self::utils::*;

#[cfg(test)]
mod terminal;
