//! Universal Asynchronous Receiver Transmitter - Receiver Code
//!
//! This module is for receiving data with a UART.

use core::convert::Infallible;

use nb::Error::*;

use super::registers::{Register, UartRegisters, DR_BE, DR_DATA_MASK, DR_FE, DR_OE, DR_PE};

/// When there's a read error.
pub struct ReadError<'err> {
    /// The type of error
    pub err_type: ReadErrorType,

    /// Reference to the data that was read but eventually discarded because of the error.
    pub discarded: &'err [u8],
}

/// Possible types of read errors, as flagged in the UART Data register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadErrorType {
    /// Triggered when the FIFO (or shift-register) is overflowed.
    Overrun,

    /// Triggered when a break is received
    Break,

    /// Triggered when there is a parity mismatch between what's received and our settings.
    Parity,

    /// Triggered when the received character didn't have a valid stop bit.
    Framing,
}

impl embedded_hal_nb::serial::Error for ReadErrorType {
    fn kind(&self) -> embedded_hal_nb::serial::ErrorKind {
        match self {
            ReadErrorType::Overrun => embedded_hal_nb::serial::ErrorKind::Overrun,
            ReadErrorType::Break => embedded_hal_nb::serial::ErrorKind::Other,
            ReadErrorType::Parity => embedded_hal_nb::serial::ErrorKind::Parity,
            ReadErrorType::Framing => embedded_hal_nb::serial::ErrorKind::FrameFormat,
        }
    }
}

impl embedded_io::Error for ReadErrorType {
    fn kind(&self) -> embedded_io::ErrorKind {
        embedded_io::ErrorKind::Other
    }
}

impl ReadErrorType {
    fn from_data(data: u32) -> Option<Self> {
        // One error per character: framing, then parity, break, overrun.
        if data & DR_FE != 0 {
            Some(ReadErrorType::Framing)
        } else if data & DR_PE != 0 {
            Some(ReadErrorType::Parity)
        } else if data & DR_BE != 0 {
            Some(ReadErrorType::Break)
        } else if data & DR_OE != 0 {
            Some(ReadErrorType::Overrun)
        } else {
            None
        }
    }
}

pub(crate) fn is_readable<R: UartRegisters>(registers: &R) -> bool {
    !registers.rx_fifo_empty()
}

/// Reads one character, whatever error flags came with it.
///
/// Returns `Err(WouldBlock)` while the receive FIFO is empty.
pub(crate) fn read_char<R: UartRegisters>(registers: &R) -> nb::Result<u8, Infallible> {
    if registers.rx_fifo_empty() {
        return Err(WouldBlock);
    }
    Ok((registers.read(Register::Dr) & DR_DATA_MASK) as u8)
}

pub(crate) fn read_raw<'b, R: UartRegisters>(
    registers: &R,
    buffer: &'b mut [u8],
) -> nb::Result<usize, ReadError<'b>> {
    let mut bytes_read = 0;

    Ok(loop {
        if !is_readable(registers) {
            if bytes_read == 0 {
                return Err(WouldBlock);
            } else {
                break bytes_read;
            }
        }

        if bytes_read < buffer.len() {
            let data = registers.read(Register::Dr);

            if let Some(err_type) = ReadErrorType::from_data(data) {
                return Err(Other(ReadError {
                    err_type,
                    discarded: &buffer[..bytes_read],
                }));
            }

            buffer[bytes_read] = (data & DR_DATA_MASK) as u8;
            bytes_read += 1;
        } else {
            break bytes_read;
        }
    })
}

pub(crate) fn read_full_blocking<R: UartRegisters>(
    registers: &R,
    buffer: &mut [u8],
) -> Result<(), ReadErrorType> {
    let mut offset = 0;

    while offset != buffer.len() {
        offset += match read_raw(registers, &mut buffer[offset..]) {
            Ok(bytes_read) => bytes_read,
            Err(e) => match e {
                Other(inner) => return Err(inner.err_type),
                WouldBlock => continue,
            },
        }
    }

    Ok(())
}
