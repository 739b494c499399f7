//! Universal Asynchronous Receiver Transmitter - Transmitter Code
//!
//! This module is for transmitting data with a UART.

use core::convert::Infallible;

use nb::Error::*;

use super::registers::{Register, UartRegisters};

/// Returns `Err(WouldBlock)` if the UART TX FIFO still has data in it or
/// `Ok(())` if the FIFO is empty.
pub(crate) fn transmit_flushed<R: UartRegisters>(registers: &R) -> nb::Result<(), Infallible> {
    if registers.tx_fifo_empty() {
        Ok(())
    } else {
        Err(WouldBlock)
    }
}

/// Returns `true` if the TX FIFO has space, or false if it is full
pub(crate) fn uart_is_writable<R: UartRegisters>(registers: &R) -> bool {
    !registers.tx_fifo_full()
}

/// Returns `true` while the UART is transmitting
pub(crate) fn uart_is_busy<R: UartRegisters>(registers: &R) -> bool {
    registers.is_busy()
}

/// Writes one character.
///
/// Returns `Err(WouldBlock)` while the transmit FIFO is full.
pub(crate) fn write_char<R: UartRegisters>(
    registers: &mut R,
    character: u8,
) -> nb::Result<(), Infallible> {
    if !uart_is_writable(registers) {
        return Err(WouldBlock);
    }
    registers.write(Register::Dr, u32::from(character));
    Ok(())
}

/// Writes bytes to the UART.
///
/// This function writes as long as it can. As soon that the FIFO is full,
/// if:
/// - 0 bytes were written, a WouldBlock Error is returned
/// - some bytes were written, it is deemed to be a success
///
/// Upon success, the remaining (unwritten) slice is returned.
pub(crate) fn write_raw<'d, R: UartRegisters>(
    registers: &mut R,
    data: &'d [u8],
) -> nb::Result<&'d [u8], Infallible> {
    let mut bytes_written = 0;

    for c in data {
        if !uart_is_writable(registers) {
            if bytes_written == 0 {
                return Err(WouldBlock);
            } else {
                return Ok(&data[bytes_written..]);
            }
        }

        registers.write(Register::Dr, u32::from(*c));

        bytes_written += 1;
    }
    Ok(&data[bytes_written..])
}

/// Writes bytes to the UART.
///
/// This function blocks until the full buffer has been sent.
pub(crate) fn write_full_blocking<R: UartRegisters>(registers: &mut R, data: &[u8]) {
    let mut temp = data;

    while !temp.is_empty() {
        temp = match write_raw(registers, temp) {
            Ok(remaining) => remaining,
            Err(WouldBlock) => continue,
            Err(Other(never)) => match never {},
        }
    }
}
