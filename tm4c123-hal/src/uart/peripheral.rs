//! Universal Asynchronous Receiver Transmitter - Bi-directional Peripheral Code
//!
//! This module brings together `uart::reader` and `uart::writer` to give a
//! UartPeripheral object that can both read and write, and runs the text
//! protocols of [`tm4c_hal_common::uart`] over it.

use core::{convert::Infallible, fmt};
use embedded_hal_0_2::serial as eh0;
use fugit::HertzU32;
use nb::Error::{Other, WouldBlock};

use embedded_hal_nb::serial::{ErrorType, Read, Write};
use tm4c_hal_common::{
    ascii::{CR, LF},
    uart::{line, text},
};

use super::pins;
use super::registers::{
    Register, UartRegisters, CTL_RXE, CTL_TXE, CTL_UARTEN, LCRH_EPS, LCRH_FEN, LCRH_PEN,
    LCRH_STP2, LCRH_WLEN_5, LCRH_WLEN_6, LCRH_WLEN_7, LCRH_WLEN_8,
};
use super::*;

/// An UART Peripheral based on an underlying register interface.
pub struct UartPeripheral<S: State, R: UartRegisters> {
    registers: R,
    _state: S,
    read_error: Option<ReadErrorType>,
}

impl<S: State, R: UartRegisters> UartPeripheral<S, R> {
    fn transition<To: State>(self, state: To) -> UartPeripheral<To, R> {
        UartPeripheral {
            registers: self.registers,
            _state: state,
            read_error: None,
        }
    }

    /// Releases the underlying registers.
    pub fn free(self) -> R {
        self.registers
    }
}

impl<R: UartRegisters> UartPeripheral<Disabled, R> {
    /// Creates an UartPeripheral in Disabled state.
    ///
    /// Turns on the UART and GPIO port clocks and waits until the port is
    /// ready.
    pub fn new(mut registers: R) -> UartPeripheral<Disabled, R> {
        pins::enable_clocks(&mut registers);

        UartPeripheral {
            registers,
            _state: Disabled,
            read_error: None,
        }
    }

    /// Enables the UART with the given configuration and routes its pins.
    ///
    /// The UART is switched off while the divisors and the frame format are
    /// written, and only switched back on once both are in place.
    pub fn enable(self, configuration: &UartConfiguration) -> UartPeripheral<Enabled, R> {
        let mut registers = self.free();

        registers.modify(Register::Ctl, |ctl| ctl & !CTL_UARTEN);

        configure_baudrate(&mut registers, configuration.divisors);

        // Also latches the divisors written above.
        let lcrh = line_control(configuration);
        registers.write(Register::Lcrh, lcrh);

        registers.modify(Register::Ctl, |ctl| ctl | CTL_UARTEN | CTL_TXE | CTL_RXE);

        pins::configure_pins(&mut registers);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "UART0 enabled: IBRD={=u16} FBRD={=u8} LCRH={=u32:#x}",
            configuration.divisors.integer,
            configuration.divisors.fractional,
            lcrh
        );

        UartPeripheral {
            registers,
            _state: Enabled,
            read_error: None,
        }
    }
}

impl<R: UartRegisters> UartPeripheral<Enabled, R> {
    /// Configures the UART once, with the fixed [`UartConfiguration::DEFAULT`]:
    /// 115 200 baud from a 50 MHz bus clock, 8 data bits, no parity, one stop
    /// bit, FIFOs enabled.
    ///
    /// Calling it again on the freed registers re-applies the same
    /// configuration. It must not be called while a transfer on the same UART
    /// is in progress.
    pub fn init(registers: R) -> Self {
        UartPeripheral::new(registers).enable(&UartConfiguration::DEFAULT)
    }

    /// Disable this UART Peripheral, falling back to the Disabled state.
    pub fn disable(mut self) -> UartPeripheral<Disabled, R> {
        // Disable the UART, both TX and RX
        self.registers
            .modify(Register::Ctl, |ctl| ctl & !(CTL_UARTEN | CTL_TXE | CTL_RXE));

        #[cfg(feature = "defmt")]
        defmt::trace!("UART0 disabled");

        self.transition(Disabled)
    }

    /// The baudrate the programmed divisors actually produce from
    /// [`BUS_CLOCK`].
    pub fn baudrate(&self) -> HertzU32 {
        let divisors = BaudDivisors {
            integer: self.registers.read(Register::Ibrd) as u16,
            fractional: (self.registers.read(Register::Fbrd) & 0x3F) as u8,
        };
        divisors.actual_baudrate(BUS_CLOCK)
    }

    /// Is there space in the UART TX FIFO for new data to be written?
    pub fn uart_is_writable(&self) -> bool {
        super::writer::uart_is_writable(&self.registers)
    }

    /// Is the UART still busy transmitting data?
    pub fn uart_is_busy(&self) -> bool {
        super::writer::uart_is_busy(&self.registers)
    }

    /// Is there data in the UART RX FIFO ready to be read?
    pub fn uart_is_readable(&self) -> bool {
        super::reader::is_readable(&self.registers)
    }

    /// Writes bytes to the UART.
    /// This function writes as long as it can. As soon that the FIFO is full, if :
    /// - 0 bytes were written, a WouldBlock Error is returned
    /// - some bytes were written, it is deemed to be a success
    ///
    /// Upon success, the remaining slice is returned.
    pub fn write_raw<'d>(&mut self, data: &'d [u8]) -> nb::Result<&'d [u8], Infallible> {
        super::writer::write_raw(&mut self.registers, data)
    }

    /// Reads bytes from the UART.
    /// This function reads as long as it can. As soon that the FIFO is empty, if :
    /// - 0 bytes were read, a WouldBlock Error is returned
    /// - some bytes were read, it is deemed to be a success
    ///
    /// Upon success, it will return how many bytes were read.
    pub fn read_raw<'b>(&self, buffer: &'b mut [u8]) -> nb::Result<usize, ReadError<'b>> {
        super::reader::read_raw(&self.registers, buffer)
    }

    /// Writes bytes to the UART.
    ///
    /// This function blocks until the full buffer has been sent.
    pub fn write_full_blocking(&mut self, data: &[u8]) {
        super::writer::write_full_blocking(&mut self.registers, data);
    }

    /// Reads bytes from the UART.
    ///
    /// This function blocks until the full buffer has been received.
    pub fn read_full_blocking(&self, buffer: &mut [u8]) -> Result<(), ReadErrorType> {
        super::reader::read_full_blocking(&self.registers, buffer)
    }

    /// The UART as a plain character stream: blocking, one character per
    /// transfer, receive error flags ignored.
    ///
    /// Use it to run the generic functions of [`tm4c_hal_common::uart`], or
    /// poll its non-blocking `read`/`write` to stay responsive while waiting.
    pub fn stream(&mut self) -> CharacterStream<'_, R> {
        CharacterStream {
            registers: &mut self.registers,
        }
    }

    /// Waits for the next character and returns it.
    ///
    /// Spins on the receive FIFO empty flag, without a timeout. Error flags of
    /// the received character are not checked.
    pub fn receive_char(&mut self) -> u8 {
        nb::block!(super::reader::read_char(&self.registers)).unwrap_or_else(|e| match e {})
    }

    /// Waits for space in the transmit FIFO and queues `character`.
    pub fn send_char(&mut self, character: u8) {
        nb::block!(super::writer::write_char(&mut self.registers, character))
            .unwrap_or_else(|e| match e {})
    }

    /// Sends `string` up to its first NUL byte. No terminator is sent.
    pub fn send_string(&mut self, string: &[u8]) {
        text::send_string(&mut self.stream(), string).unwrap_or_else(|e| match e {})
    }

    /// Moves the terminal cursor to the start of the next line.
    pub fn send_crlf(&mut self) {
        self.send_char(CR);
        self.send_char(LF);
    }

    /// Reads an unsigned decimal number terminated by a carriage return,
    /// echoing what is accepted.
    ///
    /// More than `u32::MAX` wraps around.
    pub fn decode_unsigned_decimal(&mut self) -> u32 {
        text::decode_unsigned_decimal(&mut self.stream()).unwrap_or_else(|e| match e {})
    }

    /// Sends `n` in decimal.
    pub fn encode_unsigned_decimal(&mut self, n: u32) {
        text::encode_unsigned_decimal(&mut self.stream(), n).unwrap_or_else(|e| match e {})
    }

    /// Reads an unsigned hexadecimal number terminated by a carriage return,
    /// echoing what is accepted.
    ///
    /// More than 8 digits wrap around.
    pub fn decode_unsigned_hex(&mut self) -> u32 {
        text::decode_unsigned_hex(&mut self.stream()).unwrap_or_else(|e| match e {})
    }

    /// Sends `n` in uppercase hexadecimal.
    pub fn encode_unsigned_hex(&mut self, n: u32) {
        text::encode_unsigned_hex(&mut self.stream(), n).unwrap_or_else(|e| match e {})
    }

    /// Reads a line of at most `max_len` characters into `buffer`, NUL
    /// terminated. Returns the characters without the terminator.
    pub fn read_line<'b>(&mut self, buffer: &'b mut [u8], max_len: usize) -> &'b [u8] {
        line::read_line(&mut self.stream(), buffer, max_len).unwrap_or_else(|e| match e {})
    }
}

/// Blocking character stream over an enabled UART.
///
/// Obtained from [`UartPeripheral::stream`].
pub struct CharacterStream<'u, R: UartRegisters> {
    registers: &'u mut R,
}

impl<R: UartRegisters> ErrorType for CharacterStream<'_, R> {
    type Error = Infallible;
}

impl<R: UartRegisters> Read<u8> for CharacterStream<'_, R> {
    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        super::reader::read_char(self.registers)
    }
}

impl<R: UartRegisters> Write<u8> for CharacterStream<'_, R> {
    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        super::writer::write_char(self.registers, word)
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        super::writer::transmit_flushed(self.registers)
    }
}

/// Baudrate configuration.
fn configure_baudrate<R: UartRegisters>(registers: &mut R, divisors: BaudDivisors) {
    // First we load the integer part of the divider.
    registers.write(Register::Ibrd, u32::from(divisors.integer));

    // Then we load the fractional part of the divider.
    registers.write(Register::Fbrd, u32::from(divisors.fractional));
}

/// Line control register value for the frame format.
fn line_control(configuration: &UartConfiguration) -> u32 {
    let mut lcrh = match configuration.data_bits {
        DataBits::Five => LCRH_WLEN_5,
        DataBits::Six => LCRH_WLEN_6,
        DataBits::Seven => LCRH_WLEN_7,
        DataBits::Eight => LCRH_WLEN_8,
    };

    if configuration.fifos {
        lcrh |= LCRH_FEN;
    }

    match configuration.parity {
        Some(Parity::Odd) => lcrh |= LCRH_PEN,
        Some(Parity::Even) => lcrh |= LCRH_PEN | LCRH_EPS,
        None => {}
    }

    match configuration.stop_bits {
        StopBits::One => {}
        StopBits::Two => lcrh |= LCRH_STP2,
    }

    lcrh
}

impl<R: UartRegisters> eh0::Read<u8> for UartPeripheral<Enabled, R> {
    type Error = ReadErrorType;

    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        Read::read(self)
    }
}

impl<R: UartRegisters> ErrorType for UartPeripheral<Enabled, R> {
    type Error = ReadErrorType;
}

impl<R: UartRegisters> Read<u8> for UartPeripheral<Enabled, R> {
    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        let byte: &mut [u8] = &mut [0; 1];

        match self.read_raw(byte) {
            Ok(_) => Ok(byte[0]),
            Err(e) => match e {
                Other(inner) => Err(Other(inner.err_type)),
                WouldBlock => Err(WouldBlock),
            },
        }
    }
}

impl<R: UartRegisters> eh0::Write<u8> for UartPeripheral<Enabled, R> {
    type Error = Infallible;

    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        super::writer::write_char(&mut self.registers, word)
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        super::writer::transmit_flushed(&self.registers)
    }
}

impl<R: UartRegisters> Write<u8> for UartPeripheral<Enabled, R> {
    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        super::writer::write_char(&mut self.registers, word).map_err(|e| match e {
            WouldBlock => WouldBlock,
            Other(v) => match v {},
        })
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        super::writer::transmit_flushed(&self.registers).map_err(|e| match e {
            WouldBlock => WouldBlock,
            Other(v) => match v {},
        })
    }
}

impl<R: UartRegisters> fmt::Write for UartPeripheral<Enabled, R> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        s.bytes()
            .try_for_each(|c| nb::block!(Write::write(self, c)))
            .map_err(|_| fmt::Error)
    }
}

impl<R: UartRegisters> embedded_io::ErrorType for UartPeripheral<Enabled, R> {
    type Error = ReadErrorType;
}

impl<R: UartRegisters> embedded_io::Read for UartPeripheral<Enabled, R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        // If the last read stored an error, report it now
        if let Some(err) = self.read_error.take() {
            return Err(err);
        }
        match nb::block!(self.read_raw(buf)) {
            Ok(bytes_read) => Ok(bytes_read),
            Err(err) if !err.discarded.is_empty() => {
                // If an error was reported but some bytes were already read,
                // return the data now and store the error for the next
                // invocation.
                self.read_error = Some(err.err_type);
                Ok(err.discarded.len())
            }
            Err(err) => Err(err.err_type),
        }
    }
}

impl<R: UartRegisters> embedded_io::ReadReady for UartPeripheral<Enabled, R> {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(self.uart_is_readable() || self.read_error.is_some())
    }
}

impl<R: UartRegisters> embedded_io::Write for UartPeripheral<Enabled, R> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        // Blocks if and only if no bytes can be written.
        let remaining = nb::block!(super::writer::write_raw(&mut self.registers, buf))
            .unwrap_or_else(|e| match e {});
        Ok(buf.len() - remaining.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        nb::block!(super::writer::transmit_flushed(&self.registers))
            .unwrap_or_else(|e| match e {});
        Ok(())
    }
}

impl<R: UartRegisters> embedded_io::WriteReady for UartPeripheral<Enabled, R> {
    fn write_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(self.uart_is_writable())
    }
}
