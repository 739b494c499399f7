//! Register access for the UART0 peripheral and the pins it uses
//!
//! The driver only ever talks to the hardware through [`UartRegisters`]:
//! plain reads and writes of whole 32-bit registers, named by [`Register`].
//! Every access goes to the live register, nothing is cached.
//!
//! [`Uart0Registers`] binds the trait to the memory mapped registers of the
//! TM4C123 through the PAC.

use crate::pac;

/// UART Flag: Busy transmitting
pub const FR_BUSY: u32 = 1 << 3;
/// UART Flag: Receive FIFO Empty
pub const FR_RXFE: u32 = 1 << 4;
/// UART Flag: Transmit FIFO Full
pub const FR_TXFF: u32 = 1 << 5;
/// UART Flag: Transmit FIFO Empty
pub const FR_TXFE: u32 = 1 << 7;

/// UART Control: UART Enable
pub const CTL_UARTEN: u32 = 1 << 0;
/// UART Control: Transmit Enable
pub const CTL_TXE: u32 = 1 << 8;
/// UART Control: Receive Enable
pub const CTL_RXE: u32 = 1 << 9;

/// Line Control: Parity Enable
pub const LCRH_PEN: u32 = 1 << 1;
/// Line Control: Even Parity Select
pub const LCRH_EPS: u32 = 1 << 2;
/// Line Control: Two Stop Bits Select
pub const LCRH_STP2: u32 = 1 << 3;
/// Line Control: Enable FIFOs
pub const LCRH_FEN: u32 = 1 << 4;
/// Line Control: 5 bit word length
pub const LCRH_WLEN_5: u32 = 0b00 << 5;
/// Line Control: 6 bit word length
pub const LCRH_WLEN_6: u32 = 0b01 << 5;
/// Line Control: 7 bit word length
pub const LCRH_WLEN_7: u32 = 0b10 << 5;
/// Line Control: 8 bit word length
pub const LCRH_WLEN_8: u32 = 0b11 << 5;

/// Data: received or transmitted character
pub const DR_DATA_MASK: u32 = 0xFF;
/// Data: Framing Error
pub const DR_FE: u32 = 1 << 8;
/// Data: Parity Error
pub const DR_PE: u32 = 1 << 9;
/// Data: Break Error
pub const DR_BE: u32 = 1 << 10;
/// Data: Overrun Error
pub const DR_OE: u32 = 1 << 11;

/// Run mode clock gating / peripheral ready bit of UART0 and of GPIO port A.
pub const SYSCTL_R0: u32 = 1 << 0;

/// A register the UART driver reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// UART Data
    Dr,
    /// UART Flag (read only)
    Fr,
    /// UART Integer Baud-Rate Divisor
    Ibrd,
    /// UART Fractional Baud-Rate Divisor
    Fbrd,
    /// UART Line Control
    Lcrh,
    /// UART Control
    Ctl,
    /// UART Run Mode Clock Gating Control
    Rcgcuart,
    /// GPIO Run Mode Clock Gating Control
    Rcgcgpio,
    /// GPIO Peripheral Ready (read only)
    Prgpio,
    /// GPIO Port A Alternate Function Select
    Afsel,
    /// GPIO Port A Digital Enable
    Den,
    /// GPIO Port A Analog Mode Select
    Amsel,
    /// GPIO Port A Port Control
    Pctl,
}

/// Access to the registers behind one UART and its pins.
pub trait UartRegisters {
    /// Reads the current value of `register`.
    ///
    /// Reading [`Register::Dr`] pops the receive FIFO.
    fn read(&self, register: Register) -> u32;

    /// Writes `value` to `register`. Writes to read only registers are ignored.
    ///
    /// Writing [`Register::Dr`] pushes to the transmit FIFO.
    fn write(&mut self, register: Register, value: u32);

    /// Read-modify-write of `register`.
    fn modify<F>(&mut self, register: Register, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        let value = self.read(register);
        self.write(register, f(value));
    }

    /// Is the receive FIFO empty?
    fn rx_fifo_empty(&self) -> bool {
        self.read(Register::Fr) & FR_RXFE != 0
    }

    /// Is the transmit FIFO full?
    fn tx_fifo_full(&self) -> bool {
        self.read(Register::Fr) & FR_TXFF != 0
    }

    /// Is the transmit FIFO empty?
    fn tx_fifo_empty(&self) -> bool {
        self.read(Register::Fr) & FR_TXFE != 0
    }

    /// Is the UART still shifting data out?
    fn is_busy(&self) -> bool {
        self.read(Register::Fr) & FR_BUSY != 0
    }
}

/// UART0 on GPIO port A, as memory mapped on the TM4C123.
///
/// Owns the UART0 and GPIO port A register blocks. The SYSCTL clock gating
/// registers are shared with the rest of the system, only the UART0 and port
/// A bits are ever changed in them.
pub struct Uart0Registers {
    uart: pac::UART0,
    port: pac::GPIO_PORTA,
}

impl Uart0Registers {
    /// Takes ownership of the UART0 and GPIO port A register blocks.
    pub fn new(uart: pac::UART0, port: pac::GPIO_PORTA) -> Self {
        Self { uart, port }
    }

    /// Releases the register blocks.
    pub fn free(self) -> (pac::UART0, pac::GPIO_PORTA) {
        (self.uart, self.port)
    }

    fn sysctl(&self) -> &pac::sysctl::RegisterBlock {
        // Safety: SYSCTL is always mapped, and the driver only does
        // read-modify-write on its own bits from a single thread.
        unsafe { &*pac::SYSCTL::ptr() }
    }
}

impl UartRegisters for Uart0Registers {
    fn read(&self, register: Register) -> u32 {
        match register {
            Register::Dr => self.uart.dr.read().bits(),
            Register::Fr => self.uart.fr.read().bits(),
            Register::Ibrd => self.uart.ibrd.read().bits(),
            Register::Fbrd => self.uart.fbrd.read().bits(),
            Register::Lcrh => self.uart.lcrh.read().bits(),
            Register::Ctl => self.uart.ctl.read().bits(),
            Register::Rcgcuart => self.sysctl().rcgcuart.read().bits(),
            Register::Rcgcgpio => self.sysctl().rcgcgpio.read().bits(),
            Register::Prgpio => self.sysctl().prgpio.read().bits(),
            Register::Afsel => self.port.afsel.read().bits(),
            Register::Den => self.port.den.read().bits(),
            Register::Amsel => self.port.amsel.read().bits(),
            Register::Pctl => self.port.pctl.read().bits(),
        }
    }

    #[allow(unused_unsafe)]
    fn write(&mut self, register: Register, value: u32) {
        match register {
            Register::Dr => self.uart.dr.write(|w| unsafe { w.bits(value) }),
            Register::Fr | Register::Prgpio => {}
            Register::Ibrd => self.uart.ibrd.write(|w| unsafe { w.bits(value) }),
            Register::Fbrd => self.uart.fbrd.write(|w| unsafe { w.bits(value) }),
            Register::Lcrh => self.uart.lcrh.write(|w| unsafe { w.bits(value) }),
            Register::Ctl => self.uart.ctl.write(|w| unsafe { w.bits(value) }),
            Register::Rcgcuart => self
                .sysctl()
                .rcgcuart
                .write(|w| unsafe { w.bits(value) }),
            Register::Rcgcgpio => self
                .sysctl()
                .rcgcgpio
                .write(|w| unsafe { w.bits(value) }),
            Register::Afsel => self.port.afsel.write(|w| unsafe { w.bits(value) }),
            Register::Den => self.port.den.write(|w| unsafe { w.bits(value) }),
            Register::Amsel => self.port.amsel.write(|w| unsafe { w.bits(value) }),
            Register::Pctl => self.port.pctl.write(|w| unsafe { w.bits(value) }),
        }
    }
}
