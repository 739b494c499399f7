//! Universal Asynchronous Receiver Transmitter (UART)
//!
//! Polled driver for UART0 on PA0 (RX) and PA1 (TX). Every transfer
//! busy-waits on the FIFO flags; there are no interrupts, no DMA and no
//! timeouts.
//!
//! See chapter 14 of the TM4C123GH6PM datasheet for more details.
//!
//! ## Usage
//!
//! ```no_run
//! use tm4c123_hal::{
//!     pac,
//!     uart::{Uart0Registers, UartPeripheral},
//! };
//!
//! // Safety: nothing else has taken the peripherals.
//! let peripherals = unsafe { pac::Peripherals::steal() };
//!
//! // The system clock must already run at 50 MHz, as the fixed
//! // configuration is derived from it.
//! let registers = Uart0Registers::new(peripherals.UART0, peripherals.GPIO_PORTA);
//! let mut uart = UartPeripheral::init(registers);
//!
//! uart.send_string(b"InUDec: ");
//! let n = uart.decode_unsigned_decimal();
//! uart.send_string(b" OutUHex=");
//! uart.encode_unsigned_hex(n);
//! uart.send_crlf();
//!
//! let mut string = [0; 20];
//! let line = uart.read_line(&mut string, 19);
//! uart.send_string(line);
//! ```
//!
//! Other configurations are built at compile time and passed to
//! [`UartPeripheral::enable`]:
//!
//! ```no_run
//! # use tm4c123_hal::{pac, uart::{self, Uart0Registers, UartConfiguration, UartPeripheral}};
//! # let peripherals = unsafe { pac::Peripherals::steal() };
//! # let registers = Uart0Registers::new(peripherals.UART0, peripherals.GPIO_PORTA);
//! const SLOW: UartConfiguration = match UartConfiguration::new(
//!     uart::common_configs::_9600_8_N_1,
//!     uart::BUS_CLOCK,
//! ) {
//!     Ok(configuration) => configuration,
//!     Err(_) => panic!("bad UART configuration"),
//! };
//!
//! let uart = UartPeripheral::new(registers).enable(&SLOW);
//! ```

mod peripheral;
mod pins;
mod reader;
mod registers;
mod utils;
mod writer;

#[cfg(test)]
mod sim;

pub use self::peripheral::{CharacterStream, UartPeripheral};
pub use self::pins::{PCTL_UART0, PIN_MASK, RX_PIN, TX_PIN};
pub use self::reader::{ReadError, ReadErrorType};
pub use self::registers::*;
pub use self::utils::*;
