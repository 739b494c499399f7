//! Pins of UART0
//!
//! |UART |  RX |  TX |
//! |-----|-----|-----|
//! |UART0| PA0 | PA1 |

use super::registers::{Register, UartRegisters, SYSCTL_R0};

/// Port A pin receiving for UART0.
pub const RX_PIN: u32 = 0;

/// Port A pin transmitting for UART0.
pub const TX_PIN: u32 = 1;

/// Bit mask of both pins in the per-pin GPIO registers.
pub const PIN_MASK: u32 = (1 << RX_PIN) | (1 << TX_PIN);

/// Port control nibble routing a port A pin to UART0.
pub const PCTL_UART0: u32 = 0x1;

const PCTL_MASK: u32 = (0xF << (4 * RX_PIN)) | (0xF << (4 * TX_PIN));
const PCTL_VALUE: u32 = (PCTL_UART0 << (4 * RX_PIN)) | (PCTL_UART0 << (4 * TX_PIN));

/// Turns on the UART0 and GPIO port A clocks and waits for the port.
pub(crate) fn enable_clocks<R: UartRegisters>(registers: &mut R) {
    registers.modify(Register::Rcgcuart, |r| r | SYSCTL_R0);
    registers.modify(Register::Rcgcgpio, |r| r | SYSCTL_R0);
    while registers.read(Register::Prgpio) & SYSCTL_R0 == 0 {}
}

/// Hands PA0 and PA1 to UART0: digital, alternate function, not analog.
///
/// Other pins of port A are left as they are.
pub(crate) fn configure_pins<R: UartRegisters>(registers: &mut R) {
    registers.modify(Register::Afsel, |r| r | PIN_MASK);
    registers.modify(Register::Den, |r| r | PIN_MASK);
    registers.modify(Register::Pctl, |r| (r & !PCTL_MASK) | PCTL_VALUE);
    registers.modify(Register::Amsel, |r| r & !PIN_MASK);
}
