//! HAL for the TM4C123 microcontroller
//!
//! This is an implementation of the [`embedded-hal`](https://crates.io/crates/embedded-hal)
//! serial traits for the UART0 peripheral of the TM4C123 (Tiva C), with
//! busy-waiting text input and output on top of it.
//!
//! NOTE This HAL is still under active development. This API will remain volatile until 1.0.0
//!
//! # Crate features
//!
//! * **defmt** -
//!   Implement `defmt::Format` for several types and log peripheral
//!   configuration changes.
//! * **rt** -
//!   Minimal startup / runtime for Cortex-M microcontrollers

#![warn(missing_docs)]
#![no_std]

/// Re-export of the PAC
pub use tm4c123x as pac;

pub use tm4c_hal_common::ascii;

pub mod typelevel;
pub mod uart;

pub use uart::UartPeripheral;
