//! Common HAL code
//!
//! This library contains the UART types, the text protocols and the line
//! editor that are shared by the TM4C HALs.
//!
//! You shouldn't include anything here which requires either the `cortex-m`
//! crate, or a PAC.

#![warn(missing_docs)]
#![no_std]

pub mod ascii;
pub mod uart;
