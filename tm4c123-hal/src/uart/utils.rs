use crate::typelevel::Sealed;

#[doc(inline)]
pub use tm4c_hal_common::uart::{
    common_configs, BaudDivisors, DataBits, Error, Parity, StopBits, UartConfig,
    UartConfiguration, BUS_CLOCK,
};

/// State of the UART Peripheral.
pub trait State: Sealed {}

/// UART is enabled.
pub struct Enabled;

/// UART is disabled.
pub struct Disabled;

impl State for Enabled {}
impl Sealed for Enabled {}
impl State for Disabled {}
impl Sealed for Disabled {}
