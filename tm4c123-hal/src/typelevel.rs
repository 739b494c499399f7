//! Module supporting type-level programming
//!
//! The UART peripheral tracks whether it is enabled in its type, with the
//! zero sized [`Enabled`](crate::uart::Enabled) and
//! [`Disabled`](crate::uart::Disabled) markers. `Sealed` keeps other crates
//! from adding states of their own.

mod private {
    /// Super trait used to mark traits with an exhaustive set of
    /// implementations
    pub trait Sealed {}
}

pub(crate) use private::Sealed;
