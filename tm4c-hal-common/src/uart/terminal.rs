//! Scripted host terminal for the protocol tests.

extern crate std;

use core::convert::Infallible;
use embedded_hal_nb::serial::{ErrorType, Read, Write};
use std::{collections::VecDeque, vec::Vec};

/// Plays back typed characters and records everything written back.
///
/// Every character is preceded by one `WouldBlock` poll, so callers have to
/// keep polling the way they do on the real FIFO.
pub(crate) struct Terminal {
    typed: VecDeque<u8>,
    echo: Vec<u8>,
    ready: bool,
}

impl Terminal {
    pub(crate) fn new(typed: &[u8]) -> Self {
        Self {
            typed: typed.iter().copied().collect(),
            echo: Vec::new(),
            ready: false,
        }
    }

    pub(crate) fn echo(&self) -> &[u8] {
        &self.echo
    }

    pub(crate) fn is_drained(&self) -> bool {
        self.typed.is_empty()
    }
}

impl ErrorType for Terminal {
    type Error = Infallible;
}

impl Read<u8> for Terminal {
    fn read(&mut self) -> nb::Result<u8, Infallible> {
        if !self.ready {
            self.ready = true;
            return Err(nb::Error::WouldBlock);
        }
        self.ready = false;
        match self.typed.pop_front() {
            Some(character) => Ok(character),
            None => panic!("read past the end of the typed input"),
        }
    }
}

impl Write<u8> for Terminal {
    fn write(&mut self, word: u8) -> nb::Result<(), Infallible> {
        self.echo.push(word);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Infallible> {
        Ok(())
    }
}
