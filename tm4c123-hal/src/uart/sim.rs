//! Simulated UART0 register file for host tests.

extern crate std;

use core::cell::{Cell, RefCell};
use std::{collections::VecDeque, vec::Vec};

use super::registers::{
    Register, UartRegisters, CTL_RXE, CTL_TXE, FR_BUSY, FR_RXFE, FR_TXFE, FR_TXFF, SYSCTL_R0,
};

const REGISTER_COUNT: usize = Register::Pctl as usize + 1;

/// Register file with a scripted receive FIFO and a recording transmit path.
///
/// * `Fr` is computed from the queues: `RXFE` stays set for `rx_latency`
///   polls before each received word shows up, `TXFF` stays set for
///   `tx_latency` polls after each transmitted character.
/// * `Dr` reads pop received words (with their error bits), writes append
///   the character to `transmitted`.
/// * `Prgpio` reports the port clock `prgpio_latency` polls after it was
///   enabled in `Rcgcgpio`.
/// * Every write is logged in order.
pub(crate) struct SimulatedRegisters {
    values: [u32; REGISTER_COUNT],
    received: RefCell<VecDeque<u32>>,
    transmitted: Vec<u8>,
    writes: Vec<(Register, u32)>,
    rx_latency: u32,
    rx_wait: Cell<u32>,
    tx_latency: u32,
    tx_wait: Cell<u32>,
    prgpio_latency: u32,
    prgpio_wait: Cell<u32>,
    flag_reads: Cell<usize>,
}

impl SimulatedRegisters {
    /// Registers at their reset values.
    pub(crate) fn new() -> Self {
        let mut values = [0; REGISTER_COUNT];
        values[Register::Ctl as usize] = CTL_RXE | CTL_TXE;
        Self {
            values,
            received: RefCell::new(VecDeque::new()),
            transmitted: Vec::new(),
            writes: Vec::new(),
            rx_latency: 0,
            rx_wait: Cell::new(0),
            tx_latency: 0,
            tx_wait: Cell::new(0),
            prgpio_latency: 0,
            prgpio_wait: Cell::new(0),
            flag_reads: Cell::new(0),
        }
    }

    /// Queue characters as if typed on the host terminal.
    pub(crate) fn with_input(self, typed: &[u8]) -> Self {
        self.received
            .borrow_mut()
            .extend(typed.iter().map(|&c| u32::from(c)));
        self
    }

    /// Queue a raw data register word, error bits included.
    pub(crate) fn with_word(self, word: u32) -> Self {
        self.received.borrow_mut().push_back(word);
        self
    }

    pub(crate) fn with_rx_latency(mut self, polls: u32) -> Self {
        self.rx_latency = polls;
        self.rx_wait.set(polls);
        self
    }

    pub(crate) fn with_tx_latency(mut self, polls: u32) -> Self {
        self.tx_latency = polls;
        self
    }

    pub(crate) fn with_prgpio_latency(mut self, polls: u32) -> Self {
        self.prgpio_latency = polls;
        self
    }

    pub(crate) fn with_value(mut self, register: Register, value: u32) -> Self {
        self.values[register as usize] = value;
        self
    }

    pub(crate) fn value(&self, register: Register) -> u32 {
        self.values[register as usize]
    }

    pub(crate) fn transmitted(&self) -> &[u8] {
        &self.transmitted
    }

    pub(crate) fn writes(&self) -> &[(Register, u32)] {
        &self.writes
    }

    pub(crate) fn flag_reads(&self) -> usize {
        self.flag_reads.get()
    }

    pub(crate) fn pending_input(&self) -> usize {
        self.received.borrow().len()
    }

    fn flags(&self) -> u32 {
        self.flag_reads.set(self.flag_reads.get() + 1);

        let mut flags = 0;
        if self.received.borrow().is_empty() {
            flags |= FR_RXFE;
        } else if self.rx_wait.get() > 0 {
            self.rx_wait.set(self.rx_wait.get() - 1);
            flags |= FR_RXFE;
        }

        if self.tx_wait.get() > 0 {
            self.tx_wait.set(self.tx_wait.get() - 1);
            flags |= FR_TXFF | FR_BUSY;
        } else {
            flags |= FR_TXFE;
        }
        flags
    }

    fn peripheral_ready(&self) -> u32 {
        if self.values[Register::Rcgcgpio as usize] & SYSCTL_R0 == 0 {
            return 0;
        }
        if self.prgpio_wait.get() < self.prgpio_latency {
            self.prgpio_wait.set(self.prgpio_wait.get() + 1);
            return 0;
        }
        SYSCTL_R0
    }
}

impl UartRegisters for SimulatedRegisters {
    fn read(&self, register: Register) -> u32 {
        match register {
            Register::Fr => self.flags(),
            Register::Prgpio => self.peripheral_ready(),
            Register::Dr => {
                self.rx_wait.set(self.rx_latency);
                self.received.borrow_mut().pop_front().unwrap_or(0)
            }
            _ => self.values[register as usize],
        }
    }

    fn write(&mut self, register: Register, value: u32) {
        self.writes.push((register, value));
        match register {
            Register::Fr | Register::Prgpio => {}
            Register::Dr => {
                self.transmitted.push(value as u8);
                self.tx_wait.set(self.tx_latency);
            }
            _ => self.values[register as usize] = value,
        }
    }
}
