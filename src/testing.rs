//! Recording fakes for the hardware seams.
//!
//! All fakes append to one shared [`Log`] so tests can assert on the exact interleaving of
//! radio, delay, lockout and frontend calls.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;

use crate::controller::{Frontend, ValueEntry};
use crate::lockout::Lockout;
use crate::radio::Transceiver;
use crate::registers::{Register, Strobe};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Open,
    Close,
    Register(Register, u8),
    Strobe(Strobe),
    BeginFifo,
    Fifo(u8),
    ArmEndOfPacket,
    ClearEndOfPacket,
    DelayMs(u32),
    LockoutEnter,
    LockoutExit,
    Status(String),
    ClearStatus,
    Entry(&'static str),
    Indicators(bool),
    Backlight(bool),
    ClearButtons,
    FullUpdate,
}

pub(crate) type Log = Rc<RefCell<Vec<Event>>>;

pub(crate) fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FakeError;

#[derive(Debug)]
pub(crate) struct FakeRadio {
    log: Log,
    pub(crate) fail_open: bool,
    pub(crate) fail_register: Option<Register>,
    pub(crate) fail_fifo_after: Option<usize>,
    pub(crate) pending_polls: usize,
    pub(crate) polls: usize,
    fifo_writes: usize,
}

impl FakeRadio {
    pub(crate) fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            fail_open: false,
            fail_register: None,
            fail_fifo_after: None,
            pending_polls: 0,
            polls: 0,
            fifo_writes: 0,
        }
    }

    fn push(&self, event: Event) {
        self.log.borrow_mut().push(event);
    }
}

impl Transceiver for FakeRadio {
    type Error = FakeError;

    fn open(&mut self) -> Result<(), FakeError> {
        if self.fail_open {
            return Err(FakeError);
        }
        self.push(Event::Open);
        Ok(())
    }

    fn close(&mut self) -> Result<(), FakeError> {
        self.push(Event::Close);
        Ok(())
    }

    fn write_register(&mut self, register: Register, value: u8) -> Result<(), FakeError> {
        if self.fail_register == Some(register) {
            return Err(FakeError);
        }
        self.push(Event::Register(register, value));
        Ok(())
    }

    fn strobe(&mut self, strobe: Strobe) -> Result<(), FakeError> {
        self.push(Event::Strobe(strobe));
        Ok(())
    }

    fn begin_tx_fifo(&mut self) -> Result<(), FakeError> {
        self.push(Event::BeginFifo);
        Ok(())
    }

    fn write_tx_fifo(&mut self, byte: u8) -> Result<(), FakeError> {
        if self.fail_fifo_after == Some(self.fifo_writes) {
            return Err(FakeError);
        }
        self.fifo_writes += 1;
        self.push(Event::Fifo(byte));
        Ok(())
    }

    fn arm_end_of_packet(&mut self) -> Result<(), FakeError> {
        self.push(Event::ArmEndOfPacket);
        Ok(())
    }

    fn end_of_packet(&mut self) -> nb::Result<(), FakeError> {
        self.polls += 1;
        if self.pending_polls > 0 {
            self.pending_polls -= 1;
            return Err(nb::Error::WouldBlock);
        }
        Ok(())
    }

    fn clear_end_of_packet(&mut self) -> Result<(), FakeError> {
        self.push(Event::ClearEndOfPacket);
        Ok(())
    }
}

#[derive(Debug)]
pub(crate) struct FakeDelay {
    log: Log,
}

impl FakeDelay {
    pub(crate) fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ms));
    }
}

#[derive(Debug)]
pub(crate) struct FakeLockout {
    log: Log,
    pub(crate) depth: u8,
}

impl FakeLockout {
    pub(crate) fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            depth: 0,
        }
    }
}

impl Lockout for FakeLockout {
    type State = u8;

    unsafe fn enter(&mut self) -> u8 {
        self.log.borrow_mut().push(Event::LockoutEnter);
        let prior = self.depth;
        self.depth += 1;
        prior
    }

    unsafe fn exit(&mut self, state: u8) {
        self.log.borrow_mut().push(Event::LockoutExit);
        self.depth = state;
    }
}

#[derive(Debug)]
pub(crate) struct FakeFrontend {
    log: Log,
    pub(crate) values: VecDeque<i32>,
    pub(crate) low_battery: bool,
}

impl FakeFrontend {
    pub(crate) fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            values: VecDeque::new(),
            low_battery: false,
        }
    }

    fn push(&self, event: Event) {
        self.log.borrow_mut().push(event);
    }
}

impl Frontend for FakeFrontend {
    fn show_status(&mut self, text: &str) {
        self.push(Event::Status(text.to_string()));
    }

    fn clear_status(&mut self) {
        self.push(Event::ClearStatus);
    }

    /// Returns the next scripted value as is, or the entry's initial value when the script
    /// is empty.
    fn enter_value(&mut self, entry: &ValueEntry) -> i32 {
        self.push(Event::Entry(entry.label));
        self.values
            .pop_front()
            .unwrap_or(i32::from(entry.initial))
    }

    fn set_indicators(&mut self, on: bool) {
        self.push(Event::Indicators(on));
    }

    fn set_backlight_control(&mut self, enabled: bool) {
        self.push(Event::Backlight(enabled));
    }

    fn low_battery(&self) -> bool {
        self.low_battery
    }

    fn clear_button_events(&mut self) {
        self.push(Event::ClearButtons);
    }

    fn request_full_update(&mut self) {
        self.push(Event::FullUpdate);
    }
}
