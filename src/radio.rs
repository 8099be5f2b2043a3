//! Radio peripheral contract.
//!
//! The burst transmitter never touches hardware registers directly. It talks to a
//! [`Transceiver`], which a board support crate implements on top of its radio core
//! (for the CC430 that is the RF1A interface, for a discrete CC1101 an SPI bus).
//!
//! Flag waits inside a single access (instruction ready, data-in ready) belong to the
//! implementation. The end-of-packet signal is exposed as a non-blocking poll so the
//! transmitter decides how to wait for it, see [`busy_wait`].

use core::fmt::Debug;

use crate::registers::{Register, Strobe};

/// Low level access to a sub-GHz transceiver.
pub trait Transceiver {
    /// Error reported by the peripheral.
    type Error: Debug;

    /// Powers the radio core up. The caller waits for the oscillator to settle.
    fn open(&mut self) -> Result<(), Self::Error>;

    /// Powers the radio core down.
    fn close(&mut self) -> Result<(), Self::Error>;

    /// Writes a single configuration register.
    fn write_register(&mut self, register: Register, value: u8) -> Result<(), Self::Error>;

    /// Issues a command strobe.
    fn strobe(&mut self, strobe: Strobe) -> Result<(), Self::Error>;

    /// Sends the TX FIFO burst write instruction
    /// ([`TXFIFO_BURST`](crate::registers::TXFIFO_BURST)). Following calls to
    /// [`write_tx_fifo`](Self::write_tx_fifo) append to the FIFO.
    fn begin_tx_fifo(&mut self) -> Result<(), Self::Error>;

    /// Pushes one byte into the transmit FIFO.
    fn write_tx_fifo(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Selects the end-of-packet edge and clears any stale end-of-packet flag.
    fn arm_end_of_packet(&mut self) -> Result<(), Self::Error>;

    /// Polls the end-of-packet flag.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` while the packet is still on the air.
    fn end_of_packet(&mut self) -> nb::Result<(), Self::Error>;

    /// Clears the end-of-packet flag.
    fn clear_end_of_packet(&mut self) -> Result<(), Self::Error>;
}

/// Spins on `poll` until it stops returning `WouldBlock`.
///
/// There is no timeout: a flag that never asserts blocks forever.
pub fn busy_wait<E, F>(mut poll: F) -> Result<(), E>
where
    F: FnMut() -> nb::Result<(), E>,
{
    nb::block!(poll())
}
