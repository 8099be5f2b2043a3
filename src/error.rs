//! Error types.
//!
//! Encoding itself cannot fail. Values are checked once, when an [`Address`](crate::Address),
//! [`Channel`](crate::Channel) or [`TransmitConfig`](crate::TransmitConfig) is built, and the
//! only runtime failures left are the ones reported by the radio peripheral.

use core::fmt::Debug;

/// A value outside the range a remote can put on the air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum InvalidInput {
    /// House address wider than 5 bits.
    #[error("address {0} does not fit in 5 bits")]
    Address(u8),
    /// Channel index above D.
    #[error("channel {0} is not one of A-D")]
    Channel(u8),
    /// Menu code above the highest on/off code.
    #[error("code {0} is out of range")]
    Code(u8),
    /// Burst count outside the accepted range.
    #[error("burst count {0} is out of range")]
    BurstCount(u8),
}

/// Errors returned by the transmitter and the controller.
///
/// `E` is the error type of the [`Transceiver`](crate::Transceiver) in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error<E: Debug> {
    /// The radio peripheral rejected an operation.
    #[error("radio error: {0:?}")]
    Radio(E),
    /// A command or setting was out of range.
    #[error(transparent)]
    Input(#[from] InvalidInput),
}

#[cfg(feature = "defmt-0-3")]
impl<E: Debug> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Radio(_) => defmt::write!(f, "radio error"),
            Self::Input(input) => defmt::write!(f, "invalid input: {}", input),
        }
    }
}
