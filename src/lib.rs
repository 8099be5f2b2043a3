//! # plug433
//!
//! A portable, no_std Rust driver that turns a CC1101/CC430 class sub-GHz transceiver into a
//! remote control for cheap 433 MHz power sockets and gate openers.
//!
//! This crate implements the command side of two unidirectional OOK remotes:
//! - **PLUG**: a socket remote addressed by a 5 bit house code, a channel (A to D) and on/off
//! - **GATE**: a single fixed remote code
//!
//! Transmission is fire-and-forget. A command is encoded into a fixed-length frame, the radio is
//! configured with the variant's register profile, and the frame is sent as a number of bursts,
//! each holding four back-to-back repetitions of the frame.
//!
//! ## Crate features
//! | Feature                       | Description |
//! |-------------------------------|-------------|
//! | `std`                         | Disables `#![no_std]` support |
//! | `safe-mode` (default)         | Provides [`lockout::CriticalSectionLockout`] backed by `critical-section` |
//! | `allow-low-battery` (default) | Transmit even when the low-battery flag is raised |
//! | `defmt-0-3`                   | Uses `defmt` logging |
//! | `log`                         | Uses `log` logging |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use plug433::controller::{ProtocolController, Protocol};
//! use plug433::lockout::CriticalSectionLockout;
//! use plug433::transmitter::BurstTransmitter;
//!
//! let transmitter = BurstTransmitter::new(radio, delay, CriticalSectionLockout);
//! let mut remote = ProtocolController::new(transmitter, frontend);
//!
//! remote.configure(Protocol::Plug)?; // asks for address, burst count and safe mode
//! remote.select(Protocol::Plug)?;    // asks for a code and transmits it
//! ```
//!
//! ## Integration Notes
//!
//! - Transmission is blocking. [`transmitter::BurstTransmitter::transmit`] returns once every
//!   burst has left the antenna.
//! - Waits on the end-of-packet flag have no timeout; a radio that never signals hangs the caller.
//! - With safe mode enabled interrupts stay disabled for the whole burst loop, system tick included.
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "safe-mode")]
pub use critical_section;

pub use heapless;

#[macro_use]
mod fmt;

pub mod consts;
pub mod controller;
pub mod encoding;
pub mod error;
pub mod lockout;
pub mod profile;
pub mod radio;
pub mod registers;
pub mod transmitter;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{Frontend, Outcome, ProtocolController};
pub use encoding::{Address, Channel, Command, Frame, Protocol, SwitchState, encode};
pub use error::{Error, InvalidInput};
pub use profile::RadioProfile;
pub use radio::Transceiver;
pub use transmitter::{BurstTransmitter, TransmitConfig};
