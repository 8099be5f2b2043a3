//! Constants shared by the frame encoder, the burst transmitter and the menu controller.
//!
//! ## Key Concepts
//!
//! - **Symbols**: PLUG frames use exactly two byte values per slot, [`PLUG_BIT_0`] and
//!   [`PLUG_BIT_F`]. Any other value in slots 0 to 11 is a malformed frame.
//! - **Word repeat**: every burst carries the same frame [`WORD_REPEAT`] times back-to-back.
//! - **Timing**: all waits are blocking millisecond delays on the caller's `DelayNs`.
//!
//! The values mirror what commercial 433 MHz socket receivers expect and must not be tuned
//! independently of the register profiles in [`crate::profile`].

/// Byte pattern encoding a logical zero slot in a PLUG frame.
pub const PLUG_BIT_0: u8 = 0x88;

/// Byte pattern encoding a floating ("don't care"/one) slot in a PLUG frame.
pub const PLUG_BIT_F: u8 = 0x8E;

/// Number of bytes in an encoded PLUG frame.
pub const PLUG_FRAME_LEN: usize = 16;

/// Number of address slots at the start of a PLUG frame.
pub const PLUG_ADDRESS_BITS: usize = 5;

/// Frame slot of channel A. Channel `n` lives at `PLUG_CHANNEL_OFFSET + n`.
pub const PLUG_CHANNEL_OFFSET: usize = 5;

/// Frame slot that carries `BIT_0` for an "on" command.
pub const PLUG_ON_SLOT: usize = 10;

/// Frame slot that carries `BIT_0` for an "off" command.
pub const PLUG_OFF_SLOT: usize = 11;

/// Sync trailer closing every PLUG frame (slots 12 to 15).
pub const PLUG_SYNC: [u8; 4] = [0x80, 0x00, 0x00, 0x00];

/// Largest valid PLUG house address (5 bits).
pub const PLUG_MAX_ADDRESS: u8 = 0x1F;

/// Highest PLUG channel index (channel D).
pub const PLUG_MAX_CHANNEL: u8 = 3;

/// Highest code accepted from the menu. Even codes switch on, odd codes switch off,
/// `code / 2` selects the channel.
pub const PLUG_MAX_CODE: u8 = 7;

/// Factory default PLUG house address.
pub const PLUG_DEFAULT_ADDRESS: u8 = 0x18;

/// Default number of PLUG bursts per activation.
pub const PLUG_DEFAULT_BURSTS: u8 = 3;

/// The fixed GATE remote code.
pub const GATE_SEQUENCE: [u8; GATE_FRAME_LEN] =
    [0x00, 0x00, 0x00, 0x00, 0x0B, 0x25, 0xB6, 0x5B, 0x65, 0x80];

/// Number of bytes in the GATE frame.
pub const GATE_FRAME_LEN: usize = 10;

/// Byte written once per GATE burst after the repeated frames.
pub const GATE_TERMINATOR: u8 = 0x00;

/// Default number of GATE bursts per activation.
pub const GATE_DEFAULT_BURSTS: u8 = 2;

/// Capacity of a [`Frame`](crate::encoding::Frame) buffer.
pub const MAX_FRAME_LEN: usize = PLUG_FRAME_LEN;

/// Back-to-back repetitions of the frame inside one burst.
pub const WORD_REPEAT: u8 = 4;

/// Smallest burst count accepted by the menu.
pub const MIN_BURSTS: u8 = 1;

/// Largest burst count accepted by the menu.
pub const MAX_BURSTS: u8 = 10;

/// Delay after powering the radio before the first register write, in milliseconds.
pub const RADIO_SETTLE_MS: u32 = 1;

/// Quiet time after each burst so receivers can re-arm, in milliseconds.
pub const INTER_BURST_MS: u32 = 10;

/// Delay after a transmission before button events are honoured again, in milliseconds.
pub const DEBOUNCE_MS: u32 = 250;

/// Whether an activation proceeds while the low-battery flag is raised.
pub const ALLOW_WITH_LOW_BATTERY: bool = cfg!(feature = "allow-low-battery");

/// Crystal frequency of the CC430/CC1101 reference designs in Hz.
pub const XOSC_HZ: u32 = 26_000_000;
