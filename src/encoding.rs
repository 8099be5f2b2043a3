//! Frame encoding for the PLUG and GATE remotes.
//!
//! This module maps a logical [`Command`] to the fixed-length byte sequence a receiver expects.
//! Encoding is pure: the same command always yields a byte-identical [`Frame`].
//!
//! ## PLUG layout
//!
//! | Slot   | Content |
//! |--------|---------|
//! | 0..=4  | house address, MSB first. A set bit is `BIT_0`, a clear bit stays `BIT_F` |
//! | 5..=8  | channel A-D, the selected slot is `BIT_0` |
//! | 9      | `BIT_F` |
//! | 10, 11 | `BIT_0` in slot 10 for on, in slot 11 for off |
//! | 12..=15| sync trailer `80 00 00 00` |
//!
//! Every byte is inverted on its way to the transmit FIFO, see [`Frame::wire_bytes`].
//!
//! ## GATE layout
//!
//! A single fixed ten byte code, sent as-is and followed by one zero terminator per burst.

use heapless::Vec;

use crate::consts::{
    GATE_SEQUENCE, GATE_TERMINATOR, MAX_FRAME_LEN, PLUG_ADDRESS_BITS, PLUG_BIT_0, PLUG_BIT_F,
    PLUG_CHANNEL_OFFSET, PLUG_DEFAULT_ADDRESS, PLUG_FRAME_LEN, PLUG_MAX_ADDRESS, PLUG_MAX_CODE,
    PLUG_OFF_SLOT, PLUG_ON_SLOT, PLUG_SYNC,
};
use crate::error::InvalidInput;

/// The remote protocol a command is sent with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Protocol {
    /// Fixed-code gate opener.
    Gate,
    /// Addressable power socket.
    Plug,
}

impl Protocol {
    /// The short label shown on the display while the menu item is selected.
    pub const fn label(self) -> &'static str {
        match self {
            Protocol::Gate => " GATE",
            Protocol::Plug => "PLUG ",
        }
    }
}

/// A 5 bit PLUG house address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Address(u8);

impl Address {
    /// Builds an address, rejecting values wider than 5 bits.
    pub const fn new(value: u8) -> Result<Self, InvalidInput> {
        if value > PLUG_MAX_ADDRESS {
            Err(InvalidInput::Address(value))
        } else {
            Ok(Self(value))
        }
    }

    /// The raw address value.
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Address {
    /// The factory address, `0x18`.
    fn default() -> Self {
        Self(PLUG_DEFAULT_ADDRESS)
    }
}

/// PLUG channel selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Channel {
    /// Channel A.
    A = 0,
    /// Channel B.
    B = 1,
    /// Channel C.
    C = 2,
    /// Channel D.
    D = 3,
}

impl Channel {
    /// Zero based channel index.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Channel {
    type Error = InvalidInput;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Channel::A),
            1 => Ok(Channel::B),
            2 => Ok(Channel::C),
            3 => Ok(Channel::D),
            other => Err(InvalidInput::Channel(other)),
        }
    }
}

/// Requested socket state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum SwitchState {
    /// Switch the socket on.
    On,
    /// Switch the socket off.
    Off,
}

/// One logical remote command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Command {
    /// Press the gate remote button.
    Gate,
    /// Switch a socket.
    Plug {
        /// House address of the socket group.
        address: Address,
        /// Socket within the group.
        channel: Channel,
        /// Requested state.
        state: SwitchState,
    },
}

impl Command {
    /// Builds a PLUG command from the single digit code entered on the menu.
    ///
    /// Even codes switch on, odd codes switch off, and `code / 2` selects the channel, so
    /// `0`/`1` are A on/off, `2`/`3` are B on/off and so on.
    pub fn from_code(address: Address, code: u8) -> Result<Self, InvalidInput> {
        if code > PLUG_MAX_CODE {
            return Err(InvalidInput::Code(code));
        }
        let state = if code % 2 == 0 {
            SwitchState::On
        } else {
            SwitchState::Off
        };
        Ok(Command::Plug {
            address,
            channel: Channel::try_from(code >> 1)?,
            state,
        })
    }

    /// The protocol this command is sent with.
    pub const fn protocol(&self) -> Protocol {
        match self {
            Command::Gate => Protocol::Gate,
            Command::Plug { .. } => Protocol::Plug,
        }
    }
}

/// An encoded command, ready to be written to the transmit FIFO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    protocol: Protocol,
    bytes: Vec<u8, MAX_FRAME_LEN>,
}

impl Frame {
    /// The protocol the frame was encoded for.
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// The logical frame bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of logical bytes in the frame.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`; frames have a fixed, non-zero length.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The bytes as they go into the transmit FIFO.
    ///
    /// PLUG receivers expect the inverse of the logical template, GATE bytes are sent verbatim.
    pub fn wire_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        let invert = self.protocol == Protocol::Plug;
        self.bytes
            .iter()
            .map(move |&b| if invert { !b } else { b })
    }

    /// Byte appended once per burst, after all repetitions of the frame.
    pub fn terminator(&self) -> Option<u8> {
        match self.protocol {
            Protocol::Gate => Some(GATE_TERMINATOR),
            Protocol::Plug => None,
        }
    }

    /// Total bytes pushed into the FIFO for one burst of `word_repeat` repetitions.
    pub fn burst_len(&self, word_repeat: u8) -> usize {
        self.len() * word_repeat as usize + usize::from(self.terminator().is_some())
    }
}

/// Encodes `command` into its frame.
pub fn encode(command: &Command) -> Frame {
    match *command {
        Command::Gate => encode_gate(),
        Command::Plug {
            address,
            channel,
            state,
        } => encode_plug(address, channel, state),
    }
}

fn encode_gate() -> Frame {
    let mut bytes = Vec::new();
    let _ = bytes.extend_from_slice(&GATE_SEQUENCE);
    Frame {
        protocol: Protocol::Gate,
        bytes,
    }
}

fn encode_plug(address: Address, channel: Channel, state: SwitchState) -> Frame {
    let mut template = [PLUG_BIT_F; PLUG_FRAME_LEN];
    template[PLUG_FRAME_LEN - PLUG_SYNC.len()..].copy_from_slice(&PLUG_SYNC);

    // Slot 0 carries bit 4.
    for (slot, byte) in template.iter_mut().take(PLUG_ADDRESS_BITS).enumerate() {
        let mask = 1 << (PLUG_ADDRESS_BITS - 1 - slot);
        if address.value() & mask != 0 {
            *byte = PLUG_BIT_0;
        }
    }

    template[PLUG_CHANNEL_OFFSET + channel.index()] = PLUG_BIT_0;

    match state {
        SwitchState::On => template[PLUG_ON_SLOT] = PLUG_BIT_0,
        SwitchState::Off => template[PLUG_OFF_SLOT] = PLUG_BIT_0,
    }

    let mut bytes = Vec::new();
    let _ = bytes.extend_from_slice(&template);
    Frame {
        protocol: Protocol::Plug,
        bytes,
    }
}
