//! CC1101/CC430 radio core register map and command strobes.
//!
//! Only the configuration registers touched by the remote profiles are listed.

/// Configuration registers of the radio core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// GDO0 output pin configuration.
    Iocfg0 = 0x02,
    /// RX FIFO and TX FIFO thresholds.
    Fifothr = 0x03,
    /// Packet length.
    Pktlen = 0x06,
    /// Packet automation control.
    Pktctrl0 = 0x08,
    /// Frequency synthesizer control.
    Fsctrl1 = 0x0B,
    /// Frequency control word, high byte.
    Freq2 = 0x0D,
    /// Frequency control word, middle byte.
    Freq1 = 0x0E,
    /// Frequency control word, low byte.
    Freq0 = 0x0F,
    /// Modem configuration: channel bandwidth and data rate exponent.
    Mdmcfg4 = 0x10,
    /// Modem configuration: data rate mantissa.
    Mdmcfg3 = 0x11,
    /// Modem configuration: modulation format and sync mode.
    Mdmcfg2 = 0x12,
    /// Modem configuration: preamble and channel spacing exponent.
    Mdmcfg1 = 0x13,
    /// Modem deviation setting.
    Deviatn = 0x15,
    /// Main radio control state machine configuration.
    Mcsm0 = 0x18,
    /// Frequency offset compensation configuration.
    Foccfg = 0x19,
    /// AGC control.
    Agcctrl1 = 0x1C,
    /// Wake on radio control.
    Worctrl = 0x20,
    /// Front end TX configuration.
    Frend0 = 0x22,
    /// Frequency synthesizer calibration.
    Fscal3 = 0x23,
    /// Frequency synthesizer calibration.
    Fscal2 = 0x24,
    /// Frequency synthesizer calibration.
    Fscal1 = 0x25,
    /// Frequency synthesizer calibration.
    Fscal0 = 0x26,
    /// Various test settings.
    Test2 = 0x2C,
    /// Various test settings.
    Test1 = 0x2D,
    /// Various test settings.
    Test0 = 0x2E,
}

impl Register {
    /// Register address on the radio core bus.
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Command strobes understood by the radio core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
#[repr(u8)]
pub enum Strobe {
    /// Enable TX.
    Stx = 0x35,
    /// Flush the TX FIFO.
    Sftx = 0x3B,
}

impl Strobe {
    /// Strobe opcode.
    pub const fn opcode(self) -> u8 {
        self as u8
    }
}

/// Instruction byte opening a burst write into the TX FIFO.
pub const TXFIFO_BURST: u8 = 0x7F;
