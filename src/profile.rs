//! Register profiles for the two remote protocols.
//!
//! A [`RadioProfile`] is an ordered table of `(register, value)` pairs. It is written in full,
//! in table order, at the start of every transmission session. Nothing is read back and nothing
//! is cached: the radio is powered down between sessions.
//!
//! Both profiles write the same set of registers, so switching protocol never leaves a
//! register configured by the other one. They share the 433.92 MHz carrier and differ in
//! packet length, modem configuration and symbol rate.

use crate::radio::Transceiver;
use crate::registers::Register;

/// An ordered radio configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioProfile {
    settings: &'static [(Register, u8)],
}

impl RadioProfile {
    /// Wraps a register table.
    pub const fn new(settings: &'static [(Register, u8)]) -> Self {
        Self { settings }
    }

    /// The register table in write order.
    pub const fn settings(&self) -> &'static [(Register, u8)] {
        self.settings
    }

    /// Writes every register of the profile, in order.
    pub fn apply<R: Transceiver>(&self, radio: &mut R) -> Result<(), R::Error> {
        for &(register, value) in self.settings {
            trace!("reg {} <- {}", register.addr(), value);
            radio.write_register(register, value)?;
        }
        debug!("radio profile applied ({} registers)", self.settings.len());
        Ok(())
    }

    /// Value the profile writes to `register`, if any.
    pub fn value(&self, register: Register) -> Option<u8> {
        self.settings
            .iter()
            .rev()
            .find(|(r, _)| *r == register)
            .map(|&(_, v)| v)
    }

    /// Configured packet length in bytes.
    pub fn packet_len(&self) -> Option<u8> {
        self.value(Register::Pktlen)
    }

    /// Carrier frequency in Hz for a crystal of `xosc_hz`.
    ///
    /// `f = xosc * FREQ / 2^16`
    pub fn carrier_hz(&self, xosc_hz: u32) -> Option<u32> {
        let freq = (u32::from(self.value(Register::Freq2)?) << 16)
            | (u32::from(self.value(Register::Freq1)?) << 8)
            | u32::from(self.value(Register::Freq0)?);
        Some(((u64::from(xosc_hz) * u64::from(freq)) >> 16) as u32)
    }

    /// Symbol rate in baud for a crystal of `xosc_hz`.
    ///
    /// `R = (256 + DRATE_M) * 2^DRATE_E * xosc / 2^28`
    pub fn symbol_rate(&self, xosc_hz: u32) -> Option<u32> {
        let exponent = self.value(Register::Mdmcfg4)? & 0x0F;
        let mantissa = u64::from(self.value(Register::Mdmcfg3)?);
        Some((((256 + mantissa) << exponent) * u64::from(xosc_hz) >> 28) as u32)
    }
}

/// Register settings for the socket remote.
pub const PLUG_PROFILE: RadioProfile = RadioProfile::new(&[
    (Register::Iocfg0, 0x06),
    (Register::Fifothr, 0x47),
    (Register::Pktlen, 64),
    (Register::Pktctrl0, 0x00),
    (Register::Fsctrl1, 0x06),
    (Register::Freq2, 0x10),
    (Register::Freq1, 0xB0),
    (Register::Freq0, 0x71),
    (Register::Mdmcfg4, 0xF6),
    (Register::Mdmcfg3, 0xF8),
    (Register::Mdmcfg2, 0x33),
    (Register::Mdmcfg1, 0x22),
    (Register::Deviatn, 0x62),
    (Register::Mcsm0, 0x10),
    (Register::Foccfg, 0x1D),
    (Register::Agcctrl1, 0x00),
    (Register::Worctrl, 0xFB),
    (Register::Frend0, 0x11),
    (Register::Fscal3, 0xE9),
    (Register::Fscal2, 0x2A),
    (Register::Fscal1, 0x00),
    (Register::Fscal0, 0x1F),
    (Register::Test2, 0x81),
    (Register::Test1, 0x35),
    (Register::Test0, 0x09),
]);

/// Register settings for the gate remote.
pub const GATE_PROFILE: RadioProfile = RadioProfile::new(&[
    (Register::Iocfg0, 0x06),
    (Register::Fifothr, 0x47),
    // four frames plus the terminator
    (Register::Pktlen, 41),
    (Register::Pktctrl0, 0x00),
    (Register::Fsctrl1, 0x06),
    (Register::Freq2, 0x10),
    (Register::Freq1, 0xB0),
    (Register::Freq0, 0x71),
    (Register::Mdmcfg4, 0x26),
    (Register::Mdmcfg3, 0xE4),
    (Register::Mdmcfg2, 0x30),
    (Register::Mdmcfg1, 0x02),
    (Register::Deviatn, 0x62),
    (Register::Mcsm0, 0x10),
    (Register::Foccfg, 0x1D),
    (Register::Agcctrl1, 0x00),
    (Register::Worctrl, 0xFB),
    (Register::Frend0, 0x11),
    (Register::Fscal3, 0xE9),
    (Register::Fscal2, 0x2A),
    (Register::Fscal1, 0x00),
    (Register::Fscal0, 0x1F),
    (Register::Test2, 0x81),
    (Register::Test1, 0x35),
    (Register::Test0, 0x09),
]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{WORD_REPEAT, XOSC_HZ};
    use crate::encoding::{Address, Command, encode};
    use crate::testing::{Event, FakeRadio, new_log};

    #[test]
    fn test_apply_writes_every_register_in_order() {
        let log = new_log();
        let mut radio = FakeRadio::new(&log);
        PLUG_PROFILE.apply(&mut radio).unwrap();

        let expected: Vec<Event> = PLUG_PROFILE
            .settings()
            .iter()
            .map(|&(r, v)| Event::Register(r, v))
            .collect();
        assert_eq!(*log.borrow(), expected);
    }

    #[test]
    fn test_apply_stops_on_first_error() {
        let log = new_log();
        let mut radio = FakeRadio::new(&log);
        radio.fail_register = Some(Register::Freq2);
        assert!(GATE_PROFILE.apply(&mut radio).is_err());
        assert_eq!(log.borrow().len(), 5);
    }

    #[test]
    fn test_profiles_reconfigure_the_same_registers() {
        let plug: Vec<Register> = PLUG_PROFILE.settings().iter().map(|s| s.0).collect();
        let gate: Vec<Register> = GATE_PROFILE.settings().iter().map(|s| s.0).collect();
        assert_eq!(plug, gate);
    }

    #[test]
    fn test_profiles_share_the_433_92_mhz_carrier() {
        let plug = PLUG_PROFILE.carrier_hz(XOSC_HZ).unwrap();
        let gate = GATE_PROFILE.carrier_hz(XOSC_HZ).unwrap();
        assert_eq!(plug, gate);
        assert!((433_900_000..433_940_000).contains(&plug), "{plug}");
    }

    #[test]
    fn test_symbol_rates_differ_per_protocol() {
        assert_eq!(PLUG_PROFILE.symbol_rate(XOSC_HZ), Some(3124));
        assert_eq!(GATE_PROFILE.symbol_rate(XOSC_HZ), Some(3000));
    }

    #[test]
    fn test_packet_len_matches_burst_payload() {
        let address = Address::new(0).unwrap();
        let plug = encode(&Command::from_code(address, 0).unwrap());
        let gate = encode(&Command::Gate);
        assert_eq!(
            PLUG_PROFILE.packet_len().map(usize::from),
            Some(plug.burst_len(WORD_REPEAT))
        );
        assert_eq!(
            GATE_PROFILE.packet_len().map(usize::from),
            Some(gate.burst_len(WORD_REPEAT))
        );
    }
}
