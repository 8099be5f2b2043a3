//! Blocking burst transmitter.
//!
//! [`BurstTransmitter`] owns the radio, the delay provider and the interrupt lockout and
//! drives one transmission session per call to [`transmit`](BurstTransmitter::transmit):
//!
//! ```text
//! Idle -> RadioOpen -> Configured -> Burst(1..=n) -> RadioClosed
//! ```
//!
//! A completed session stays in `RadioClosed` until the next one starts. A failed session
//! drops back to `Idle`.
//!
//! 1. power the radio up and wait [`RADIO_SETTLE_MS`]
//! 2. write the [`RadioProfile`]
//! 3. in safe mode, disable interrupts until the burst loop is over
//! 4. arm the end-of-packet signal
//! 5. for each burst: flush the TX FIFO, write the frame `word_repeat` times (plus the GATE
//!    terminator), strobe TX, wait for end-of-packet, clear it, wait [`INTER_BURST_MS`]
//! 6. restore interrupts
//! 7. power the radio down
//!
//! The radio is powered down and interrupts are restored on every exit path, including
//! errors reported by the [`Transceiver`].

use embedded_hal::delay::DelayNs;

use crate::consts::{
    GATE_DEFAULT_BURSTS, INTER_BURST_MS, MAX_BURSTS, MIN_BURSTS, PLUG_DEFAULT_BURSTS,
    RADIO_SETTLE_MS, WORD_REPEAT,
};
use crate::encoding::Frame;
use crate::error::{Error, InvalidInput};
use crate::lockout::{Lockout, LockoutGuard};
use crate::profile::RadioProfile;
use crate::radio::{Transceiver, busy_wait};
use crate::registers::Strobe;

/// How a frame is put on the air.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct TransmitConfig {
    burst_count: u8,
    /// Disable interrupts for the duration of the burst loop.
    pub safe_mode: bool,
    word_repeat: u8,
}

impl TransmitConfig {
    /// Default socket remote settings: 3 bursts, safe mode on.
    pub const PLUG: Self = Self {
        burst_count: PLUG_DEFAULT_BURSTS,
        safe_mode: true,
        word_repeat: WORD_REPEAT,
    };

    /// Gate remote settings: 2 bursts, safe mode on.
    pub const GATE: Self = Self {
        burst_count: GATE_DEFAULT_BURSTS,
        safe_mode: true,
        word_repeat: WORD_REPEAT,
    };

    /// Builds a configuration with the protocol word repeat of 4.
    pub fn new(burst_count: u8, safe_mode: bool) -> Result<Self, InvalidInput> {
        let mut config = Self {
            burst_count: MIN_BURSTS,
            safe_mode,
            word_repeat: WORD_REPEAT,
        };
        config.set_burst_count(burst_count)?;
        Ok(config)
    }

    /// Number of bursts per transmission.
    pub fn burst_count(&self) -> u8 {
        self.burst_count
    }

    /// Sets the number of bursts per transmission.
    pub fn set_burst_count(&mut self, burst_count: u8) -> Result<(), InvalidInput> {
        if !(MIN_BURSTS..=MAX_BURSTS).contains(&burst_count) {
            return Err(InvalidInput::BurstCount(burst_count));
        }
        self.burst_count = burst_count;
        Ok(())
    }

    /// Back-to-back frame repetitions inside one burst.
    pub fn word_repeat(&self) -> u8 {
        self.word_repeat
    }
}

/// Progress of the current transmission session.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum TxState {
    /// No session has completed, or the last one failed.
    #[default]
    Idle,
    /// The radio is powered and settling.
    RadioOpen,
    /// The profile has been written.
    Configured,
    /// Sending burst `n` (1 based).
    Burst(u8),
    /// The last session completed and the radio is powered down.
    RadioClosed,
}

/// Keeps the radio powered for the lifetime of a transmission.
///
/// A session only exists once `open` succeeded. Dropping it powers the radio down unless
/// [`close`](Session::close) already did.
struct Session<'a, R: Transceiver> {
    radio: &'a mut R,
    open: bool,
}

impl<'a, R: Transceiver> Session<'a, R> {
    fn open(radio: &'a mut R) -> Result<Self, R::Error> {
        radio.open()?;
        Ok(Self { radio, open: true })
    }

    fn radio(&mut self) -> &mut R {
        self.radio
    }

    fn close(mut self) -> Result<(), R::Error> {
        self.open = false;
        self.radio.close()
    }
}

impl<R: Transceiver> Drop for Session<'_, R> {
    fn drop(&mut self) {
        if self.open {
            warn!("transmission aborted, powering radio down");
            let _ = self.radio.close();
        }
    }
}

/// Drives a [`Transceiver`] through complete burst transmissions.
///
/// ## Type Parameters
///
/// - `R`: the radio peripheral, see [`Transceiver`]
/// - `D`: a blocking delay provider implementing [`embedded_hal::delay::DelayNs`]
/// - `L`: the interrupt lockout used in safe mode, see [`Lockout`]
///
/// ## Example
///
/// ```rust,ignore
/// use plug433::encoding::{encode, Command};
/// use plug433::profile::GATE_PROFILE;
/// use plug433::transmitter::{BurstTransmitter, TransmitConfig};
///
/// let mut tx = BurstTransmitter::new(radio, delay, lockout);
/// tx.transmit(&encode(&Command::Gate), &GATE_PROFILE, &TransmitConfig::GATE)?;
/// ```
#[derive(Debug)]
pub struct BurstTransmitter<R, D, L>
where
    R: Transceiver,
    D: DelayNs,
    L: Lockout,
{
    /// Radio peripheral
    pub radio: R,
    /// Blocking delay provider
    pub delay: D,
    /// Interrupt lockout used in safe mode
    pub lockout: L,
    /// Current session state
    pub state: TxState,
    /// Completed transmissions
    pub tx_good: u16,
    /// Bursts handed to the radio since creation
    pub bursts_sent: u32,
}

impl<R, D, L> BurstTransmitter<R, D, L>
where
    R: Transceiver,
    D: DelayNs,
    L: Lockout,
{
    /// Creates an idle transmitter. The radio is not touched until the first transmission.
    pub fn new(radio: R, delay: D, lockout: L) -> Self {
        Self {
            radio,
            delay,
            lockout,
            state: TxState::Idle,
            tx_good: 0,
            bursts_sent: 0,
        }
    }

    /// Transmits `frame` with the radio configured from `profile`.
    ///
    /// Blocks until every burst has been sent. There is no timeout on the end-of-packet wait.
    ///
    /// # Errors
    /// Returns [`Error::Radio`] if the peripheral reports an error. The radio is powered down
    /// and interrupts are restored before returning.
    pub fn transmit(
        &mut self,
        frame: &Frame,
        profile: &RadioProfile,
        config: &TransmitConfig,
    ) -> Result<(), Error<R::Error>> {
        let result = self.run_session(frame, profile, config);
        match result {
            Ok(()) => self.tx_good = self.tx_good.wrapping_add(1),
            Err(_) => self.state = TxState::Idle,
        }
        result
    }

    /// Blocks for `ms` milliseconds on the transmitter's delay provider.
    pub fn pause_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn run_session(
        &mut self,
        frame: &Frame,
        profile: &RadioProfile,
        config: &TransmitConfig,
    ) -> Result<(), Error<R::Error>> {
        let Self {
            radio,
            delay,
            lockout,
            state,
            bursts_sent,
            ..
        } = self;

        info!(
            "transmitting {} byte frame, {} bursts, safe mode {}",
            frame.len(),
            config.burst_count(),
            config.safe_mode
        );

        let mut session = Session::open(radio).map_err(Error::Radio)?;
        *state = TxState::RadioOpen;
        delay.delay_ms(RADIO_SETTLE_MS);

        profile.apply(session.radio()).map_err(Error::Radio)?;
        *state = TxState::Configured;

        {
            let _lockout = config.safe_mode.then(|| LockoutGuard::new(lockout));

            session.radio().arm_end_of_packet().map_err(Error::Radio)?;

            for burst in 1..=config.burst_count() {
                *state = TxState::Burst(burst);
                send_burst(session.radio(), frame, config.word_repeat())
                    .map_err(Error::Radio)?;
                *bursts_sent = bursts_sent.wrapping_add(1);
                debug!("burst {} of {} sent", burst, config.burst_count());
                delay.delay_ms(INTER_BURST_MS);
            }
        }

        session.close().map_err(Error::Radio)?;
        *state = TxState::RadioClosed;
        Ok(())
    }
}

/// One burst: flush, fill the FIFO, send, wait for the packet to leave.
fn send_burst<R: Transceiver>(
    radio: &mut R,
    frame: &Frame,
    word_repeat: u8,
) -> Result<(), R::Error> {
    radio.strobe(Strobe::Sftx)?;
    radio.begin_tx_fifo()?;

    for _ in 0..word_repeat {
        for byte in frame.wire_bytes() {
            radio.write_tx_fifo(byte)?;
        }
    }
    if let Some(terminator) = frame.terminator() {
        radio.write_tx_fifo(terminator)?;
    }

    radio.strobe(Strobe::Stx)?;
    busy_wait(|| radio.end_of_packet())?;
    radio.clear_end_of_packet()
}
