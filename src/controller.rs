//! Menu bindings for the two remotes.
//!
//! [`ProtocolController`] is what the watch menu calls into. Each protocol has a label, a
//! configuration action and an activation action:
//!
//! | Action      | PLUG | GATE |
//! |-------------|------|------|
//! | `display`   | `"PLUG "` | `" GATE"` |
//! | `configure` | asks for address, burst count and safe mode | nothing |
//! | `select`    | asks for a code, then transmits it | transmits the fixed code |
//!
//! Every transmission is bracketed for the user: the three indicators switch on before the
//! radio is touched and off once the last burst is out, followed by a debounce delay before
//! the backlight button is honoured again.

use embedded_hal::delay::DelayNs;

use crate::consts::{
    ALLOW_WITH_LOW_BATTERY, DEBOUNCE_MS, MAX_BURSTS, MIN_BURSTS, PLUG_MAX_ADDRESS,
    PLUG_MAX_CODE,
};
use crate::encoding::{Address, Command, Protocol, encode};
use crate::error::{Error, InvalidInput};
use crate::lockout::Lockout;
use crate::profile::{GATE_PROFILE, PLUG_PROFILE, RadioProfile};
use crate::radio::Transceiver;
use crate::transmitter::{BurstTransmitter, TransmitConfig};

/// A bounded numeric entry request for the [`Frontend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct ValueEntry {
    /// Short prompt shown next to the value.
    pub label: &'static str,
    /// Number of digits the value is shown with.
    pub digits: u8,
    /// Smallest accepted value.
    pub min: u8,
    /// Largest accepted value.
    pub max: u8,
    /// Value the entry starts from.
    pub initial: u8,
}

impl ValueEntry {
    /// Wraps `value` into `min..=max`: stepping past `max` lands on `min` and below `min`
    /// lands on `max`.
    pub fn rollover(&self, value: i32) -> u8 {
        match u8::try_from(value) {
            Ok(v) if v > self.max => self.min,
            Ok(v) if v < self.min => self.max,
            Ok(v) => v,
            Err(_) if value < 0 => self.max,
            Err(_) => self.min,
        }
    }
}

/// Display, input and status services of the host device.
pub trait Frontend {
    /// Shows a short status string at the fixed status position.
    fn show_status(&mut self, text: &str);

    /// Blanks the status line.
    fn clear_status(&mut self);

    /// Runs the numeric entry widget and returns the accepted value.
    ///
    /// Values outside the entry's bounds are wrapped by the caller, see
    /// [`ValueEntry::rollover`].
    fn enter_value(&mut self, entry: &ValueEntry) -> i32;

    /// Switches the three transmission indicators on or off.
    fn set_indicators(&mut self, on: bool);

    /// Enables or disables the backlight button. Disabling also turns the backlight off.
    fn set_backlight_control(&mut self, enabled: bool);

    /// Whether the battery monitor reports a low battery.
    fn low_battery(&self) -> bool;

    /// Drops pending button events.
    fn clear_button_events(&mut self);

    /// Asks the display driver to redraw everything on the next update.
    fn request_full_update(&mut self);
}

/// What an activation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Outcome {
    /// The command was transmitted.
    Sent,
    /// The battery was low and low-battery transmission is disabled.
    SkippedLowBattery,
}

/// Persistent socket remote settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct PlugSettings {
    /// House address of the socket group.
    pub address: Address,
    /// Burst count and safe mode.
    pub transmit: TransmitConfig,
}

impl Default for PlugSettings {
    fn default() -> Self {
        Self {
            address: Address::default(),
            transmit: TransmitConfig::PLUG,
        }
    }
}

/// Orchestrates encoding, radio profile selection and transmission for both remotes.
#[derive(Debug)]
pub struct ProtocolController<R, D, L, F>
where
    R: Transceiver,
    D: DelayNs,
    L: Lockout,
    F: Frontend,
{
    /// The burst transmitter
    pub transmitter: BurstTransmitter<R, D, L>,
    /// Display, input and status services
    pub frontend: F,
    /// Socket remote settings, changed through [`configure`](Self::configure)
    pub plug: PlugSettings,
    /// Gate remote settings
    pub gate: TransmitConfig,
    /// Transmit even when the frontend reports a low battery. Starts from the
    /// `allow-low-battery` feature.
    pub allow_low_battery: bool,
}

impl<R, D, L, F> ProtocolController<R, D, L, F>
where
    R: Transceiver,
    D: DelayNs,
    L: Lockout,
    F: Frontend,
{
    /// Creates a controller with factory settings.
    pub fn new(transmitter: BurstTransmitter<R, D, L>, frontend: F) -> Self {
        Self {
            transmitter,
            frontend,
            plug: PlugSettings::default(),
            gate: TransmitConfig::GATE,
            allow_low_battery: ALLOW_WITH_LOW_BATTERY,
        }
    }

    /// Draws the menu label for `protocol`. Only full updates redraw.
    pub fn display(&mut self, protocol: Protocol, full_update: bool) {
        if full_update {
            self.frontend.show_status(protocol.label());
        }
    }

    /// Runs the configuration dialog for `protocol`.
    ///
    /// PLUG asks for the house address, the burst count and safe mode. GATE has nothing to
    /// configure.
    pub fn configure(&mut self, protocol: Protocol) -> Result<(), Error<R::Error>> {
        if protocol == Protocol::Gate {
            return Ok(());
        }

        let address = self.ask(&ValueEntry {
            label: "CH",
            digits: 2,
            min: 0,
            max: PLUG_MAX_ADDRESS,
            initial: self.plug.address.value(),
        });
        self.plug.address = Address::new(address)?;

        let bursts = self.ask(&ValueEntry {
            label: "BN",
            digits: 2,
            min: MIN_BURSTS,
            max: MAX_BURSTS,
            initial: self.plug.transmit.burst_count(),
        });
        self.plug.transmit.set_burst_count(bursts)?;

        let safe = self.ask(&ValueEntry {
            label: "SAFE",
            digits: 1,
            min: 0,
            max: 1,
            initial: u8::from(self.plug.transmit.safe_mode),
        });
        self.plug.transmit.safe_mode = safe != 0;

        info!(
            "plug settings: address {}, {} bursts, safe mode {}",
            self.plug.address.value(),
            self.plug.transmit.burst_count(),
            self.plug.transmit.safe_mode
        );

        self.frontend.clear_button_events();
        self.frontend.request_full_update();
        Ok(())
    }

    /// Menu activation for `protocol`.
    ///
    /// GATE transmits its fixed code. PLUG first asks for a code (`0..=7`, even = on,
    /// odd = off, `code / 2` = channel) and transmits it to the configured address.
    pub fn select(&mut self, protocol: Protocol) -> Result<Outcome, Error<R::Error>> {
        if self.battery_too_low() {
            return Ok(Outcome::SkippedLowBattery);
        }
        self.frontend.set_backlight_control(false);

        let command = match protocol {
            Protocol::Gate => Ok(Command::Gate),
            Protocol::Plug => self.ask_code(),
        };
        match command {
            Ok(command) => self.send(&command),
            Err(err) => {
                self.frontend.set_backlight_control(true);
                Err(err.into())
            }
        }
    }

    /// Transmits `command` with the settings of its protocol.
    pub fn activate(&mut self, command: &Command) -> Result<Outcome, Error<R::Error>> {
        if self.battery_too_low() {
            return Ok(Outcome::SkippedLowBattery);
        }
        self.frontend.set_backlight_control(false);
        self.send(command)
    }

    fn battery_too_low(&self) -> bool {
        let skip = !self.allow_low_battery && self.frontend.low_battery();
        if skip {
            warn!("battery low, transmission skipped");
        }
        skip
    }

    fn ask_code(&mut self) -> Result<Command, InvalidInput> {
        let code = self.ask(&ValueEntry {
            label: "CODE",
            digits: 1,
            min: 0,
            max: PLUG_MAX_CODE,
            initial: 0,
        });
        let command = Command::from_code(self.plug.address, code)?;
        self.frontend.clear_button_events();
        self.frontend.request_full_update();
        Ok(command)
    }

    /// Indicators on, transmit, indicators off, debounce, backlight control back on.
    /// Expects backlight control to be disabled already.
    fn send(&mut self, command: &Command) -> Result<Outcome, Error<R::Error>> {
        let (profile, config) = self.settings_for(command.protocol());
        let frame = encode(command);

        self.frontend.set_indicators(true);
        let result = self.transmitter.transmit(&frame, &profile, &config);
        self.frontend.set_indicators(false);

        self.transmitter.pause_ms(DEBOUNCE_MS);
        self.frontend.set_backlight_control(true);

        result.map(|()| Outcome::Sent)
    }

    fn settings_for(&self, protocol: Protocol) -> (RadioProfile, TransmitConfig) {
        match protocol {
            Protocol::Gate => (GATE_PROFILE, self.gate),
            Protocol::Plug => (PLUG_PROFILE, self.plug.transmit),
        }
    }

    /// Runs one entry. The result is always within the entry's bounds.
    fn ask(&mut self, entry: &ValueEntry) -> u8 {
        self.frontend.clear_status();
        self.frontend.show_status(entry.label);
        entry.rollover(self.frontend.enter_value(entry))
    }
}
