//! Table-driven port driver.
//!
//! [`PortDriver`] owns the register bus and the driver state. It starts out
//! uninitialized; [`PortDriver::init`] stores the configuration table and
//! programs every pin in it. All other services check that `init` has run
//! and that the pin's runtime-changeable flags allow the request. Violations
//! are reported through [`crate::det::report_error`] and the call is
//! suppressed.
//!
//! PC0..PC3 carry JTAG/SWD and are never written. PD7 and PF0 are unlocked
//! and committed before their first field write on every path.

use crate::config::{
    PORT_CFG_AR_RELEASE_MAJOR_VERSION, PORT_CFG_AR_RELEASE_MINOR_VERSION,
    PORT_CFG_AR_RELEASE_PATCH_VERSION, PORT_CFG_SW_MAJOR_VERSION, PORT_CFG_SW_MINOR_VERSION,
    PORT_CFG_SW_PATCH_VERSION,
};
#[cfg(feature = "dev-error-detect")]
use crate::det::report_error;
use crate::error::{PortError, ServiceId};
use crate::sdk::mcu::gpio::{
    locate, PinClass, PinDirection, PinLocation, PinMode, PinResistor, PortPin,
    PORT_PIN_MODE_DIO,
};
use crate::sdk::mcu::port_group::PortGroup;
use crate::sdk::mcu::register::PortBus;

pub const PORT_VENDOR_ID: u16 = 1000;
pub const PORT_MODULE_ID: u16 = 120;
pub const PORT_INSTANCE_ID: u8 = 0;

pub const PORT_SW_MAJOR_VERSION: u8 = 1;
pub const PORT_SW_MINOR_VERSION: u8 = 0;
pub const PORT_SW_PATCH_VERSION: u8 = 0;

pub const PORT_AR_RELEASE_MAJOR_VERSION: u8 = 4;
pub const PORT_AR_RELEASE_MINOR_VERSION: u8 = 0;
pub const PORT_AR_RELEASE_PATCH_VERSION: u8 = 3;

const _: () = assert!(
    PORT_AR_RELEASE_MAJOR_VERSION == PORT_CFG_AR_RELEASE_MAJOR_VERSION
        && PORT_AR_RELEASE_MINOR_VERSION == PORT_CFG_AR_RELEASE_MINOR_VERSION
        && PORT_AR_RELEASE_PATCH_VERSION == PORT_CFG_AR_RELEASE_PATCH_VERSION,
    "The AR version of config.rs does not match the expected version"
);

const _: () = assert!(
    PORT_SW_MAJOR_VERSION == PORT_CFG_SW_MAJOR_VERSION
        && PORT_SW_MINOR_VERSION == PORT_CFG_SW_MINOR_VERSION
        && PORT_SW_PATCH_VERSION == PORT_CFG_SW_PATCH_VERSION,
    "The SW version of config.rs does not match the expected version"
);

/// Configuration of one pin, as produced by the build-time configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    pub pin_num: PortPin,
    /// Raw mode value: 0 DIO, 10 analog, 1..=9 and 14 alternate functions.
    /// Other values leave the pin's mode untouched at init.
    pub mode: u8,
    pub direction: PinDirection,
    /// Output level after init, ignored for inputs.
    pub initial_value: bool,
    pub direction_changeable: bool,
    pub mode_changeable: bool,
    /// Ignored for outputs.
    pub resistor: PinResistor,
}

impl PinConfig {
    /// DIO input, no resistor, low, nothing changeable at runtime.
    pub const fn new(pin_num: PortPin) -> Self {
        PinConfig {
            pin_num,
            mode: PORT_PIN_MODE_DIO,
            direction: PinDirection::In,
            initial_value: false,
            direction_changeable: false,
            mode_changeable: false,
            resistor: PinResistor::Off,
        }
    }

    pub const fn input(mut self, resistor: PinResistor) -> Self {
        self.direction = PinDirection::In;
        self.resistor = resistor;
        self
    }

    pub const fn output(mut self, initial_value: bool) -> Self {
        self.direction = PinDirection::Out;
        self.initial_value = initial_value;
        self
    }

    pub const fn mode(mut self, mode: u8) -> Self {
        self.mode = mode;
        self
    }

    pub const fn direction_changeable(mut self) -> Self {
        self.direction_changeable = true;
        self
    }

    pub const fn mode_changeable(mut self) -> Self {
        self.mode_changeable = true;
        self
    }
}

/// Read-only view of the pin configuration table.
#[derive(Clone, Copy, Debug)]
pub struct PortConfig<'a> {
    channels: &'a [PinConfig],
}

impl<'a> PortConfig<'a> {
    pub const fn new(channels: &'a [PinConfig]) -> Self {
        PortConfig { channels }
    }

    pub fn channels(&self) -> &'a [PinConfig] {
        self.channels
    }

    /// Entry configuring `pin`, if the table has one.
    pub fn find(&self, pin: PortPin) -> Option<&'a PinConfig> {
        self.channels.iter().find(|channel| channel.pin_num == pin)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortStatus {
    NotInitialized,
    Initialized,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VersionInfo {
    pub vendor_id: u16,
    pub module_id: u16,
    pub sw_major_version: u8,
    pub sw_minor_version: u8,
    pub sw_patch_version: u8,
}

pub struct PortDriver<'a, B: PortBus> {
    bus: B,
    status: PortStatus,
    config: Option<PortConfig<'a>>,
}

impl<'a, B: PortBus> PortDriver<'a, B> {
    pub const fn new(bus: B) -> Self {
        PortDriver {
            bus,
            status: PortStatus::NotInitialized,
            config: None,
        }
    }

    pub fn status(&self) -> PortStatus {
        self.status
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn release(self) -> B {
        self.bus
    }

    fn fail(api: ServiceId, err: PortError) -> PortError {
        #[cfg(feature = "dev-error-detect")]
        report_error(PORT_MODULE_ID, PORT_INSTANCE_ID, api as u8, err as u8);

        log::warn!("port: {:?} rejected: {}", api, err);
        err
    }

    fn active(&self, api: ServiceId) -> Result<PortConfig<'a>, PortError> {
        match (self.status, self.config) {
            (PortStatus::Initialized, Some(config)) => Ok(config),
            _ => Err(Self::fail(api, PortError::Uninit)),
        }
    }

    /// Runs `write` on the pin's port group, unless the pin is debug-reserved.
    /// Lock-protected pins are unlocked first.
    fn with_pin<F>(&mut self, loc: PinLocation, write: F)
    where
        F: FnOnce(&mut PortGroup<'_, B>, u8),
    {
        let mut group = PortGroup::new(&mut self.bus, loc.port);

        match loc.class {
            PinClass::DebugReserved => {
                log::trace!("port: P{:?}{} is reserved for debug, skipped", loc.port, loc.bit);
                return;
            }
            PinClass::LockProtected => group.unlock(loc.bit),
            PinClass::Ordinary => {}
        }

        write(&mut group, loc.bit);
    }

    /// Stores `config` and programs every pin in it, in table order.
    ///
    /// A missing or empty table is rejected and leaves the driver untouched.
    /// Otherwise init is best-effort: a bad entry is reported or skipped and
    /// the remaining entries are still programmed.
    pub fn init(&mut self, config: Option<PortConfig<'a>>) -> Result<(), PortError> {
        let config = match config {
            Some(config) if !config.channels().is_empty() => config,
            _ => return Err(Self::fail(ServiceId::Init, PortError::ParamConfig)),
        };

        self.status = PortStatus::Initialized;
        self.config = Some(config);

        for channel in config.channels() {
            self.configure_pin(channel);
        }

        log::info!("port: initialized {} pins", config.channels().len());
        Ok(())
    }

    fn configure_pin(&mut self, channel: &PinConfig) {
        let loc = match locate(channel.pin_num) {
            Ok(loc) => loc,
            Err(err) => {
                Self::fail(ServiceId::Init, err);
                return;
            }
        };

        self.bus.enable_clock(loc.port);

        self.with_pin(loc, |group, bit| {
            // direction first, the resistor / level that follows depends on it
            group.set_direction(bit, channel.direction);
            match channel.direction {
                PinDirection::In => group.set_resistor(bit, channel.resistor),
                PinDirection::Out => group.write_level(bit, channel.initial_value),
            }

            match PinMode::try_from(channel.mode) {
                Ok(mode) => group.set_mode(bit, mode),
                Err(_) => log::debug!(
                    "port: pin {} mode {} unknown, mode left as is",
                    channel.pin_num,
                    channel.mode
                ),
            }
        });

        log::debug!(
            "port: pin {} -> P{:?}{} {:?}",
            channel.pin_num,
            loc.port,
            loc.bit,
            channel.direction
        );
    }

    /// Looks up `pin` for a runtime change and checks its changeable flag.
    fn changeable_pin(
        &self,
        api: ServiceId,
        pin: PortPin,
        allowed: fn(&PinConfig) -> bool,
        forbidden: PortError,
    ) -> Result<PinLocation, PortError> {
        let config = self.active(api)?;
        let channel = config
            .find(pin)
            .ok_or_else(|| Self::fail(api, PortError::ParamPin))?;

        if !allowed(channel) {
            return Err(Self::fail(api, forbidden));
        }

        locate(pin).map_err(|err| Self::fail(api, err))
    }

    /// Changes the direction of a pin configured as direction-changeable.
    ///
    /// Debug-reserved pins are accepted and left alone.
    #[cfg(feature = "set-pin-direction-api")]
    pub fn set_pin_direction(
        &mut self,
        pin: PortPin,
        direction: PinDirection,
    ) -> Result<(), PortError> {
        let loc = self.changeable_pin(
            ServiceId::SetPinDirection,
            pin,
            |channel| channel.direction_changeable,
            PortError::DirectionUnchangeable,
        )?;

        self.with_pin(loc, |group, bit| group.set_direction(bit, direction));
        Ok(())
    }

    /// Changes the mode of a pin configured as mode-changeable.
    ///
    /// Unlike `init`, an unknown mode value is an error here.
    #[cfg(feature = "set-pin-mode-api")]
    pub fn set_pin_mode(&mut self, pin: PortPin, mode: u8) -> Result<(), PortError> {
        const API: ServiceId = ServiceId::SetPinMode;

        let loc = self.changeable_pin(
            API,
            pin,
            |channel| channel.mode_changeable,
            PortError::ModeUnchangeable,
        )?;
        let mode = PinMode::try_from(mode).map_err(|err| Self::fail(API, err))?;

        self.with_pin(loc, |group, bit| group.set_mode(bit, mode));
        Ok(())
    }

    /// Re-applies the configured direction of every pin that is not
    /// direction-changeable. Pins that may change at runtime keep whatever
    /// direction they currently have.
    pub fn refresh_port_direction(&mut self) -> Result<(), PortError> {
        const API: ServiceId = ServiceId::RefreshPortDirection;

        let config = self.active(API)?;

        for channel in config.channels() {
            if channel.direction_changeable {
                continue;
            }

            match locate(channel.pin_num) {
                Ok(loc) => {
                    self.with_pin(loc, |group, bit| group.set_direction(bit, channel.direction))
                }
                Err(err) => {
                    Self::fail(API, err);
                }
            }
        }

        Ok(())
    }

    #[cfg(feature = "version-info-api")]
    pub fn get_version_info(&self, versioninfo: Option<&mut VersionInfo>) -> Result<(), PortError> {
        const API: ServiceId = ServiceId::GetVersionInfo;

        let versioninfo = versioninfo.ok_or_else(|| Self::fail(API, PortError::ParamPointer))?;
        self.active(API)?;

        *versioninfo = VersionInfo {
            vendor_id: PORT_VENDOR_ID,
            module_id: PORT_MODULE_ID,
            sw_major_version: PORT_SW_MAJOR_VERSION,
            sw_minor_version: PORT_SW_MINOR_VERSION,
            sw_patch_version: PORT_SW_PATCH_VERSION,
        };
        Ok(())
    }
}
