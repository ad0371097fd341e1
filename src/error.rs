use core::fmt;
use num_derive::{FromPrimitive, ToPrimitive};

/// Development errors raised by the port driver.
///
/// The discriminants are the codes handed to the error collaborator, so a
/// report can be turned back into a `PortError` with
/// `num_traits::FromPrimitive::from_u8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PortError {
    /// Pin id is outside the configured pins.
    ParamPin = 0x0A,
    /// Pin direction is not configured as changeable.
    DirectionUnchangeable = 0x0B,
    /// Init called without a usable configuration.
    ParamConfig = 0x0C,
    /// Mode value is not one of the supported modes.
    ParamInvalidMode = 0x0D,
    /// Pin mode is not configured as changeable.
    ModeUnchangeable = 0x0E,
    /// Service used before `init`.
    Uninit = 0x0F,
    /// Required output location is missing.
    ParamPointer = 0x10,
}

impl PortError {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            PortError::ParamPin => "invalid port pin id",
            PortError::DirectionUnchangeable => "pin direction is not changeable",
            PortError::ParamConfig => "invalid port configuration",
            PortError::ParamInvalidMode => "invalid pin mode",
            PortError::ModeUnchangeable => "pin mode is not changeable",
            PortError::Uninit => "port driver not initialized",
            PortError::ParamPointer => "missing output parameter",
        };
        write!(f, "{} (0x{:02X})", msg, self.code())
    }
}

/// Service ids of the public port driver API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ServiceId {
    Init = 0x00,
    SetPinDirection = 0x01,
    RefreshPortDirection = 0x02,
    GetVersionInfo = 0x03,
    SetPinMode = 0x04,
}
