//! Port driver for the TM4C123GH6PM GPIO blocks.
//!
//! ```ignore
//! let bus = unsafe { Mmio::steal() };
//! let mut port = PortDriver::new(bus);
//! port.init(Some(PORT_CONFIGURATION))?;
//! port.set_pin_direction(config::LED_BLUE, PinDirection::In)?;
//! ```

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod det;
pub mod error;
pub mod sdk;

pub use config::PORT_CONFIGURATION;
pub use error::{PortError, ServiceId};
pub use sdk::drivers::port::{PinConfig, PortConfig, PortDriver, PortStatus, VersionInfo};
pub use sdk::mcu::gpio::{PinDirection, PinMode, PinResistor, PortName, PortPin};
pub use sdk::mcu::register::{Mmio, PortBus};
