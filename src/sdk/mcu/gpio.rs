//! Pin numbering, pin classification and the closed value sets used by the
//! port configuration table.
//!
//! Every physical pin has a global id. The ids are dense and split into six
//! contiguous ranges, one per port group:
//!
//! | Port | Ids      | Pins |
//! |------|----------|------|
//! | A    | 1..=8    | 8    |
//! | B    | 9..=16   | 8    |
//! | C    | 17..=24  | 8    |
//! | D    | 25..=32  | 8    |
//! | E    | 33..=38  | 6    |
//! | F    | 39..=43  | 5    |

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::error::PortError;

/// Global pin id as used by the configuration table and the public API.
pub type PortPin = u8;

pub const PORT_PIN_MODE_DIO: u8 = 0;
// Any value that is neither DIO nor an alternate function works here, the
// mux nibble is never written in analog mode.
pub const PORT_PIN_MODE_ADC: u8 = 10;

pub const PORTA_FIRST_PIN: PortPin = 1;
pub const PORTA_END_PIN: PortPin = 8;
pub const PORTB_FIRST_PIN: PortPin = 9;
pub const PORTB_END_PIN: PortPin = 16;
pub const PORTC_FIRST_PIN: PortPin = 17;
pub const PORTC_END_PIN: PortPin = 24;
pub const PORTD_FIRST_PIN: PortPin = 25;
pub const PORTD_END_PIN: PortPin = 32;
pub const PORTE_FIRST_PIN: PortPin = 33;
pub const PORTE_END_PIN: PortPin = 38;
pub const PORTF_FIRST_PIN: PortPin = 39;
pub const PORTF_END_PIN: PortPin = 43;

/// JTAG/SWD signals live on PC0..PC3.
pub const JTAG_PORT: PortName = PortName::C;
pub const JTAG_PINS: [u8; 4] = [0, 1, 2, 3];

/// PD7 and PF0 come out of reset locked (NMI and GPIO commit protection).
pub const LOCKED_PINS: [(PortName, u8); 2] = [(PortName::D, 7), (PortName::F, 0)];

/// GPIO port groups of the TM4C123GH6PM.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PortName {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
}

impl PortName {
    pub const COUNT: usize = 6;
    pub const ALL: [PortName; Self::COUNT] = [
        PortName::A,
        PortName::B,
        PortName::C,
        PortName::D,
        PortName::E,
        PortName::F,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn first_pin(self) -> PortPin {
        match self {
            PortName::A => PORTA_FIRST_PIN,
            PortName::B => PORTB_FIRST_PIN,
            PortName::C => PORTC_FIRST_PIN,
            PortName::D => PORTD_FIRST_PIN,
            PortName::E => PORTE_FIRST_PIN,
            PortName::F => PORTF_FIRST_PIN,
        }
    }

    pub const fn end_pin(self) -> PortPin {
        match self {
            PortName::A => PORTA_END_PIN,
            PortName::B => PORTB_END_PIN,
            PortName::C => PORTC_END_PIN,
            PortName::D => PORTD_END_PIN,
            PortName::E => PORTE_END_PIN,
            PortName::F => PORTF_END_PIN,
        }
    }

    /// Number of bonded pins in this group.
    pub const fn pin_count(self) -> u8 {
        self.end_pin() - self.first_pin() + 1
    }

    /// Port group owning the global pin id, if any.
    pub fn from_pin(pin: PortPin) -> Option<PortName> {
        Self::ALL
            .iter()
            .copied()
            .find(|port| (port.first_pin()..=port.end_pin()).contains(&pin))
    }
}

/// Global id of `bit` in `port`. `bit` is not range checked.
pub const fn pin_id(port: PortName, bit: u8) -> PortPin {
    port.first_pin() + bit
}

/// Pin direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinDirection {
    In,
    Out,
}

/// Internal resistor of an input pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinResistor {
    Off,
    PullUp,
    PullDown,
}

/// Peripheral function routed through the mux-control nibble.
///
/// Only the encodings listed in the datasheet's PCTL table exist, so the
/// gaps (10..=13, 15) are rejected when converting from a raw mode value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AltFunction {
    Af1 = 1,
    Af2 = 2,
    Af3 = 3,
    Af4 = 4,
    Af5 = 5,
    Af6 = 6,
    Af7 = 7,
    Af8 = 8,
    Af9 = 9,
    Af14 = 14,
}

impl AltFunction {
    /// Value written into the pin's mux-control nibble.
    #[inline]
    pub const fn nibble(self) -> u32 {
        self as u32
    }
}

/// Decoded pin mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Plain digital I/O.
    Dio,
    /// Analog input, digital path disabled.
    Analog,
    Alternate(AltFunction),
}

impl TryFrom<u8> for PinMode {
    type Error = PortError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            PORT_PIN_MODE_DIO => Ok(PinMode::Dio),
            PORT_PIN_MODE_ADC => Ok(PinMode::Analog),
            _ => AltFunction::from_u8(v)
                .map(PinMode::Alternate)
                .ok_or(PortError::ParamInvalidMode),
        }
    }
}

impl From<PinMode> for u8 {
    fn from(mode: PinMode) -> u8 {
        match mode {
            PinMode::Dio => PORT_PIN_MODE_DIO,
            PinMode::Analog => PORT_PIN_MODE_ADC,
            PinMode::Alternate(func) => func as u8,
        }
    }
}

/// How the driver must treat a pin before touching its registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinClass {
    Ordinary,
    /// Needs the unlock + commit sequence before any other write.
    LockProtected,
    /// Never written.
    DebugReserved,
}

/// Port group and bit position of a pin, plus its classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinLocation {
    pub port: PortName,
    /// Bit position inside the port's registers.
    pub bit: u8,
    pub class: PinClass,
}

fn classify(port: PortName, bit: u8) -> PinClass {
    if port == JTAG_PORT && JTAG_PINS.contains(&bit) {
        PinClass::DebugReserved
    } else if LOCKED_PINS.contains(&(port, bit)) {
        PinClass::LockProtected
    } else {
        PinClass::Ordinary
    }
}

/// Resolves a global pin id into its port group and local bit.
///
/// Ids outside every port range are a caller error and come back as
/// `PortError::ParamPin`; the caller decides whether and how to report it.
pub fn locate(pin: PortPin) -> Result<PinLocation, PortError> {
    let port = PortName::from_pin(pin).ok_or(PortError::ParamPin)?;
    let bit = pin - port.first_pin();

    Ok(PinLocation {
        port,
        bit,
        class: classify(port, bit),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_first_and_last_pin_of_every_port() {
        for port in PortName::ALL {
            let first = locate(port.first_pin()).unwrap();
            assert_eq!(first.port, port);
            assert_eq!(first.bit, 0);

            let last = locate(port.end_pin()).unwrap();
            assert_eq!(last.port, port);
            assert_eq!(last.bit, port.pin_count() - 1);
        }
    }

    /// Every id in 1..=43 lands in exactly one group, in range, and no two
    /// ids share a (port, bit) slot.
    #[test]
    fn test_locate_is_injective_and_in_range() {
        let mut seen = [[false; 8]; PortName::COUNT];

        for pin in PORTA_FIRST_PIN..=PORTF_END_PIN {
            let loc = locate(pin).unwrap();
            assert!(loc.bit < loc.port.pin_count(), "pin {} out of range", pin);

            let slot = &mut seen[loc.port.index()][loc.bit as usize];
            assert!(!*slot, "pin {} collides", pin);
            *slot = true;
        }
    }

    #[test]
    fn test_pin_id_inverts_locate() {
        for pin in PORTA_FIRST_PIN..=PORTF_END_PIN {
            let loc = locate(pin).unwrap();
            assert_eq!(pin_id(loc.port, loc.bit), pin);
        }
        assert_eq!(pin_id(PortName::F, 4), 43);
    }

    #[test]
    fn test_narrow_ports_have_fewer_pins() {
        assert_eq!(PortName::E.pin_count(), 6);
        assert_eq!(PortName::F.pin_count(), 5);
        assert_eq!(locate(38).unwrap().bit, 5);
        assert_eq!(locate(43).unwrap().bit, 4);
    }

    #[test]
    fn test_locate_rejects_ids_outside_every_port() {
        assert_eq!(locate(0), Err(PortError::ParamPin));
        assert_eq!(locate(44), Err(PortError::ParamPin));
        assert_eq!(locate(u8::MAX), Err(PortError::ParamPin));
    }

    #[test]
    fn test_jtag_pins_are_debug_reserved() {
        for pin in 17..=20 {
            let loc = locate(pin).unwrap();
            assert_eq!(loc.port, PortName::C);
            assert_eq!(loc.class, PinClass::DebugReserved);
        }
        assert_eq!(locate(21).unwrap().class, PinClass::Ordinary);
    }

    #[test]
    fn test_pd7_and_pf0_are_lock_protected() {
        let pd7 = locate(32).unwrap();
        assert_eq!((pd7.port, pd7.bit, pd7.class), (PortName::D, 7, PinClass::LockProtected));

        let pf0 = locate(39).unwrap();
        assert_eq!((pf0.port, pf0.bit, pf0.class), (PortName::F, 0, PinClass::LockProtected));

        let lock_count = (PORTA_FIRST_PIN..=PORTF_END_PIN)
            .filter(|&pin| locate(pin).unwrap().class == PinClass::LockProtected)
            .count();
        assert_eq!(lock_count, 2);
    }

    #[test]
    fn test_pin_mode_decoding() {
        assert_eq!(PinMode::try_from(0u8), Ok(PinMode::Dio));
        assert_eq!(PinMode::try_from(10u8), Ok(PinMode::Analog));
        assert_eq!(PinMode::try_from(1u8), Ok(PinMode::Alternate(AltFunction::Af1)));
        assert_eq!(PinMode::try_from(9u8), Ok(PinMode::Alternate(AltFunction::Af9)));
        assert_eq!(PinMode::try_from(14u8), Ok(PinMode::Alternate(AltFunction::Af14)));

        for invalid in [11u8, 12, 13, 15, 16, 0xFF] {
            assert_eq!(PinMode::try_from(invalid), Err(PortError::ParamInvalidMode));
        }
    }

    #[test]
    fn test_pin_mode_encodes_back_to_raw_value() {
        assert_eq!(u8::from(PinMode::Dio), 0);
        assert_eq!(u8::from(PinMode::Analog), 10);
        assert_eq!(u8::from(PinMode::Alternate(AltFunction::Af14)), 14);
    }
}
