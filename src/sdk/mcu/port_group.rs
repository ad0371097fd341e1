use crate::sdk::mcu::gpio::{PinDirection, PinMode, PinResistor, PortName};
use crate::sdk::mcu::register::{PortBus, PortReg, PCTL_BITS_PER_PIN, UNLOCK_VALUE};
use crate::{BIT, BIT_RNG, BM_CLR, BM_IS_SET, BM_SET};

/// Field-level access to one port group's register block.
///
/// Every operation is a read-modify-write of a single bit (or of one pin's
/// 4-bit mux nibble), so pins sharing a 32-bit register are never disturbed.
pub struct PortGroup<'b, B: PortBus> {
    bus: &'b mut B,
    port: PortName,
}

impl<'b, B: PortBus> PortGroup<'b, B> {
    pub fn new(bus: &'b mut B, port: PortName) -> Self {
        PortGroup { bus, port }
    }

    fn set_bit(&mut self, reg: PortReg, bit: u8) {
        let mut val = self.bus.read(self.port, reg);
        BM_SET!(val, BIT!(bit));
        self.bus.write(self.port, reg, val);
    }

    fn clear_bit(&mut self, reg: PortReg, bit: u8) {
        let mut val = self.bus.read(self.port, reg);
        BM_CLR!(val, BIT!(bit));
        self.bus.write(self.port, reg, val);
    }

    pub fn is_set(&self, reg: PortReg, bit: u8) -> bool {
        BM_IS_SET!(self.bus.read(self.port, reg), BIT!(bit))
    }

    /// Opens GPIOCR and commits `bit` so the pin's other fields accept writes.
    pub fn unlock(&mut self, bit: u8) {
        self.bus.write(self.port, PortReg::Lock, UNLOCK_VALUE);
        self.set_bit(PortReg::Commit, bit);
    }

    pub fn set_direction(&mut self, bit: u8, direction: PinDirection) {
        match direction {
            PinDirection::In => self.clear_bit(PortReg::Direction, bit),
            PinDirection::Out => self.set_bit(PortReg::Direction, bit),
        }
    }

    /// Pull-up and pull-down are never left set together.
    pub fn set_resistor(&mut self, bit: u8, resistor: PinResistor) {
        match resistor {
            PinResistor::PullUp => {
                self.clear_bit(PortReg::PullDown, bit);
                self.set_bit(PortReg::PullUp, bit);
            }
            PinResistor::PullDown => {
                self.clear_bit(PortReg::PullUp, bit);
                self.set_bit(PortReg::PullDown, bit);
            }
            PinResistor::Off => {
                self.clear_bit(PortReg::PullUp, bit);
                self.clear_bit(PortReg::PullDown, bit);
            }
        }
    }

    pub fn write_level(&mut self, bit: u8, high: bool) {
        if high {
            self.set_bit(PortReg::Data, bit);
        } else {
            self.clear_bit(PortReg::Data, bit);
        }
    }

    pub fn set_mode(&mut self, bit: u8, mode: PinMode) {
        match mode {
            PinMode::Dio => {
                self.clear_bit(PortReg::AnalogModeSel, bit);
                self.set_bit(PortReg::DigitalEnable, bit);
                self.clear_bit(PortReg::AltFunc, bit);
                self.write_mux(bit, 0);
            }
            PinMode::Analog => {
                // mux nibble is don't-care while the analog path is selected
                self.set_bit(PortReg::AnalogModeSel, bit);
                self.clear_bit(PortReg::DigitalEnable, bit);
                self.clear_bit(PortReg::AltFunc, bit);
            }
            PinMode::Alternate(func) => {
                self.clear_bit(PortReg::AnalogModeSel, bit);
                self.set_bit(PortReg::DigitalEnable, bit);
                self.set_bit(PortReg::AltFunc, bit);
                self.write_mux(bit, func.nibble());
            }
        }
    }

    fn write_mux(&mut self, bit: u8, nibble: u32) {
        let shift = bit as u32 * PCTL_BITS_PER_PIN;
        let mut val = self.bus.read(self.port, PortReg::Control);
        BM_CLR!(val, BIT_RNG!(shift, shift + PCTL_BITS_PER_PIN - 1));
        BM_SET!(val, (nibble & 0xF) << shift);
        self.bus.write(self.port, PortReg::Control, val);
    }

    /// Current mux-control nibble of `bit`.
    pub fn mux(&self, bit: u8) -> u32 {
        let shift = bit as u32 * PCTL_BITS_PER_PIN;
        (self.bus.read(self.port, PortReg::Control) >> shift) & 0xF
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::mcu::fake::FakeBus;
    use crate::sdk::mcu::gpio::AltFunction;

    #[test]
    fn test_set_direction_touches_only_its_bit() {
        let mut bus = FakeBus::new();
        bus.preset(PortName::B, PortReg::Direction, 0b1000_0001);

        let mut group = PortGroup::new(&mut bus, PortName::B);
        group.set_direction(3, PinDirection::Out);
        assert!(group.is_set(PortReg::Direction, 3));
        group.set_direction(0, PinDirection::In);

        assert_eq!(bus.reg(PortName::B, PortReg::Direction), 0b1000_1000);
        assert_eq!(bus.reg(PortName::A, PortReg::Direction), 0);
    }

    #[test]
    fn test_resistor_selection_is_exclusive() {
        let mut bus = FakeBus::new();
        let mut group = PortGroup::new(&mut bus, PortName::A);

        group.set_resistor(2, PinResistor::PullDown);
        group.set_resistor(2, PinResistor::PullUp);
        assert!(group.is_set(PortReg::PullUp, 2));
        assert!(!group.is_set(PortReg::PullDown, 2));

        group.set_resistor(2, PinResistor::PullDown);
        assert!(!group.is_set(PortReg::PullUp, 2));
        assert!(group.is_set(PortReg::PullDown, 2));

        group.set_resistor(2, PinResistor::Off);
        assert!(!group.is_set(PortReg::PullUp, 2));
        assert!(!group.is_set(PortReg::PullDown, 2));
    }

    #[test]
    fn test_write_level() {
        let mut bus = FakeBus::new();
        let mut group = PortGroup::new(&mut bus, PortName::E);

        group.write_level(5, true);
        assert!(group.is_set(PortReg::Data, 5));
        group.write_level(5, false);
        assert!(!group.is_set(PortReg::Data, 5));
    }

    /// Writing an alternate function into one nibble keeps the neighbours.
    #[test]
    fn test_alternate_mode_merges_mux_nibble() {
        let mut bus = FakeBus::new();
        bus.preset(PortName::D, PortReg::Control, 0x1000_00F2);
        bus.preset(PortName::D, PortReg::AnalogModeSel, BIT!(1));

        let mut group = PortGroup::new(&mut bus, PortName::D);
        group.set_mode(1, PinMode::Alternate(AltFunction::Af8));

        assert_eq!(group.mux(1), 8);
        assert_eq!(bus.reg(PortName::D, PortReg::Control), 0x1000_0082);
        assert!(!bus.bit(PortName::D, PortReg::AnalogModeSel, 1));
        assert!(bus.bit(PortName::D, PortReg::DigitalEnable, 1));
        assert!(bus.bit(PortName::D, PortReg::AltFunc, 1));
    }

    #[test]
    fn test_dio_mode_clears_mux_nibble_and_analog() {
        let mut bus = FakeBus::new();
        bus.preset(PortName::A, PortReg::Control, 0xFFFF_FFFF);
        bus.preset(PortName::A, PortReg::AnalogModeSel, 0xFF);
        bus.preset(PortName::A, PortReg::AltFunc, 0xFF);

        PortGroup::new(&mut bus, PortName::A).set_mode(7, PinMode::Dio);

        assert_eq!(bus.reg(PortName::A, PortReg::Control), 0x0FFF_FFFF);
        assert_eq!(bus.reg(PortName::A, PortReg::AnalogModeSel), 0x7F);
        assert_eq!(bus.reg(PortName::A, PortReg::AltFunc), 0x7F);
        assert!(bus.bit(PortName::A, PortReg::DigitalEnable, 7));
    }

    #[test]
    fn test_analog_mode_leaves_mux_nibble_alone() {
        let mut bus = FakeBus::new();
        bus.preset(PortName::E, PortReg::Control, 0x0000_0300);
        bus.preset(PortName::E, PortReg::DigitalEnable, 0xFF);
        bus.preset(PortName::E, PortReg::AltFunc, BIT!(2));

        PortGroup::new(&mut bus, PortName::E).set_mode(2, PinMode::Analog);

        assert!(bus.bit(PortName::E, PortReg::AnalogModeSel, 2));
        assert!(!bus.bit(PortName::E, PortReg::DigitalEnable, 2));
        assert!(!bus.bit(PortName::E, PortReg::AltFunc, 2));
        assert_eq!(bus.nibble(PortName::E, 2), 3);
        assert!(bus.writes.iter().all(|w| w.reg != PortReg::Control));
    }

    #[test]
    fn test_unlock_writes_key_then_commit_bit() {
        let mut bus = FakeBus::new();
        bus.preset(PortName::F, PortReg::Commit, 0x1E);

        PortGroup::new(&mut bus, PortName::F).unlock(0);

        assert_eq!(bus.writes[0].reg, PortReg::Lock);
        assert_eq!(bus.writes[0].value, UNLOCK_VALUE);
        assert_eq!(bus.writes[1].reg, PortReg::Commit);
        assert_eq!(bus.reg(PortName::F, PortReg::Commit), 0x1F);
    }
}
