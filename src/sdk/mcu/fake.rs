//! In-memory GPIO blocks for unit tests.

use crate::sdk::mcu::gpio::PortName;
use crate::sdk::mcu::register::{PortBus, PortReg, FLD_RCGC2, PCTL_BITS_PER_PIN};
use crate::BIT;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Access {
    pub port: PortName,
    pub reg: PortReg,
    pub value: u32,
}

pub type RegisterFile = [[u32; PortReg::COUNT]; PortName::COUNT];

/// Register file for all six ports plus a log of every write, in order.
pub struct FakeBus {
    regs: RegisterFile,
    clocks: FLD_RCGC2,
    pub writes: Vec<Access>,
}

impl FakeBus {
    pub fn new() -> Self {
        FakeBus {
            regs: [[0; PortReg::COUNT]; PortName::COUNT],
            clocks: FLD_RCGC2::empty(),
            writes: Vec::new(),
        }
    }

    /// Preloads a register without logging it.
    pub fn preset(&mut self, port: PortName, reg: PortReg, value: u32) {
        self.regs[port.index()][reg.index()] = value;
    }

    pub fn reg(&self, port: PortName, reg: PortReg) -> u32 {
        self.regs[port.index()][reg.index()]
    }

    pub fn bit(&self, port: PortName, reg: PortReg, bit: u8) -> bool {
        self.reg(port, reg) & BIT!(bit) != 0
    }

    pub fn nibble(&self, port: PortName, bit: u8) -> u32 {
        (self.reg(port, PortReg::Control) >> (bit as u32 * PCTL_BITS_PER_PIN)) & 0xF
    }

    pub fn clock_enabled(&self, port: PortName) -> bool {
        self.clocks.contains(FLD_RCGC2::port(port))
    }

    pub fn snapshot(&self) -> RegisterFile {
        self.regs
    }

    pub fn writes_to(&self, port: PortName) -> Vec<Access> {
        self.writes.iter().copied().filter(|w| w.port == port).collect()
    }
}

impl PortBus for FakeBus {
    fn read(&self, port: PortName, reg: PortReg) -> u32 {
        self.reg(port, reg)
    }

    fn write(&mut self, port: PortName, reg: PortReg, value: u32) {
        self.regs[port.index()][reg.index()] = value;
        self.writes.push(Access { port, reg, value });
    }

    fn enable_clock(&mut self, port: PortName) {
        self.clocks |= FLD_RCGC2::port(port);
    }
}
