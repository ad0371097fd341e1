use bitflags::bitflags;

use crate::sdk::mcu::gpio::PortName;
use crate::{BIT, BM_SET};

pub const GPIO_PORTA_BASE_ADDRESS: u32 = 0x4000_4000;
pub const GPIO_PORTB_BASE_ADDRESS: u32 = 0x4000_5000;
pub const GPIO_PORTC_BASE_ADDRESS: u32 = 0x4000_6000;
pub const GPIO_PORTD_BASE_ADDRESS: u32 = 0x4000_7000;
pub const GPIO_PORTE_BASE_ADDRESS: u32 = 0x4002_4000;
pub const GPIO_PORTF_BASE_ADDRESS: u32 = 0x4002_5000;

pub const SYSCTL_BASE_ADDR: u32 = 0x400F_E000;

pub const PORT_DATA_REG_OFFSET: u32 = 0x3FC;
pub const PORT_DIR_REG_OFFSET: u32 = 0x400;
pub const PORT_ALT_FUNC_REG_OFFSET: u32 = 0x420;
pub const PORT_PULL_UP_REG_OFFSET: u32 = 0x510;
pub const PORT_PULL_DOWN_REG_OFFSET: u32 = 0x514;
pub const PORT_DIGITAL_ENABLE_REG_OFFSET: u32 = 0x51C;
pub const PORT_LOCK_REG_OFFSET: u32 = 0x520;
pub const PORT_COMMIT_REG_OFFSET: u32 = 0x524;
pub const PORT_ANALOG_MODE_SEL_REG_OFFSET: u32 = 0x528;
pub const PORT_CTL_REG_OFFSET: u32 = 0x52C;

/// "LOCK" in ASCII, opens GPIOCR for writing.
pub const UNLOCK_VALUE: u32 = 0x4C4F_434B;

/// Width of one pin's field in GPIOPCTL.
pub const PCTL_BITS_PER_PIN: u32 = 4;

pub const fn port_base_address(port: PortName) -> u32 {
    match port {
        PortName::A => GPIO_PORTA_BASE_ADDRESS,
        PortName::B => GPIO_PORTB_BASE_ADDRESS,
        PortName::C => GPIO_PORTC_BASE_ADDRESS,
        PortName::D => GPIO_PORTD_BASE_ADDRESS,
        PortName::E => GPIO_PORTE_BASE_ADDRESS,
        PortName::F => GPIO_PORTF_BASE_ADDRESS,
    }
}

macro_rules! regrw {
    ( $x:ident, $a:expr, $s:ty ) => {
        paste::paste! {
            #[inline(always)]
            pub(crate) fn [<read_ $x>]() -> $s {
                unsafe {
                    core::ptr::read_volatile((SYSCTL_BASE_ADDR + $a) as usize as *const $s)
                }
            }

            #[inline(always)]
            pub(crate) fn [<write_ $x>](value: $s) {
                unsafe {
                    core::ptr::write_volatile((SYSCTL_BASE_ADDR + $a) as usize as *mut $s, value)
                }
            }
        }
    };
}

macro_rules! regrw_port {
    ( $x:ident, $a:expr ) => {
        paste::paste! {
            #[inline(always)]
            pub(crate) fn [<read_ $x>](port: PortName) -> u32 {
                unsafe {
                    core::ptr::read_volatile((port_base_address(port) + $a) as usize as *const u32)
                }
            }

            #[inline(always)]
            pub(crate) fn [<write_ $x>](value: u32, port: PortName) {
                unsafe {
                    core::ptr::write_volatile((port_base_address(port) + $a) as usize as *mut u32, value)
                }
            }
        }
    };
}

/****************************************************
 sysctl regs: begin  addr : 0x400FE000
 *****************************************************/
regrw!(reg_rcgc2, 0x108, u32);

bitflags! {
    /// Run-mode clock gating bits for the GPIO blocks in RCGC2.
    #[allow(non_camel_case_types)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct FLD_RCGC2: u32 {
        const GPIOA = BIT!(0);
        const GPIOB = BIT!(1);
        const GPIOC = BIT!(2);
        const GPIOD = BIT!(3);
        const GPIOE = BIT!(4);
        const GPIOF = BIT!(5);
    }
}

impl FLD_RCGC2 {
    pub fn port(port: PortName) -> Self {
        Self::from_bits_truncate(BIT!(port.index()))
    }
}

/****************************************************
 gpio regs: one block per port, see port_base_address
 *****************************************************/
regrw_port!(reg_gpio_data, PORT_DATA_REG_OFFSET);
regrw_port!(reg_gpio_dir, PORT_DIR_REG_OFFSET);
regrw_port!(reg_gpio_afsel, PORT_ALT_FUNC_REG_OFFSET);
regrw_port!(reg_gpio_pur, PORT_PULL_UP_REG_OFFSET);
regrw_port!(reg_gpio_pdr, PORT_PULL_DOWN_REG_OFFSET);
regrw_port!(reg_gpio_den, PORT_DIGITAL_ENABLE_REG_OFFSET);
regrw_port!(reg_gpio_lock, PORT_LOCK_REG_OFFSET);
regrw_port!(reg_gpio_cr, PORT_COMMIT_REG_OFFSET);
regrw_port!(reg_gpio_amsel, PORT_ANALOG_MODE_SEL_REG_OFFSET);
regrw_port!(reg_gpio_pctl, PORT_CTL_REG_OFFSET);

/// Registers of a GPIO block touched by the port driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortReg {
    Data,
    Direction,
    AltFunc,
    PullUp,
    PullDown,
    DigitalEnable,
    Lock,
    Commit,
    AnalogModeSel,
    Control,
}

impl PortReg {
    pub const COUNT: usize = 10;

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn offset(self) -> u32 {
        match self {
            PortReg::Data => PORT_DATA_REG_OFFSET,
            PortReg::Direction => PORT_DIR_REG_OFFSET,
            PortReg::AltFunc => PORT_ALT_FUNC_REG_OFFSET,
            PortReg::PullUp => PORT_PULL_UP_REG_OFFSET,
            PortReg::PullDown => PORT_PULL_DOWN_REG_OFFSET,
            PortReg::DigitalEnable => PORT_DIGITAL_ENABLE_REG_OFFSET,
            PortReg::Lock => PORT_LOCK_REG_OFFSET,
            PortReg::Commit => PORT_COMMIT_REG_OFFSET,
            PortReg::AnalogModeSel => PORT_ANALOG_MODE_SEL_REG_OFFSET,
            PortReg::Control => PORT_CTL_REG_OFFSET,
        }
    }
}

/// Word access to the GPIO blocks and their clock gates.
///
/// This is the only seam between the configuration engine and the hardware.
/// [`Mmio`] talks to the real registers; anything else implementing this
/// trait (an in-memory model, a trace recorder) can stand in for it.
pub trait PortBus {
    fn read(&self, port: PortName, reg: PortReg) -> u32;

    fn write(&mut self, port: PortName, reg: PortReg, value: u32);

    /// Gates the run-mode clock of `port` on and waits until the block is
    /// accessible.
    fn enable_clock(&mut self, port: PortName);
}

/// Memory-mapped GPIO blocks of the TM4C123GH6PM.
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Takes the GPIO blocks and RCGC2.
    ///
    /// # Safety
    ///
    /// Only one `Mmio` may exist, and nothing else may write the GPIO
    /// blocks or RCGC2 while it is in use.
    pub const unsafe fn steal() -> Self {
        Mmio { _private: () }
    }
}

impl PortBus for Mmio {
    fn read(&self, port: PortName, reg: PortReg) -> u32 {
        match reg {
            PortReg::Data => read_reg_gpio_data(port),
            PortReg::Direction => read_reg_gpio_dir(port),
            PortReg::AltFunc => read_reg_gpio_afsel(port),
            PortReg::PullUp => read_reg_gpio_pur(port),
            PortReg::PullDown => read_reg_gpio_pdr(port),
            PortReg::DigitalEnable => read_reg_gpio_den(port),
            PortReg::Lock => read_reg_gpio_lock(port),
            PortReg::Commit => read_reg_gpio_cr(port),
            PortReg::AnalogModeSel => read_reg_gpio_amsel(port),
            PortReg::Control => read_reg_gpio_pctl(port),
        }
    }

    fn write(&mut self, port: PortName, reg: PortReg, value: u32) {
        match reg {
            PortReg::Data => write_reg_gpio_data(value, port),
            PortReg::Direction => write_reg_gpio_dir(value, port),
            PortReg::AltFunc => write_reg_gpio_afsel(value, port),
            PortReg::PullUp => write_reg_gpio_pur(value, port),
            PortReg::PullDown => write_reg_gpio_pdr(value, port),
            PortReg::DigitalEnable => write_reg_gpio_den(value, port),
            PortReg::Lock => write_reg_gpio_lock(value, port),
            PortReg::Commit => write_reg_gpio_cr(value, port),
            PortReg::AnalogModeSel => write_reg_gpio_amsel(value, port),
            PortReg::Control => write_reg_gpio_pctl(value, port),
        }
    }

    fn enable_clock(&mut self, port: PortName) {
        let mut val = read_reg_rcgc2();
        BM_SET!(val, FLD_RCGC2::port(port).bits());
        write_reg_rcgc2(val);

        // a few cycles must pass before the block responds, the read back covers them
        let _ = read_reg_rcgc2();
    }
}
