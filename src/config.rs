use crate::sdk::drivers::port::{PinConfig, PortConfig};
use crate::sdk::mcu::gpio::{
    pin_id, PinDirection, PinResistor, PortName, PortPin, PORTA_FIRST_PIN, PORTF_END_PIN,
    PORT_PIN_MODE_ADC, PORT_PIN_MODE_DIO,
};

// Configuration version, checked against the driver at compile time
pub const PORT_CFG_SW_MAJOR_VERSION: u8 = 1;
pub const PORT_CFG_SW_MINOR_VERSION: u8 = 0;
pub const PORT_CFG_SW_PATCH_VERSION: u8 = 0;

pub const PORT_CFG_AR_RELEASE_MAJOR_VERSION: u8 = 4;
pub const PORT_CFG_AR_RELEASE_MINOR_VERSION: u8 = 0;
pub const PORT_CFG_AR_RELEASE_PATCH_VERSION: u8 = 3;

pub const PORT_CONFIGURED_CHANNELS: usize = 43;

// Values every pin gets unless the board section below says otherwise
pub const PORT_PIN_DEFAULT_MODE: u8 = PORT_PIN_MODE_DIO;
pub const PORT_PIN_DEFAULT_DIRECTION: PinDirection = PinDirection::In;
pub const PORT_PIN_DEFAULT_INITIAL_VALUE: bool = false;
pub const PORT_PIN_DEFAULT_DIRECTION_CHANGEABLE: bool = false;
pub const PORT_PIN_DEFAULT_MODE_CHANGEABLE: bool = false;
pub const PORT_PIN_DEFAULT_RESISTOR: PinResistor = PinResistor::Off;

// EK-TM4C123GXL launchpad
pub const UART0_RX: PortPin = pin_id(PortName::A, 0);
pub const UART0_TX: PortPin = pin_id(PortName::A, 1);
pub const POT_AIN0: PortPin = pin_id(PortName::E, 3);
pub const SW2: PortPin = pin_id(PortName::F, 0);
pub const LED_RED: PortPin = pin_id(PortName::F, 1);
pub const LED_BLUE: PortPin = pin_id(PortName::F, 2);
pub const LED_GREEN: PortPin = pin_id(PortName::F, 3);
pub const SW1: PortPin = pin_id(PortName::F, 4);

const UART0_MODE: u8 = 1;

const _: () = assert!(PORT_CONFIGURED_CHANNELS == (PORTF_END_PIN - PORTA_FIRST_PIN + 1) as usize);

const fn default_pin(pin_num: PortPin) -> PinConfig {
    PinConfig {
        pin_num,
        mode: PORT_PIN_DEFAULT_MODE,
        direction: PORT_PIN_DEFAULT_DIRECTION,
        initial_value: PORT_PIN_DEFAULT_INITIAL_VALUE,
        direction_changeable: PORT_PIN_DEFAULT_DIRECTION_CHANGEABLE,
        mode_changeable: PORT_PIN_DEFAULT_MODE_CHANGEABLE,
        resistor: PORT_PIN_DEFAULT_RESISTOR,
    }
}

const fn slot(pin: PortPin) -> usize {
    (pin - PORTA_FIRST_PIN) as usize
}

const fn board_channels() -> [PinConfig; PORT_CONFIGURED_CHANNELS] {
    let mut channels = [default_pin(0); PORT_CONFIGURED_CHANNELS];

    let mut i = 0;
    while i < PORT_CONFIGURED_CHANNELS {
        channels[i] = default_pin(PORTA_FIRST_PIN + i as PortPin);
        i += 1;
    }

    channels[slot(UART0_RX)] = default_pin(UART0_RX).mode(UART0_MODE);
    channels[slot(UART0_TX)] = default_pin(UART0_TX).output(true).mode(UART0_MODE);
    channels[slot(POT_AIN0)] = default_pin(POT_AIN0).mode(PORT_PIN_MODE_ADC);

    // switches short to ground
    channels[slot(SW1)] = default_pin(SW1).input(PinResistor::PullUp);
    channels[slot(SW2)] = default_pin(SW2).input(PinResistor::PullUp);

    channels[slot(LED_RED)] = default_pin(LED_RED).output(false);
    channels[slot(LED_GREEN)] = default_pin(LED_GREEN).output(false);
    channels[slot(LED_BLUE)] = default_pin(LED_BLUE)
        .output(false)
        .direction_changeable()
        .mode_changeable();

    channels
}

static PORT_CHANNELS: [PinConfig; PORT_CONFIGURED_CHANNELS] = board_channels();

/// Table handed to `PortDriver::init` at startup.
pub static PORT_CONFIGURATION: PortConfig<'static> = PortConfig::new(&PORT_CHANNELS);
