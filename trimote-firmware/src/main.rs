//! Trimote - Three-Device Wireless Remote Controller Firmware
//!
//! Main firmware binary for RP2040-based hand-held controllers. Single
//! character commands from a USB host drive up to three ESP-NOW motor
//! devices; two buttons pick the speed; a UART text terminal shows state.
//!
//! Board wiring:
//! - UART0 (GPIO0 TX, GPIO1 RX): display terminal
//! - UART1 (GPIO4 TX, GPIO5 RX): ESP-NOW bridge co-processor
//! - GPIO14 / GPIO15: speed down / speed up buttons (active low)
//! - USB: CDC-ACM host serial

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::{UART0, UART1, USB};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};
use embassy_usb::class::cdc_acm::{CdcAcmClass, State};
use embassy_usb::{Builder, Config as UsbConfig};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use trimote_core::{Controller, HeartbeatTimer};

use crate::config::load_config;
use crate::radio::BridgeRadio;

mod channels;
mod config;
mod display;
mod inputs;
mod radio;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
    USBCTRL_IRQ => UsbInterruptHandler<USB>;
});

// Static cells for UART buffers (must live forever)
static DISPLAY_TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static DISPLAY_RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RADIO_TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RADIO_RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// USB descriptor and class state
static USB_CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static USB_STATE: StaticCell<State<'static>> = StaticCell::new();

// Shared between the tick task and the controller task
static HEARTBEAT_TIMER: StaticCell<HeartbeatTimer> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Trimote firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Display terminal on UART0
    let display_uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default())
        .into_buffered::<UART0>(
            Irqs,
            DISPLAY_TX_BUF.init([0u8; 256]),
            DISPLAY_RX_BUF.init([0u8; 256]),
        );
    let (display_tx, display_rx) = display_uart.split();
    info!("UART0 initialized for display");

    // ESP-NOW bridge on UART1
    let radio_uart = Uart::new_blocking(p.UART1, p.PIN_4, p.PIN_5, UartConfig::default())
        .into_buffered::<UART1>(
            Irqs,
            RADIO_TX_BUF.init([0u8; 256]),
            RADIO_RX_BUF.init([0u8; 256]),
        );
    let (radio_tx, radio_rx) = radio_uart.split();
    info!("UART1 initialized for radio bridge");

    // Host serial over USB CDC-ACM
    let driver = Driver::new(p.USB, Irqs);
    let mut usb_config = UsbConfig::new(0x2e8a, 0x000a);
    usb_config.manufacturer = Some("Trimote");
    usb_config.product = Some("Trimote Controller");
    usb_config.serial_number = Some("00000001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let mut builder = Builder::new(
        driver,
        usb_config,
        USB_CONFIG_DESCRIPTOR.init([0u8; 256]),
        USB_BOS_DESCRIPTOR.init([0u8; 256]),
        USB_MSOS_DESCRIPTOR.init([0u8; 256]),
        USB_CONTROL_BUF.init([0u8; 64]),
    );
    let class = CdcAcmClass::new(
        &mut builder,
        USB_STATE.init(State::new()),
        tasks::usb_serial::USB_PACKET_SIZE,
    );
    let usb = builder.build();
    info!("USB CDC-ACM initialized");

    // Speed buttons
    let buttons = tasks::ButtonPins {
        speed_down: Input::new(p.PIN_14, Pull::Up),
        speed_up: Input::new(p.PIN_15, Pull::Up),
    };

    // Peers are queued for the bridge here; the radio TX task sends them
    // once it starts
    let controller = match Controller::new(&config, BridgeRadio::new()) {
        Ok(controller) => controller,
        Err(e) => defmt::panic!("Controller setup failed: {:?}", e),
    };
    info!(
        "Controller ready: {} peers, speed {}",
        controller.registry().len(),
        controller.speed()
    );

    let timer: &'static HeartbeatTimer = HEARTBEAT_TIMER.init(HeartbeatTimer::new(&config.timer));

    // Spawn tasks
    spawner
        .spawn(tasks::tick_task(timer, config.timer.tick_period_us))
        .unwrap();
    spawner.spawn(tasks::display_rx_task(display_rx)).unwrap();
    spawner.spawn(tasks::display_tx_task(display_tx)).unwrap();
    spawner.spawn(tasks::radio_rx_task(radio_rx)).unwrap();
    spawner.spawn(tasks::radio_tx_task(radio_tx)).unwrap();
    spawner.spawn(tasks::usb_device_task(usb)).unwrap();
    spawner.spawn(tasks::usb_serial_task(class)).unwrap();
    spawner
        .spawn(tasks::button_task(buttons, config.buttons.debounce_ms))
        .unwrap();
    spawner
        .spawn(tasks::controller_task(controller, timer))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
