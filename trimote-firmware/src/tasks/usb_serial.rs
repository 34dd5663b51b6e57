//! USB CDC-ACM host serial
//!
//! The host sends single-character commands. Every received byte is queued
//! for the controller, which consumes at most one per loop iteration.

use defmt::*;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::cdc_acm::CdcAcmClass;
use embassy_usb::UsbDevice;

use crate::channels::SERIAL_RX;

/// Max packet size of the CDC bulk endpoints
pub const USB_PACKET_SIZE: u16 = 64;

/// Runs the USB device stack
#[embassy_executor::task]
pub async fn usb_device_task(mut usb: UsbDevice<'static, Driver<'static, USB>>) {
    usb.run().await;
}

/// Host serial task - queues received bytes for the controller
#[embassy_executor::task]
pub async fn usb_serial_task(mut class: CdcAcmClass<'static, Driver<'static, USB>>) {
    info!("USB serial task started");

    let mut buf = [0u8; USB_PACKET_SIZE as usize];

    loop {
        class.wait_connection().await;
        info!("USB host connected");

        loop {
            let n = match class.read_packet(&mut buf).await {
                Ok(n) => n,
                Err(_) => {
                    info!("USB host disconnected");
                    break;
                }
            };

            for &byte in &buf[..n] {
                if SERIAL_RX.try_send(byte).is_err() {
                    warn!("Serial queue full, dropping {=u8:#x}", byte);
                }
            }
        }
    }
}
