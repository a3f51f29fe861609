//! Tidings - BLE notification board firmware
//!
//! Receives iPhone notifications over the Apple Notification Center
//! Service and tickers them onto an 800x272 e-paper panel. The BLE host
//! glue delivers raw GATT payloads into the ANCS inbox; everything from
//! decode to draw happens in the two tasks spawned here.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::peripherals::SPI3;
use embassy_nrf::{bind_interrupts, spim};
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use tidings_core::{AncsInbox, NotificationQueue};

use crate::epaper::{Epd397, FRAME_BYTES};

mod ancs;
mod channels;
mod epaper;
mod tasks;

bind_interrupts!(struct Irqs {
    SPIM3 => spim::InterruptHandler<SPI3>;
});

// Static cells for state shared across tasks (must live forever)
static FRAME: StaticCell<[u8; FRAME_BYTES]> = StaticCell::new();
static QUEUE: StaticCell<NotificationQueue> = StaticCell::new();
static INBOX: StaticCell<AncsInbox> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("tidings firmware starting...");

    let p = embassy_nrf::init(Default::default());
    info!("peripherals initialized");

    // SPI for the e-paper panel
    let mut spi_config = spim::Config::default();
    spi_config.frequency = spim::Frequency::M8;
    let spi = spim::Spim::new_txonly(p.SPI3, Irqs, p.P0_19, p.P0_20, spi_config);

    let dc = Output::new(p.P0_17, Level::Low, OutputDrive::Standard);
    let rst = Output::new(p.P0_16, Level::High, OutputDrive::Standard);
    let busy = Input::new(p.P0_15, Pull::None);

    let frame = FRAME.init([0xFF; FRAME_BYTES]);
    let display = Epd397::new(spi, dc, rst, busy, frame);
    info!("e-paper SPI initialized");

    // The queue and inbox are built here and handed to both contexts; the
    // BLE host glue receives the same inbox reference for its GATT
    // notification callbacks.
    let queue = QUEUE.init(NotificationQueue::new());
    let inbox = INBOX.init(AncsInbox::new());

    spawner.spawn(tasks::ancs_rx_task(inbox, queue)).unwrap();
    spawner.spawn(tasks::render_task(queue, display)).unwrap();

    info!("all tasks spawned, firmware running");
    info!(
        "ANCS service {=str} awaiting host subscription",
        ancs::SERVICE_UUID
    );
    debug!(
        "notification source {=str}, data source {=str}, control point {=str}",
        ancs::NOTIFICATION_SOURCE_UUID,
        ancs::DATA_SOURCE_UUID,
        ancs::CONTROL_POINT_UUID
    );

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        Timer::after_secs(60).await;
        trace!("main loop heartbeat");
    }
}
