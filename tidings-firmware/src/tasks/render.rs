//! Render task (consumer context)
//!
//! Draws the static chrome once, signals readiness, then polls the queue
//! on a fixed cadence and draws at most one notification per tick.

use defmt::*;
use embassy_time::{Duration, Ticker};

use tidings_core::{FeedRenderer, NotificationQueue};

use crate::channels::DISPLAY_READY;
use crate::epaper::Epd397;

/// Poll cadence of the consumer loop
const POLL_INTERVAL_MS: u64 = 1000;

/// Render task - owns the panel and the scroll state
#[embassy_executor::task]
pub async fn render_task(queue: &'static NotificationQueue, display: Epd397) {
    info!("render task started");

    let mut renderer = FeedRenderer::new(display);
    match renderer.draw_chrome() {
        Ok(()) => info!("initial screen drawn"),
        Err(err) => error!("initial screen draw failed: {:?}", err),
    }
    DISPLAY_READY.signal(());

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    loop {
        if let Some(notification) = queue.dequeue() {
            debug!(
                "rendering notification title={=str}",
                notification.title.as_str()
            );
            if let Err(err) = renderer.draw_notification(&notification) {
                warn!("notification draw failed: {:?}", err);
            }
        }
        ticker.next().await;
    }
}
