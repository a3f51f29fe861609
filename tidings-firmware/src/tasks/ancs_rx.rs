//! ANCS receive task (producer context)
//!
//! Decodes raw GATT payloads out of the inbox and enqueues notification
//! records for the render task. Every malformed or dropped payload is
//! logged and forgotten; nothing on this path is fatal.

use defmt::*;

use tidings_core::{AncsCharacteristic, AncsInbox, NotificationQueue};
use tidings_protocol::{decode_data_source, DataSource, SourceEvent};

use crate::channels::DISPLAY_READY;

/// ANCS rx task - decodes inbox payloads into queued notifications
#[embassy_executor::task]
pub async fn ancs_rx_task(inbox: &'static AncsInbox, queue: &'static NotificationQueue) {
    info!("ANCS rx task started");

    // The phone replays its whole notification backlog the moment the
    // subscription goes live, which can be well before the panel finished
    // its first refresh. Wait for the display, then drop the stale batch.
    DISPLAY_READY.wait().await;
    queue.reset();
    inbox.reset();
    info!("display ready, accepting notifications");

    loop {
        let payload = inbox.next().await;
        match payload.characteristic {
            AncsCharacteristic::NotificationSource => handle_notification_source(&payload.data),
            AncsCharacteristic::DataSource => handle_data_source(&payload.data, queue),
        }
    }
}

/// Log a Notification Source event; these announce lifecycle changes and
/// are not queued. Payloads shorter than the fixed layout are dropped
/// without noise.
fn handle_notification_source(bytes: &[u8]) {
    if let Some(event) = SourceEvent::parse(bytes) {
        info!(
            "notification source: {:?} {:?} count={} flags={:?} uid={}",
            event.event_id, event.category_id, event.category_count, event.flags, event.uid
        );
    }
}

/// Decode a Data Source payload and enqueue the record it carries, if any
fn handle_data_source(bytes: &[u8], queue: &NotificationQueue) {
    match decode_data_source(bytes) {
        Some(DataSource::NotificationAttributes(response)) => {
            if response.truncated {
                warn!(
                    "attribute stream cut short, keeping partial record uid={}",
                    response.uid
                );
            }
            debug!(
                "notification attributes uid={} title={=str}",
                response.uid,
                response.notification.title.as_str()
            );
            if queue.enqueue(response.notification).is_err() {
                warn!("notification queue full, dropping uid={}", response.uid);
            }
        }
        Some(DataSource::AppAttributes) => debug!("app attributes response"),
        Some(DataSource::NotificationAction) => debug!("notification action response"),
        Some(DataSource::Unknown(id)) => warn!("unknown data source command {}", id),
        None => warn!("malformed data source payload ({} bytes)", bytes.len()),
    }
}
