//! Inbound boundary for raw ANCS GATT payloads
//!
//! The BLE client calls the two `deliver_*` entry points from wherever its
//! stack surfaces characteristic notifications; the decoding task consumes
//! the payloads on the other side. Delivery never blocks: a full inbox
//! drops the payload and bumps a counter, so a bursty peer cannot stall
//! the radio path.

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::Vec;

/// Largest GATT payload the inbox keeps; anything longer is clamped.
pub const MAX_GATT_PAYLOAD: usize = 512;

/// Raw payloads buffered between delivery and decoding.
const INBOX_DEPTH: usize = 4;

/// Which ANCS characteristic a payload arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AncsCharacteristic {
    NotificationSource,
    DataSource,
}

/// One raw characteristic notification, as delivered
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GattPayload {
    pub characteristic: AncsCharacteristic,
    pub data: Vec<u8, MAX_GATT_PAYLOAD>,
}

/// Bounded mailbox between the BLE stack and the decoding task
pub struct AncsInbox {
    raw: Channel<CriticalSectionRawMutex, GattPayload, INBOX_DEPTH>,
    dropped: AtomicU32,
}

impl AncsInbox {
    /// Create an empty inbox
    pub const fn new() -> Self {
        Self {
            raw: Channel::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Entry point for Notification Source characteristic data
    pub fn deliver_notification_source(&self, bytes: &[u8]) {
        self.deliver(AncsCharacteristic::NotificationSource, bytes);
    }

    /// Entry point for Data Source characteristic data
    pub fn deliver_data_source(&self, bytes: &[u8]) {
        self.deliver(AncsCharacteristic::DataSource, bytes);
    }

    fn deliver(&self, characteristic: AncsCharacteristic, bytes: &[u8]) {
        let mut data = Vec::new();
        // Cannot fail: the source slice is clamped to the Vec capacity.
        let _ = data.extend_from_slice(&bytes[..bytes.len().min(MAX_GATT_PAYLOAD)]);

        let payload = GattPayload {
            characteristic,
            data,
        };
        if self.raw.try_send(payload).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Wait for the next delivered payload
    pub async fn next(&self) -> GattPayload {
        self.raw.receive().await
    }

    /// Take a pending payload without waiting
    pub fn try_next(&self) -> Option<GattPayload> {
        self.raw.try_receive().ok()
    }

    /// Discard everything delivered so far
    pub fn reset(&self) {
        self.raw.clear();
    }

    /// Payloads dropped because the inbox was full
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl Default for AncsInbox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_keeps_characteristic_and_bytes() {
        let inbox = AncsInbox::new();
        inbox.deliver_notification_source(&[1, 0, 2, 3, 42, 0, 0, 0]);
        inbox.deliver_data_source(&[0, 7, 0, 0, 0]);

        let first = inbox.try_next().unwrap();
        assert_eq!(first.characteristic, AncsCharacteristic::NotificationSource);
        assert_eq!(first.data.as_slice(), &[1, 0, 2, 3, 42, 0, 0, 0]);

        let second = inbox.try_next().unwrap();
        assert_eq!(second.characteristic, AncsCharacteristic::DataSource);
        assert_eq!(second.data.as_slice(), &[0, 7, 0, 0, 0]);

        assert!(inbox.try_next().is_none());
    }

    #[test]
    fn test_overflow_drops_and_counts() {
        let inbox = AncsInbox::new();
        for _ in 0..INBOX_DEPTH {
            inbox.deliver_data_source(&[0]);
        }
        assert_eq!(inbox.dropped(), 0);

        inbox.deliver_data_source(&[0]);
        inbox.deliver_notification_source(&[0]);
        assert_eq!(inbox.dropped(), 2);
    }

    #[test]
    fn test_oversized_payload_clamped() {
        let inbox = AncsInbox::new();
        let big = [0xABu8; MAX_GATT_PAYLOAD + 100];
        inbox.deliver_data_source(&big);

        let payload = inbox.try_next().unwrap();
        assert_eq!(payload.data.len(), MAX_GATT_PAYLOAD);
    }

    #[test]
    fn test_reset_discards_pending() {
        let inbox = AncsInbox::new();
        inbox.deliver_data_source(&[1]);
        inbox.deliver_data_source(&[2]);

        inbox.reset();
        assert!(inbox.try_next().is_none());

        inbox.deliver_data_source(&[3]);
        assert_eq!(inbox.try_next().unwrap().data.as_slice(), &[3]);
    }
}
