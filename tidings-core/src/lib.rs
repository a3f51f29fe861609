//! Board-agnostic core of the Tidings notification board
//!
//! Everything between the BLE byte stream and the panel hardware lives
//! here: the bounded queue that carries records across the task boundary,
//! the inbound payload boundary the BLE client delivers into, the display
//! driver trait, and the scroll/wrap layout engine with its renderer.
//!
//! The crate is `no_std` and hardware-free so the whole pipeline is
//! testable on the host; the firmware crate supplies the panel driver and
//! the executor.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod inbox;
pub mod layout;
pub mod queue;
pub mod render;

pub use display::{Color, DisplayDriver, DisplayError, Font};
pub use inbox::{AncsCharacteristic, AncsInbox, GattPayload, MAX_GATT_PAYLOAD};
pub use layout::{FeedCursor, FeedGeometry, Placement, Window};
pub use queue::{NotificationQueue, QUEUE_DEPTH};
pub use render::FeedRenderer;
