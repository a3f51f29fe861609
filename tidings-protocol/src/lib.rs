//! Apple Notification Center Service (ANCS) wire decoding
//!
//! This crate decodes the two GATT payloads an ANCS notification consumer
//! receives from the phone. Both arrive as raw byte buffers; the peer
//! controls every byte, so all parsing is bounds-checked and infallible in
//! the sense that malformed input degrades to "dropped" or "partial", never
//! to a panic or an out-of-range read.
//!
//! # Notification Source
//!
//! Fixed 8-byte layout announcing that a notification was added, modified
//! or removed:
//! ```text
//! ┌─────────┬────────────┬────────────┬───────────────┬──────────────────┐
//! │ EventID │ EventFlags │ CategoryID │ CategoryCount │ NotificationUID  │
//! │ 1B      │ 1B         │ 1B         │ 1B            │ 4B little-endian │
//! └─────────┴────────────┴────────────┴───────────────┴──────────────────┘
//! ```
//!
//! # Data Source
//!
//! Variable-length command responses. A `GetNotificationAttributes`
//! response carries the notification content as a TLV list:
//! ```text
//! ┌───────────┬──────────────────┬──────────────────────────────────┐
//! │ CommandID │ NotificationUID  │ { AttributeID | Length | Data }* │
//! │ 1B        │ 4B little-endian │   1B          | 2B LE  | Length  │
//! └───────────┴──────────────────┴──────────────────────────────────┘
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod attributes;
pub mod notification;
pub mod source;

pub use attributes::{AttributeId, AttributeWalker, CommandId};
pub use notification::{decode_data_source, AttributeResponse, DataSource, Notification};
pub use source::{CategoryId, EventFlags, EventId, SourceEvent, SOURCE_EVENT_LEN};
