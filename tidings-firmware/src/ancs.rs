//! ANCS GATT identifiers
//!
//! The BLE host discovers the service below on the paired phone,
//! subscribes to the two notifying characteristics, and forwards every
//! characteristic notification into the matching `AncsInbox` delivery
//! entry point. Connection, pairing and subscription lifecycle live
//! entirely in the host stack.

/// Apple Notification Center Service
pub const SERVICE_UUID: &str = "7905f431-b5ce-4e99-a40f-4b1e122d00d0";

/// Notification Source characteristic (notify)
pub const NOTIFICATION_SOURCE_UUID: &str = "9fbf120d-6301-42d9-8c58-25e699a21dbd";

/// Data Source characteristic (notify)
pub const DATA_SOURCE_UUID: &str = "22eac6e9-24d6-4bb5-be44-b36ace7c7bfb";

/// Control Point characteristic (write, for attribute requests)
pub const CONTROL_POINT_UUID: &str = "69d1d8f3-45e1-49a8-9821-9bbdfdaad9d9";
