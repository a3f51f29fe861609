//! Notification Source events
//!
//! The Notification Source characteristic announces lifecycle changes of
//! iOS notifications. The payload is a fixed 8-byte record; anything
//! shorter is dropped without producing an event.

/// Length of a complete Notification Source payload in bytes.
pub const SOURCE_EVENT_LEN: usize = 8;

// EventID wire values
const EVENT_ADDED: u8 = 1;
const EVENT_MODIFIED: u8 = 2;
const EVENT_REMOVED: u8 = 3;

/// Lifecycle event carried by a Notification Source payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventId {
    /// A new notification appeared on the phone
    #[default]
    Added,
    /// An existing notification changed
    Modified,
    /// A notification was dismissed or cleared
    Removed,
    /// Reserved value from a newer ANCS revision
    Unknown(u8),
}

impl EventId {
    /// Parse an event id from its wire byte
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            EVENT_ADDED => EventId::Added,
            EVENT_MODIFIED => EventId::Modified,
            EVENT_REMOVED => EventId::Removed,
            other => EventId::Unknown(other),
        }
    }
}

/// Notification category carried by a Notification Source payload
///
/// The phone makes a best effort to classify each notification; values
/// outside the published table are preserved as `Unknown` so a newer peer
/// never breaks decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CategoryId {
    #[default]
    Other,
    IncomingCall,
    MissedCall,
    Voicemail,
    Social,
    Schedule,
    Email,
    News,
    HealthAndFitness,
    BusinessAndFinance,
    Location,
    Entertainment,
    Unknown(u8),
}

impl CategoryId {
    /// Parse a category id from its wire byte
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            1 => CategoryId::Other,
            2 => CategoryId::IncomingCall,
            3 => CategoryId::MissedCall,
            4 => CategoryId::Voicemail,
            5 => CategoryId::Social,
            6 => CategoryId::Schedule,
            7 => CategoryId::Email,
            8 => CategoryId::News,
            9 => CategoryId::HealthAndFitness,
            10 => CategoryId::BusinessAndFinance,
            11 => CategoryId::Location,
            12 => CategoryId::Entertainment,
            other => CategoryId::Unknown(other),
        }
    }
}

/// EventFlags bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventFlags(u8);

impl EventFlags {
    /// The notification is low priority
    pub const SILENT: u8 = 1 << 0;
    /// The phone considers the notification important
    pub const IMPORTANT: u8 = 1 << 1;
    /// The notification existed before the subscription was established
    pub const PRE_EXISTING: u8 = 1 << 2;
    /// A positive action is available on the control point
    pub const POSITIVE_ACTION: u8 = 1 << 3;
    /// A negative action is available on the control point
    pub const NEGATIVE_ACTION: u8 = 1 << 4;

    /// Wrap a raw flag byte
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw flag byte
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check whether every bit of `flag` is set
    pub const fn contains(self, flag: u8) -> bool {
        self.0 & flag == flag
    }
}

/// A decoded Notification Source event
///
/// Transient: consumed (logged) within the delivery that produced it and
/// never queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SourceEvent {
    pub event_id: EventId,
    pub flags: EventFlags,
    pub category_id: CategoryId,
    /// Number of active notifications in this category
    pub category_count: u8,
    /// Handle for control point commands about this notification
    pub uid: u32,
}

impl SourceEvent {
    /// Parse a Notification Source payload
    ///
    /// Requires the full 8-byte layout; returns `None` for anything
    /// shorter. The UID is little-endian.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < SOURCE_EVENT_LEN {
            return None;
        }

        Some(Self {
            event_id: EventId::from_byte(bytes[0]),
            flags: EventFlags::from_bits(bytes[1]),
            category_id: CategoryId::from_byte(bytes[2]),
            category_count: bytes[3],
            uid: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        })
    }
}
