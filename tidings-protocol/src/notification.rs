//! The bounded notification record and Data Source decoding
//!
//! [`decode_data_source`] is the entry point for Data Source payloads. A
//! `GetNotificationAttributes` response is folded into one [`Notification`]
//! with bounded string fields; the record is complete the moment it is
//! returned and is then moved, never shared, on its way to the display.

use heapless::String;

use crate::attributes::{AttributeId, AttributeWalker, CommandId};
use crate::source::{CategoryId, EventId};

/// Capacity of the app identifier field in bytes.
pub const APP_ID_CAPACITY: usize = 31;
/// Capacity of the title field in bytes.
pub const TITLE_CAPACITY: usize = 63;
/// Capacity of the subtitle field in bytes.
pub const SUBTITLE_CAPACITY: usize = 63;
/// Capacity of the message field in bytes.
pub const MESSAGE_CAPACITY: usize = 127;

/// A phone notification, decoded and bounded
///
/// Every string field is always valid UTF-8 within its capacity; an
/// attribute missing from the response leaves its field empty. Oversized
/// attributes are cut at the capacity, backed off to a character boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Notification {
    pub category_id: CategoryId,
    pub event_id: EventId,
    pub app_id: String<APP_ID_CAPACITY>,
    pub title: String<TITLE_CAPACITY>,
    pub subtitle: String<SUBTITLE_CAPACITY>,
    pub message: String<MESSAGE_CAPACITY>,
}

/// A decoded `GetNotificationAttributes` response
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AttributeResponse {
    /// UID echoed from the request
    pub uid: u32,
    /// The accumulated record; partial if `truncated` is set
    pub notification: Notification,
    /// The attribute stream ended in a malformed entry; fields decoded
    /// before the stop are kept
    pub truncated: bool,
}

/// A Data Source payload, dispatched on its command id
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataSource {
    /// Notification content; the only variant that produces a record
    NotificationAttributes(AttributeResponse),
    /// App attributes response, identified but not decoded further
    AppAttributes,
    /// Perform Notification Action response, identified but not decoded
    /// further
    NotificationAction,
    /// Unrecognized command id
    Unknown(u8),
}

/// Size of the `GetNotificationAttributes` header: command id (1 byte) +
/// notification UID (4 bytes).
const RESPONSE_HEADER_LEN: usize = 5;

/// Decode a Data Source payload
///
/// Returns `None` for an empty buffer or a `GetNotificationAttributes`
/// response too short to carry its UID; both are dropped by the caller.
/// Any recognizable command id yields a value, so unknown peers degrade to
/// an observable `Unknown` rather than an error.
pub fn decode_data_source(bytes: &[u8]) -> Option<DataSource> {
    let (&command, rest) = bytes.split_first()?;

    match CommandId::from_byte(command) {
        CommandId::GetNotificationAttributes => {
            if bytes.len() < RESPONSE_HEADER_LEN {
                return None;
            }
            let uid = u32::from_le_bytes([rest[0], rest[1], rest[2], rest[3]]);

            let mut walker = AttributeWalker::new(&rest[4..]);
            let mut notification = Notification::default();
            for (id, data) in walker.by_ref() {
                match id {
                    AttributeId::AppIdentifier => copy_bounded(&mut notification.app_id, data),
                    AttributeId::Title => copy_bounded(&mut notification.title, data),
                    AttributeId::Subtitle => copy_bounded(&mut notification.subtitle, data),
                    AttributeId::Message => copy_bounded(&mut notification.message, data),
                    // MessageSize, Date, the action labels and reserved ids
                    // are consumed to keep the cursor aligned, not stored.
                    _ => {}
                }
            }

            Some(DataSource::NotificationAttributes(AttributeResponse {
                uid,
                notification,
                truncated: walker.truncated(),
            }))
        }
        CommandId::GetAppAttributes => Some(DataSource::AppAttributes),
        CommandId::PerformNotificationAction => Some(DataSource::NotificationAction),
        CommandId::Unknown(id) => Some(DataSource::Unknown(id)),
    }
}

/// Copy raw attribute bytes into a bounded string
///
/// Clamps to the field capacity and backs off to a UTF-8 character
/// boundary; invalid UTF-8 keeps the longest valid prefix.
fn copy_bounded<const N: usize>(dst: &mut String<N>, data: &[u8]) {
    dst.clear();
    let clamped = &data[..data.len().min(N)];
    let text = match core::str::from_utf8(clamped) {
        Ok(text) => text,
        Err(err) => core::str::from_utf8(&clamped[..err.valid_up_to()]).unwrap_or(""),
    };
    let _ = dst.push_str(text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn attributes_response(uid: u32, attrs: &[(u8, &[u8])]) -> Vec<u8> {
        let mut bytes = vec![0];
        bytes.extend_from_slice(&uid.to_le_bytes());
        for (id, data) in attrs {
            bytes.push(*id);
            bytes.extend_from_slice(&(data.len() as u16).to_le_bytes());
            bytes.extend_from_slice(data);
        }
        bytes
    }

    fn expect_response(decoded: Option<DataSource>) -> AttributeResponse {
        match decoded {
            Some(DataSource::NotificationAttributes(response)) => response,
            other => panic!("expected notification attributes, got {:?}", other),
        }
    }

    #[test]
    fn test_round_trip_title_and_message() {
        let bytes = attributes_response(1, &[(1, b"Hi"), (3, b"Bye")]);
        let response = expect_response(decode_data_source(&bytes));

        assert_eq!(response.notification.title, "Hi");
        assert_eq!(response.notification.message, "Bye");
        assert_eq!(response.notification.subtitle, "");
        assert_eq!(response.notification.app_id, "");
        assert!(!response.truncated);
    }

    #[test]
    fn test_single_title_attribute() {
        let bytes = attributes_response(7, &[(1, b"Bob")]);
        let response = expect_response(decode_data_source(&bytes));

        assert_eq!(response.uid, 7);
        assert_eq!(response.notification.title, "Bob");
        assert_eq!(response.notification.subtitle, "");
        assert_eq!(response.notification.app_id, "");
        assert_eq!(response.notification.message, "");
    }

    #[test]
    fn test_all_stored_attributes() {
        let bytes = attributes_response(
            3,
            &[
                (0, b"com.example.mail"),
                (1, b"Lunch?"),
                (2, b"From Ann"),
                (3, b"See you at noon"),
            ],
        );
        let response = expect_response(decode_data_source(&bytes));

        assert_eq!(response.notification.app_id, "com.example.mail");
        assert_eq!(response.notification.title, "Lunch?");
        assert_eq!(response.notification.subtitle, "From Ann");
        assert_eq!(response.notification.message, "See you at noon");
    }

    #[test]
    fn test_consume_only_attributes_are_skipped() {
        let bytes = attributes_response(
            9,
            &[(4, b"120"), (5, b"20250101T120000"), (1, b"Hello"), (6, b"Open")],
        );
        let response = expect_response(decode_data_source(&bytes));

        assert_eq!(response.notification.title, "Hello");
        assert_eq!(response.notification.message, "");
        assert!(!response.truncated);
    }

    #[test]
    fn test_oversized_attribute_truncates_at_capacity() {
        let long = [b'x'; 200];
        let bytes = attributes_response(2, &[(1, &long)]);
        let response = expect_response(decode_data_source(&bytes));

        assert_eq!(response.notification.title.len(), TITLE_CAPACITY);
        assert!(response.notification.title.chars().all(|c| c == 'x'));
    }

    #[test]
    fn test_truncation_respects_char_boundary() {
        // 31 dots followed by a two-byte "é" straddling the app_id capacity.
        let mut data = Vec::new();
        data.extend_from_slice(&[b'.'; APP_ID_CAPACITY - 1]);
        data.extend_from_slice("é".as_bytes());
        let bytes = attributes_response(4, &[(0, &data)]);
        let response = expect_response(decode_data_source(&bytes));

        assert_eq!(response.notification.app_id.len(), APP_ID_CAPACITY - 1);
        assert!(response.notification.app_id.chars().all(|c| c == '.'));
    }

    #[test]
    fn test_invalid_utf8_keeps_valid_prefix() {
        let bytes = attributes_response(5, &[(3, &[b'o', b'k', 0xFF, 0xFE])]);
        let response = expect_response(decode_data_source(&bytes));

        assert_eq!(response.notification.message, "ok");
    }

    #[test]
    fn test_partial_record_on_bounds_violation() {
        let mut bytes = attributes_response(6, &[(1, b"Kept")]);
        // Append an entry whose declared length runs past the buffer.
        bytes.extend_from_slice(&[3, 255, 255, b'x']);
        let response = expect_response(decode_data_source(&bytes));

        assert_eq!(response.notification.title, "Kept");
        assert_eq!(response.notification.message, "");
        assert!(response.truncated);
    }

    #[test]
    fn test_other_commands_identified() {
        assert_eq!(decode_data_source(&[1, 0, 0]), Some(DataSource::AppAttributes));
        assert_eq!(decode_data_source(&[2]), Some(DataSource::NotificationAction));
        assert_eq!(decode_data_source(&[0x42]), Some(DataSource::Unknown(0x42)));
    }

    #[test]
    fn test_short_payloads_dropped() {
        assert_eq!(decode_data_source(&[]), None);
        // Command id present but the UID cut short.
        assert_eq!(decode_data_source(&[0]), None);
        assert_eq!(decode_data_source(&[0, 7, 0, 0]), None);
    }

    #[test]
    fn test_empty_attribute_stream() {
        let bytes = attributes_response(8, &[]);
        let response = expect_response(decode_data_source(&bytes));

        assert_eq!(response.uid, 8);
        assert_eq!(response.notification, Notification::default());
        assert!(!response.truncated);
    }

    proptest! {
        #[test]
        fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let _ = decode_data_source(&bytes);
        }

        #[test]
        fn decoded_fields_always_within_capacity(
            title in proptest::collection::vec(any::<u8>(), 0..200),
            message in proptest::collection::vec(any::<u8>(), 0..200),
        ) {
            let bytes = attributes_response(1, &[(1, &title), (3, &message)]);
            let response = expect_response(decode_data_source(&bytes));
            prop_assert!(response.notification.title.len() <= TITLE_CAPACITY);
            prop_assert!(response.notification.message.len() <= MESSAGE_CAPACITY);
        }
    }
}
