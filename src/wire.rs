//! Byte layout of a detailed status record.
//!
//! A record is a fixed 21-byte head, optionally followed by vendor bytes which
//! are preserved but never interpreted. Multi-byte integers are big-endian.
//!
//! | Offset | Content |
//! |---|---|
//! | 0 | message type |
//! | 1 | pod progress |
//! | 2 | delivery status (low nibble) |
//! | 3–4 | bolus not delivered (10 bits, pulses) |
//! | 5 | last command sequence number |
//! | 6–7 | total delivered (pulses) |
//! | 8 | fault code |
//! | 9–10 | fault time since activation (minutes, `0xFFFF` if none) |
//! | 11–12 | reservoir level (10 bits, pulses) |
//! | 13–14 | time active (minutes) |
//! | 15 | unacknowledged alerts |
//! | 16 | table access fault (bit 1) |
//! | 17 | error event info (`0x00` if none) |
//! | 18 | receiver low gain (bits 6–7), radio RSSI (bits 0–5) |
//! | 19 | previous pod progress (low nibble, `0xFF` if none) |
//! | 20 | reserved |

use tartan_bitfield::bitfield;
use zerocopy::FromBytes;

/// Length of the fixed head of a record.
pub const HEAD_LEN: usize = 21;

/// Offset of the error event byte.
pub const ERROR_EVENT: usize = 17;

/// Fault time value meaning no fault has occurred.
pub const NO_FAULT_TIME: u16 = 0xFFFF;

/// Error event value meaning no event was recorded.
pub const NO_ERROR_EVENT: u8 = 0x00;

/// Previous progress value meaning no previous state was recorded.
pub const NO_PREVIOUS_PROGRESS: u8 = 0xFF;

/// The fixed head of a record, field by field.
#[repr(C, packed)]
#[derive(FromBytes)]
pub(crate) struct Head {
    pub message_type: u8,
    pub progress: u8,
    pub delivery: u8,
    pub bolus_not_delivered: [u8; 2],
    pub sequence: u8,
    pub total_delivered: [u8; 2],
    pub fault_code: u8,
    pub fault_time: [u8; 2],
    pub reservoir: [u8; 2],
    pub time_active: [u8; 2],
    pub alerts: u8,
    pub table_access: u8,
    pub error_event: u8,
    pub radio: u8,
    pub previous_progress: u8,
    pub _reserved: u8,
}

impl Head {
    /// Split a record into its head and trailing bytes.
    ///
    /// Returns `None` if the record is shorter than [`HEAD_LEN`].
    pub fn split(r: &[u8]) -> Option<(Self, &[u8])> {
        Self::read_from_prefix(r).ok()
    }
}

/// Read the byte at an offset, if present.
pub fn read_u8(r: &[u8], offset: usize) -> Option<u8> {
    r.get(offset).copied()
}

/// Read the big-endian word at an offset, if present.
pub fn read_u16(r: &[u8], offset: usize) -> Option<u16> {
    let word = r.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_be_bytes([word[0], word[1]]))
}

/// Read a big-endian word.
pub fn word(r: [u8; 2]) -> u16 {
    u16::from_be_bytes(r)
}

/// Read a 10-bit pulse count from a big-endian word, ignoring the upper six
/// bits.
pub fn ten_bit(r: [u8; 2]) -> u16 {
    bitfield! {
        struct TenBit(u16) {
            [0..10] value: u16,
        }
    }

    TenBit(word(r)).value()
}

/// Extract the low nibble of a byte.
pub fn low_nibble(r: u8) -> u8 {
    bitfield! {
        struct Nibbles(u8) {
            [0..4] low: u8,
        }
    }

    Nibbles(r).low()
}

/// Extract the table access fault flag.
pub fn table_access_fault(r: u8) -> bool {
    bitfield! {
        struct TableAccess(u8) {
            [1] fault,
        }
    }

    TableAccess(r).fault()
}

/// Extract the receiver low gain and radio RSSI, in that order.
pub fn radio(r: u8) -> (u8, u8) {
    bitfield! {
        struct Radio(u8) {
            [0..6] rssi: u8,
            [6..8] low_gain: u8,
        }
    }

    let radio = Radio(r);
    (radio.low_gain(), radio.rssi())
}
