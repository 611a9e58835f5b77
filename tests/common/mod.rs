#![allow(dead_code)]

/// A healthy pod: normal progress, scheduled basal, 18 U delivered, 5.5 U
/// remaining, active for 2:10, no fault, no error event, no previous
/// progress.
pub const HEALTHY: [u8; 21] = [
    0x02, // message type
    0x08, // progress: above fifty units
    0x01, // delivery: scheduled basal
    0x00, 0x00, // bolus not delivered
    0x05, // sequence number
    0x01, 0x68, // total delivered: 360 pulses
    0x00, // fault code
    0xFF, 0xFF, // fault time
    0x00, 0x6E, // reservoir: 110 pulses
    0x00, 0x82, // time active: 130 minutes
    0x00, // alerts
    0x00, // table access
    0x00, // error event
    0x2A, // radio
    0xFF, // previous progress
    0x00, // reserved
];

/// Copy the healthy record, patching bytes at the given offsets.
pub fn patched(patches: &[(usize, u8)]) -> [u8; 21] {
    let mut r = HEALTHY;
    for &(i, b) in patches {
        r[i] = b;
    }
    r
}

/// Decode a string of hexadecimal digit pairs.
pub fn hex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}
