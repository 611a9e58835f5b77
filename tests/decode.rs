use std::num::NonZeroU16;

use assert2::{assert, let_assert};
use podstatus::{
    DetailedStatus, Error, Field, PodConstants,
    enums::{AlertSlot, DeliveryStatus, FaultType, PodProgress},
};

mod common;

use common::{HEALTHY, patched};

#[test]
fn decode_healthy() {
    let_assert!(Ok(status) = DetailedStatus::decode(&HEALTHY));

    assert!(status.message_type() == 0x02);
    assert!(status.progress_status() == PodProgress::AboveFiftyUnits);
    assert!(status.delivery_status() == DeliveryStatus::ScheduledBasal);
    assert!(status.bolus_not_delivered_pulses() == 0);
    assert!(status.last_command_sequence_number() == 5);
    assert!(status.total_insulin_delivered_pulses() == 360);
    assert!(status.total_insulin_delivered() == 18.0);
    assert!(status.fault_event_code().fault_type() == FaultType::NoFaults);
    assert!(status.fault_time_since_activation() == None);
    assert!(status.reservoir_level() == Some(5.5));
    assert!(status.time_active().minutes() == 130);
    assert!(status.unacknowledged_alerts().is_empty());
    assert!(!status.fault_accessing_tables());
    assert!(status.error_event_info() == None);
    assert!(status.receiver_low_gain() == 0);
    assert!(status.radio_rssi() == 42);
    assert!(status.previous_progress_status() == None);

    assert!(!status.fault_is_present());
    assert!(status.reference_code() == None);
}

#[test]
fn decode_short_records() {
    for length in 0..21 {
        let_assert!(Err(e) = DetailedStatus::decode(&HEALTHY[..length]));
        assert!(e == Error::InsufficientData { length });
    }
}

#[test]
fn decode_preserves_raw_bytes() {
    let_assert!(Ok(status) = DetailedStatus::decode(&HEALTHY));
    assert!(status.raw() == &HEALTHY[..]);
    assert!(status.trailing().is_empty());

    let mut long = HEALTHY.to_vec();
    long.extend_from_slice(&[0x81, 0x00, 0xFE]);

    let_assert!(Ok(status) = DetailedStatus::decode(&long));
    assert!(status.raw() == &long[..]);
    assert!(status.trailing() == &[0x81u8, 0x00, 0xFE][..]);
}

#[test]
fn decode_unknown_progress() {
    let r = patched(&[(1, 0x10)]);
    let_assert!(Err(e) = DetailedStatus::decode(&r));
    assert!(
        e == Error::UnknownEnumValue {
            field: Field::ProgressStatus,
            raw: 0x10
        }
    );
}

#[test]
fn decode_delivery_low_nibble() {
    let r = patched(&[(2, 0xF6)]);
    let_assert!(Ok(status) = DetailedStatus::decode(&r));
    assert!(status.delivery_status() == DeliveryStatus::BolusAndTempBasal);
    assert!(status.delivery_status().is_bolusing());
    assert!(status.delivery_status().is_temp_basal_running());

    let r = patched(&[(2, 0x03)]);
    let_assert!(Err(e) = DetailedStatus::decode(&r));
    assert!(
        e == Error::UnknownEnumValue {
            field: Field::DeliveryStatus,
            raw: 0x03
        }
    );

    // The error carries the byte as received, not the masked nibble.
    let r = patched(&[(2, 0xF3)]);
    let_assert!(Err(e) = DetailedStatus::decode(&r));
    assert!(
        e == Error::UnknownEnumValue {
            field: Field::DeliveryStatus,
            raw: 0xF3
        }
    );
}

#[test]
fn decode_ten_bit_fields() {
    // Upper six bits of both words are ignored.
    let r = patched(&[(3, 0xFD), (4, 0x14), (11, 0xFC), (12, 0x6E)]);
    let_assert!(Ok(status) = DetailedStatus::decode(&r));
    assert!(status.bolus_not_delivered_pulses() == 0x114);
    assert!(status.reservoir_level_pulses() == Some(110));
}

#[test]
fn decode_reservoir_threshold() {
    let r = patched(&[(11, 0x03), (12, 0xE8)]);
    let_assert!(Ok(status) = DetailedStatus::decode(&r));
    assert!(status.reservoir_level() == Some(50.0));

    let r = patched(&[(11, 0x03), (12, 0xE9)]);
    let_assert!(Ok(status) = DetailedStatus::decode(&r));
    assert!(status.reservoir_level() == None);

    let r = patched(&[(11, 0x03), (12, 0xFF)]);
    let_assert!(Ok(status) = DetailedStatus::decode(&r));
    assert!(status.reservoir_level() == None);
}

#[test]
fn decode_fault_time() {
    let r = patched(&[(8, 0x14), (9, 0x01), (10, 0x02)]);
    let_assert!(Ok(status) = DetailedStatus::decode(&r));
    let_assert!(Some(time) = status.fault_time_since_activation());
    assert!(time.minutes() == 258);

    let r = patched(&[(9, 0x00), (10, 0x00)]);
    let_assert!(Ok(status) = DetailedStatus::decode(&r));
    assert!(status.fault_time_since_activation().map(|t| t.minutes()) == Some(0));
}

#[test]
fn decode_error_event() {
    let r = patched(&[(17, 0x7B)]);
    let_assert!(Ok(status) = DetailedStatus::decode(&r));
    let_assert!(Some(event) = status.error_event_info());
    assert!(!event.insulin_state_table_corruption());
    assert!(event.occlusion_type() == 3);
    assert!(event.immediate_bolus_in_progress());
    assert!(event.pod_progress() == PodProgress::TwoNotUsedButIn33);

    let r = patched(&[(17, 0x80)]);
    let_assert!(Ok(status) = DetailedStatus::decode(&r));
    let_assert!(Some(event) = status.error_event_info());
    assert!(event.insulin_state_table_corruption());
    assert!(event.occlusion_type() == 0);
    assert!(!event.immediate_bolus_in_progress());
    assert!(event.pod_progress() == PodProgress::Initialized);
}

#[test]
fn decode_previous_progress() {
    let r = patched(&[(19, 0x09)]);
    let_assert!(Ok(status) = DetailedStatus::decode(&r));
    assert!(status.previous_progress_status() == Some(PodProgress::FiftyOrLessUnits));

    // Only the low nibble is meaningful.
    let r = patched(&[(19, 0xF9)]);
    let_assert!(Ok(status) = DetailedStatus::decode(&r));
    assert!(status.previous_progress_status() == Some(PodProgress::FiftyOrLessUnits));
}

#[test]
fn decode_flags_and_radio() {
    let r = patched(&[(15, 0x82), (16, 0x02), (18, 0xEA)]);
    let_assert!(Ok(status) = DetailedStatus::decode(&r));

    let alerts = status.unacknowledged_alerts();
    assert!(alerts.iter().collect::<Vec<_>>() == [AlertSlot::Slot1, AlertSlot::Slot7]);
    assert!(alerts.to_string() == "slot1, slot7");

    assert!(status.fault_accessing_tables());
    assert!(status.receiver_low_gain() == 3);
    assert!(status.radio_rssi() == 42);

    let r = patched(&[(16, 0xFD)]);
    let_assert!(Ok(status) = DetailedStatus::decode(&r));
    assert!(!status.fault_accessing_tables());
}

#[test]
fn decode_with_constants() {
    let constants = PodConstants {
        pulses_per_unit: NonZeroU16::new(10).unwrap(),
        maximum_reservoir_pulses: 100,
    };

    let_assert!(Ok(status) = DetailedStatus::decode_with(&HEALTHY, constants));
    assert!(status.total_insulin_delivered() == 36.0);
    assert!(status.reservoir_level() == None);
    assert!(status.constants() == constants);
}

#[test]
fn fault_presence() {
    let r = patched(&[(1, 0x0E)]);
    let_assert!(Ok(status) = DetailedStatus::decode(&r));
    assert!(status.fault_is_present());
    assert!(status.reference_code() == None);

    let r = patched(&[(1, 0x0D), (8, 0x14)]);
    let_assert!(Ok(status) = DetailedStatus::decode(&r));
    assert!(status.fault_is_present());
    assert!(status.progress_status().is_faulted());
}
