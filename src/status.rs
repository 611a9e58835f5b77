//! Decoder for the detailed status record.

use core::fmt;

use thiserror::Error;

use crate::{
    config::PodConstants,
    enums::{AlertSet, DeliveryStatus, FaultEventCode, FaultType, PodProgress},
    error_event::ErrorEventInfo,
    report::ActiveTime,
    wire::{self, HEAD_LEN, Head},
};

/// Errors occurring while decoding a record.
///
/// Decoding is all-or-nothing: no partial record is produced on error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The record is shorter than its fixed head.
    #[error("Insufficient data ({length} of 21 bytes).")]
    InsufficientData { length: usize },
    /// A field held a value outside its enumeration.
    ///
    /// `raw` is the whole byte as received, including any bits the field
    /// does not occupy.
    #[error("Unknown value for {field} (0x{raw:02X}).")]
    UnknownEnumValue { field: Field, raw: u8 },
}

impl Error {
    pub(crate) fn unknown(field: Field, raw: u8) -> Self {
        debug!("unknown value for {}: 0x{:02X}", field, raw);
        Self::UnknownEnumValue { field, raw }
    }
}

/// A record field holding an enumerated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ProgressStatus,
    DeliveryStatus,
    PreviousProgressStatus,
    ErrorEventProgress,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ProgressStatus => "progress status",
            Self::DeliveryStatus => "delivery status",
            Self::PreviousProgressStatus => "previous progress status",
            Self::ErrorEventProgress => "error event progress",
        })
    }
}

/// A decoded detailed status record.
///
/// Pulse counts are kept as received; unit accessors scale them by the
/// [`PodConstants`] the record was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailedStatus<'a> {
    message_type: u8,
    progress: PodProgress,
    delivery: DeliveryStatus,
    bolus_not_delivered: u16,
    last_sequence_number: u8,
    total_delivered: u16,
    fault: FaultEventCode,
    fault_time: Option<u16>,
    reservoir: Option<u16>,
    time_active: u16,
    alerts: AlertSet,
    fault_accessing_tables: bool,
    error_event: Option<ErrorEventInfo>,
    receiver_low_gain: u8,
    radio_rssi: u8,
    previous_progress: Option<PodProgress>,
    constants: PodConstants,
    raw: &'a [u8],
}

impl<'a> DetailedStatus<'a> {
    /// Decode a record using the default [`PodConstants`].
    pub fn decode(r: &'a [u8]) -> Result<Self, Error> {
        Self::decode_with(r, PodConstants::default())
    }

    /// Decode a record, scaling and bounding values by the given constants.
    pub fn decode_with(r: &'a [u8], constants: PodConstants) -> Result<Self, Error> {
        trace!("decoding detailed status: {:02X?}", r);

        let Some((head, _)) = Head::split(r) else {
            debug!("detailed status too short: {} bytes", r.len());
            return Err(Error::InsufficientData { length: r.len() });
        };

        let progress = PodProgress::try_from(head.progress)
            .map_err(|_| Error::unknown(Field::ProgressStatus, head.progress))?;

        let delivery = DeliveryStatus::try_from(wire::low_nibble(head.delivery))
            .map_err(|_| Error::unknown(Field::DeliveryStatus, head.delivery))?;

        let fault_time = match wire::word(head.fault_time) {
            wire::NO_FAULT_TIME => None,
            minutes => Some(minutes),
        };

        let reservoir = match wire::ten_bit(head.reservoir) {
            pulses if pulses > constants.maximum_reservoir_pulses => {
                trace!("reservoir above threshold: {} pulses", pulses);
                None
            }
            pulses => Some(pulses),
        };

        let error_event = match head.error_event {
            wire::NO_ERROR_EVENT => None,
            r => Some(ErrorEventInfo::decode(r)?),
        };

        let (receiver_low_gain, radio_rssi) = wire::radio(head.radio);

        let previous_progress = match head.previous_progress {
            wire::NO_PREVIOUS_PROGRESS => None,
            r => Some(
                PodProgress::try_from(wire::low_nibble(r))
                    .map_err(|_| Error::unknown(Field::PreviousProgressStatus, r))?,
            ),
        };

        Ok(Self {
            message_type: head.message_type,
            progress,
            delivery,
            bolus_not_delivered: wire::ten_bit(head.bolus_not_delivered),
            last_sequence_number: head.sequence,
            total_delivered: wire::word(head.total_delivered),
            fault: FaultEventCode::from(head.fault_code),
            fault_time,
            reservoir,
            time_active: wire::word(head.time_active),
            alerts: AlertSet::from(head.alerts),
            fault_accessing_tables: wire::table_access_fault(head.table_access),
            error_event,
            receiver_low_gain,
            radio_rssi,
            previous_progress,
            constants,
            raw: r,
        })
    }

    /// The pod-info subtype in byte 0 (`0x02` for a detailed status).
    pub fn message_type(&self) -> u8 {
        self.message_type
    }

    /// Current lifecycle state of the pod.
    pub fn progress_status(&self) -> PodProgress {
        self.progress
    }

    /// What the pod is currently delivering.
    pub fn delivery_status(&self) -> DeliveryStatus {
        self.delivery
    }

    /// Insulin of the last bolus not delivered, in units.
    pub fn bolus_not_delivered(&self) -> f64 {
        self.constants.units(self.bolus_not_delivered)
    }

    /// Pulses of the last bolus not delivered.
    pub fn bolus_not_delivered_pulses(&self) -> u16 {
        self.bolus_not_delivered
    }

    /// Sequence number of the last command the pod processed.
    pub fn last_command_sequence_number(&self) -> u8 {
        self.last_sequence_number
    }

    /// Insulin delivered since activation, in units.
    pub fn total_insulin_delivered(&self) -> f64 {
        self.constants.units(self.total_delivered)
    }

    /// Pulses delivered since activation.
    pub fn total_insulin_delivered_pulses(&self) -> u16 {
        self.total_delivered
    }

    /// The fault code and its classification.
    pub fn fault_event_code(&self) -> FaultEventCode {
        self.fault
    }

    /// Time from activation to the fault, if one has occurred.
    pub fn fault_time_since_activation(&self) -> Option<ActiveTime> {
        self.fault_time.map(ActiveTime::from_minutes)
    }

    /// Insulin remaining, in units, or `None` if above what the reservoir
    /// sensor can measure.
    pub fn reservoir_level(&self) -> Option<f64> {
        self.reservoir.map(|p| self.constants.units(p))
    }

    /// Pulses remaining, or `None` if above the sensor's range.
    pub fn reservoir_level_pulses(&self) -> Option<u16> {
        self.reservoir
    }

    /// Time since activation.
    pub fn time_active(&self) -> ActiveTime {
        ActiveTime::from_minutes(self.time_active)
    }

    /// Alerts raised but not yet acknowledged.
    pub fn unacknowledged_alerts(&self) -> AlertSet {
        self.alerts
    }

    /// Whether the pod faulted while reading its internal tables.
    pub fn fault_accessing_tables(&self) -> bool {
        self.fault_accessing_tables
    }

    /// The most recent error event, if one was recorded.
    pub fn error_event_info(&self) -> Option<ErrorEventInfo> {
        self.error_event
    }

    /// The two-bit receiver low gain.
    pub fn receiver_low_gain(&self) -> u8 {
        self.receiver_low_gain
    }

    /// The six-bit received signal strength.
    pub fn radio_rssi(&self) -> u8 {
        self.radio_rssi
    }

    /// Pod progress before the current state, if recorded.
    pub fn previous_progress_status(&self) -> Option<PodProgress> {
        self.previous_progress
    }

    /// The constants the record was decoded with.
    pub fn constants(&self) -> PodConstants {
        self.constants
    }

    /// The record exactly as supplied to the decoder.
    pub fn raw(&self) -> &'a [u8] {
        self.raw
    }

    /// Bytes following the fixed head, uninterpreted.
    pub fn trailing(&self) -> &'a [u8] {
        &self.raw[HEAD_LEN..]
    }

    /// Whether the pod reports a fault.
    ///
    /// An exceeded activation time counts as a fault even when the fault code
    /// is clear.
    pub fn fault_is_present(&self) -> bool {
        self.fault.fault_type() != FaultType::NoFaults
            || self.progress == PodProgress::ActivationTimeExceeded
    }

    /// Alias of [`fault_is_present`](Self::fault_is_present).
    pub fn is_faulted(&self) -> bool {
        self.fault_is_present()
    }
}
