//! Human-readable rendering of decoded records.

use core::fmt;

use crate::{error_event::ErrorEventInfo, status::DetailedStatus};

const MINUTES_PER_HOUR: u16 = 60;
const MINUTES_PER_DAY: u16 = 24 * MINUTES_PER_HOUR;

/// A duration counted in whole minutes, as reported by the pod.
///
/// Displays as `HH:MM`, prefixed with `D day(s) plus` once a day has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ActiveTime(u16);

impl ActiveTime {
    /// A duration of whole minutes.
    pub fn from_minutes(minutes: u16) -> Self {
        Self(minutes)
    }

    /// Total minutes elapsed.
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Whole days elapsed.
    pub fn days(self) -> u16 {
        self.0 / MINUTES_PER_DAY
    }

    /// Hours elapsed within the current day.
    pub fn hour_of_day(self) -> u16 {
        self.0 % MINUTES_PER_DAY / MINUTES_PER_HOUR
    }

    /// Minutes elapsed within the current hour.
    pub fn minute_of_hour(self) -> u16 {
        self.0 % MINUTES_PER_HOUR
    }
}

impl fmt::Display for ActiveTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.days() {
            0 => {}
            1 => f.write_str("1 day plus ")?,
            days => write!(f, "{days} days plus ")?,
        }

        write!(f, "{:02}:{:02}", self.hour_of_day(), self.minute_of_hour())
    }
}

/// A multi-line diagnostic report of a record, one field per line.
#[derive(Debug, Clone, Copy)]
pub struct Report<'s, 'a>(pub &'s DetailedStatus<'a>);

impl fmt::Display for Report<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;

        writeln!(f, "Message type: 0x{:02X}", s.message_type())?;
        writeln!(f, "Pod progress: {}", s.progress_status())?;
        writeln!(f, "Delivery status: {}", s.delivery_status())?;
        writeln!(f, "Bolus not delivered: {:.2} U", s.bolus_not_delivered())?;
        writeln!(f, "Last sequence number: {}", s.last_command_sequence_number())?;
        writeln!(f, "Total delivered: {:.2} U", s.total_insulin_delivered())?;
        writeln!(f, "Fault: {}", s.fault_event_code())?;

        match s.fault_time_since_activation() {
            Some(t) => writeln!(f, "Fault time since activation: {t}")?,
            None => writeln!(f, "Fault time since activation: none")?,
        }

        match s.reservoir_level() {
            Some(units) => writeln!(f, "Reservoir level: {units:.2} U")?,
            None => writeln!(f, "Reservoir level: 50+ U")?,
        }

        writeln!(f, "Time active: {}", s.time_active())?;
        writeln!(f, "Unacknowledged alerts: {}", s.unacknowledged_alerts())?;
        writeln!(f, "Fault accessing tables: {}", s.fault_accessing_tables())?;

        match s.error_event_info() {
            Some(info) => writeln!(f, "Error event info: {}", EventLine(info))?,
            None => writeln!(f, "Error event info: none")?,
        }

        writeln!(f, "Receiver low gain: {}", s.receiver_low_gain())?;
        writeln!(f, "Radio RSSI: {}", s.radio_rssi())?;

        match s.previous_progress_status() {
            Some(p) => writeln!(f, "Previous pod progress: {p}")?,
            None => writeln!(f, "Previous pod progress: none")?,
        }

        if let Some(code) = s.reference_code() {
            writeln!(f, "Reference: {code}")?;
        }

        f.write_str("Raw: ")?;
        for b in s.raw() {
            write!(f, "{b:02x}")?;
        }

        Ok(())
    }
}

struct EventLine(ErrorEventInfo);

impl fmt::Display for EventLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = &self.0;
        write!(
            f,
            "table corruption {}, occlusion type {}, bolus in progress {}, pod progress {}",
            e.insulin_state_table_corruption(),
            e.occlusion_type(),
            e.immediate_bolus_in_progress(),
            e.pod_progress()
        )
    }
}

impl<'a> DetailedStatus<'a> {
    /// A multi-line diagnostic report of this record.
    pub fn report(&self) -> Report<'_, 'a> {
        Report(self)
    }
}
