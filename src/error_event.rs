//! Sub-decoder for the error event byte.

use tartan_bitfield::bitfield;

use crate::{
    enums::PodProgress,
    status::{Error, Field},
};

/// Details of the most recent error event, from byte 17 of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorEventInfo {
    insulin_state_table_corruption: bool,
    occlusion_type: u8,
    immediate_bolus_in_progress: bool,
    pod_progress: PodProgress,
}

impl ErrorEventInfo {
    /// Decode an error event byte.
    ///
    /// The caller is responsible for treating `0x00` as "no event"; this
    /// decodes every byte it is given.
    pub fn decode(r: u8) -> Result<Self, Error> {
        bitfield! {
            struct ErrorEvent(u8) {
                [0..4] pod_progress: u8,
                [4] immediate_bolus_in_progress,
                [5..7] occlusion_type: u8,
                [7] insulin_state_table_corruption,
            }
        }

        let event = ErrorEvent(r);

        let pod_progress = PodProgress::try_from(event.pod_progress())
            .map_err(|_| Error::unknown(Field::ErrorEventProgress, r))?;

        Ok(Self {
            insulin_state_table_corruption: event.insulin_state_table_corruption(),
            occlusion_type: event.occlusion_type(),
            immediate_bolus_in_progress: event.immediate_bolus_in_progress(),
            pod_progress,
        })
    }

    /// Whether the pod detected corruption of its insulin state table.
    pub fn insulin_state_table_corruption(&self) -> bool {
        self.insulin_state_table_corruption
    }

    /// The two-bit occlusion category.
    pub fn occlusion_type(&self) -> u8 {
        self.occlusion_type
    }

    /// Whether an immediate bolus was running when the event occurred.
    pub fn immediate_bolus_in_progress(&self) -> bool {
        self.immediate_bolus_in_progress
    }

    /// Pod progress at the time of the event.
    pub fn pod_progress(&self) -> PodProgress {
        self.pod_progress
    }
}
