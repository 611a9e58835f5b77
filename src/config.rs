//! Device constants used to scale and bound decoded values.

use core::num::NonZeroU16;

/// Constants describing the pod's dosing hardware.
///
/// The decoder never computes these; they are properties of the device
/// generation producing the record. [`Default`] matches current pods: a
/// 0.05 U pulse and a reservoir sensor reading at most 50 U.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PodConstants {
    /// Pulses per unit of insulin (the reciprocal of the pulse size).
    pub pulses_per_unit: NonZeroU16,
    /// Highest reservoir reading, in pulses, the pod reports as a level.
    ///
    /// Readings above this mean "more than the sensor can measure".
    pub maximum_reservoir_pulses: u16,
}

impl PodConstants {
    /// Constants for a 0.05 U pulse and a 50 U reservoir sensor.
    pub const DEFAULT: Self = Self {
        pulses_per_unit: NonZeroU16::new(20).unwrap(),
        maximum_reservoir_pulses: 1000,
    };

    /// Size of a single pulse, in units.
    pub fn pulse_size(&self) -> f64 {
        1.0 / f64::from(self.pulses_per_unit.get())
    }

    /// Convert a pulse count to units.
    pub fn units(&self, pulses: u16) -> f64 {
        f64::from(pulses) / f64::from(self.pulses_per_unit.get())
    }

    /// Whole units in a pulse count, truncated.
    pub fn whole_units(&self, pulses: u16) -> u16 {
        pulses / self.pulses_per_unit.get()
    }
}

impl Default for PodConstants {
    fn default() -> Self {
        Self::DEFAULT
    }
}
