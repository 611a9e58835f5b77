//! Fault classification and PDM-style reference codes.
//!
//! A reference code has the shape `Ref: TT-VVVHH-IIIRR-FFF`, where `TT`
//! selects the category of fault, `VVV` is the raw error event byte, `HH` the
//! hour of day the pod has been active for, `III` the whole units delivered,
//! `RR` the whole units remaining (51 meaning "more than 50") and `FFF` the
//! raw fault code. The separator after the label is a non-breaking space.

use core::fmt;

use either::Either::{self, Left, Right};

use crate::{enums::FaultType, status::DetailedStatus, wire};

/// Label preceding every reference code.
pub const LABEL: &str = "Ref";

/// `RR` value reported when the reservoir is above the sensor's range.
pub const RESERVOIR_ABOVE_THRESHOLD: u8 = 51;

/// Reference category, the `TT` field of a reference code.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Ram = 1,
    Clock = 4,
    InsulinDeliveryCommand = 11,
    Communications = 15,
    Occlusion = 17,
    ReservoirEmpty = 18,
    AutoOff = 19,
    PodExpired = 20,
    PumpError = 49,
}

impl Category {
    /// The two-digit `TT` value shown by the PDM.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// How a fault type is rendered as a reference code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub category: Category,
    /// Report `VVV` and `FFF` as zero.
    pub clear_event_and_fault: bool,
}

impl Template {
    const fn of(category: Category) -> Self {
        Self {
            category,
            clear_event_and_fault: false,
        }
    }
}

/// Select how a fault type is rendered.
///
/// Returns `None` for [`FaultType::NoFaults`], a fixed string where the fault
/// always carries the same reference, and a template otherwise.
pub fn policy(fault_type: FaultType) -> Option<Either<&'static str, Template>> {
    use FaultType::*;

    let template = match fault_type {
        NoFaults => return None,
        InsulinDeliveryCommandError => return Some(Left("11-144-0018-00049")),
        FailedFlashErase
        | FailedFlashStore
        | TableCorruptionBasalSubcommand
        | CorruptionByte720
        | CorruptionInWord129
        | DisableFlashSecurityFailed => Template::of(Category::Ram),
        BadTimerVariableState
        | ProblemCalibrateTimer
        | RtcInterruptHandlerUnexpectedCall
        | TrimIcsTooCloseTo0x1FF
        | ProblemFindingBestTrimValue
        | BadSetTpm1MultiCasesValue => Template::of(Category::Clock),
        ReservoirEmpty => Template::of(Category::ReservoirEmpty),
        AutoOff0 | AutoOff1 | AutoOff2 | AutoOff3 | AutoOff4 | AutoOff5 | AutoOff6 | AutoOff7 => {
            Template::of(Category::AutoOff)
        }
        ExceededMaximumPodLife80Hrs => Template::of(Category::PodExpired),
        Occluded => Template {
            category: Category::Occlusion,
            clear_event_and_fault: true,
        },
        BleTimeout
        | BleInitiated
        | BleUnknownAlarm
        | BleIaas
        | BleCrcFailure
        | BleWatchdogPingTimeout
        | BleExcessiveResets
        | BleNakError
        | BleRequestHighTimeout
        | BleUnknownResponse
        | BleRequestStuckHigh
        | BleStateMachine1
        | BleStateMachine2
        | BleArbitrationLost
        | BleDualNack
        | BleQueueExceededMaxRetry
        | BleQueueCriticalVariableFail => Template::of(Category::Communications),
        _ => Template::of(Category::PumpError),
    };

    Some(Right(template))
}

/// The numeric fields of a computed reference code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields {
    pub category: Category,
    pub event: u8,
    pub hours: u8,
    pub delivered: u16,
    pub reservoir: u8,
    pub fault: u8,
}

/// A PDM-style reference code for a faulted pod.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceCode(Either<&'static str, Fields>);

impl ReferenceCode {
    /// Derive the reference code for a record, if it reports a fault code.
    pub fn of(status: &DetailedStatus<'_>) -> Option<Self> {
        let fault = status.fault_event_code();

        let template = match policy(fault.fault_type())? {
            Left(literal) => return Some(Self(Left(literal))),
            Right(template) => template,
        };

        let constants = status.constants();

        let (event, fault) = if template.clear_event_and_fault {
            (0, 0)
        } else {
            let event = wire::read_u8(status.raw(), wire::ERROR_EVENT).unwrap_or_default();
            (event, fault.raw())
        };

        let hours = status.time_active().hour_of_day() as u8;
        let delivered = constants.whole_units(status.total_insulin_delivered_pulses()) % 1000;
        let reservoir = match status.reservoir_level_pulses() {
            Some(pulses) => (constants.whole_units(pulses) % 100) as u8,
            None => RESERVOIR_ABOVE_THRESHOLD,
        };

        Some(Self(Right(Fields {
            category: template.category,
            event,
            hours,
            delivered,
            reservoir,
            fault,
        })))
    }

    /// The category selected for the fault.
    pub fn category(&self) -> Category {
        match self.0 {
            Left(_) => Category::InsulinDeliveryCommand,
            Right(fields) => fields.category,
        }
    }

    /// The computed fields, or `None` for a fixed reference.
    pub fn fields(&self) -> Option<Fields> {
        self.0.right()
    }
}

impl fmt::Display for ReferenceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{LABEL}:\u{a0}")?;

        match self.0 {
            Left(literal) => f.write_str(literal),
            Right(Fields {
                category,
                event,
                hours,
                delivered,
                reservoir,
                fault,
            }) => write!(
                f,
                "{:02}-{event:03}{hours:02}-{delivered:03}{reservoir:02}-{fault:03}",
                category.code()
            ),
        }
    }
}

impl DetailedStatus<'_> {
    /// The PDM-style reference code, or `None` if the fault code is clear.
    pub fn reference_code(&self) -> Option<ReferenceCode> {
        ReferenceCode::of(self)
    }

    /// The reference code rendered as a string.
    ///
    /// _Requires Cargo feature `std`._
    #[cfg(feature = "std")]
    pub fn reference_string(&self) -> Option<std::string::String> {
        use std::string::ToString;

        self.reference_code().map(|c| c.to_string())
    }
}
