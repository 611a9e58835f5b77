//! Enumerations referenced by decoded fields.
//!
//! Each enumeration has a single fallible constructor, [`TryFrom<u8>`], which
//! rejects raw values outside its domain with [`UnknownValue`].

use core::fmt;

use thiserror::Error;
use zerocopy::TryFromBytes;

/// A raw value outside an enumeration's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unknown raw value (0x{0:02X}).")]
pub struct UnknownValue(pub u8);

macro_rules! try_from_raw {
    ($($t:ident),*) => {
        $(
            impl TryFrom<u8> for $t {
                type Error = UnknownValue;

                fn try_from(raw: u8) -> Result<Self, Self::Error> {
                    zerocopy::try_transmute!(raw).map_err(|_| UnknownValue(raw))
                }
            }

            impl From<$t> for u8 {
                fn from(value: $t) -> Self {
                    value as u8
                }
            }
        )*
    };
}

try_from_raw!(PodProgress, DeliveryStatus);

/// Lifecycle state of a pod.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, TryFromBytes)]
pub enum PodProgress {
    Initialized = 0,
    MemoryInitialized = 1,
    ReminderInitialized = 2,
    PairingCompleted = 3,
    Priming = 4,
    PrimingCompleted = 5,
    BasalInitialized = 6,
    InsertingCannula = 7,
    AboveFiftyUnits = 8,
    FiftyOrLessUnits = 9,
    OneNotUsedButIn33 = 10,
    TwoNotUsedButIn33 = 11,
    ThreeNotUsedButIn33 = 12,
    FaultEventOccurred = 13,
    ActivationTimeExceeded = 14,
    Inactive = 15,
}

impl PodProgress {
    /// Whether the pod is activated and able to deliver insulin.
    pub fn ready_for_delivery(self) -> bool {
        (Self::AboveFiftyUnits..=Self::ThreeNotUsedButIn33).contains(&self)
    }

    /// Whether the pod has stopped because of a fault or expiry.
    pub fn is_faulted(self) -> bool {
        matches!(self, Self::FaultEventOccurred | Self::ActivationTimeExceeded)
    }
}

impl fmt::Display for PodProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Initialized => "initialized",
            Self::MemoryInitialized => "memory initialized",
            Self::ReminderInitialized => "reminder initialized",
            Self::PairingCompleted => "pairing completed",
            Self::Priming => "priming",
            Self::PrimingCompleted => "priming completed",
            Self::BasalInitialized => "basal initialized",
            Self::InsertingCannula => "inserting cannula",
            Self::AboveFiftyUnits => "normal, above 50 U",
            Self::FiftyOrLessUnits => "normal, 50 U or less",
            Self::OneNotUsedButIn33 => "one not used (in 33)",
            Self::TwoNotUsedButIn33 => "two not used (in 33)",
            Self::ThreeNotUsedButIn33 => "three not used (in 33)",
            Self::FaultEventOccurred => "fault event occurred",
            Self::ActivationTimeExceeded => "activation time exceeded",
            Self::Inactive => "inactive",
        };

        write!(f, "{s} ({})", *self as u8)
    }
}

/// Delivery state of a pod.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromBytes)]
pub enum DeliveryStatus {
    Suspended = 0,
    ScheduledBasal = 1,
    TempBasalRunning = 2,
    Priming = 4,
    BolusInProgress = 5,
    BolusAndTempBasal = 6,
    ExtendedBolusRunning = 9,
    ExtendedBolusAndTempBasal = 10,
}

impl DeliveryStatus {
    /// Whether all delivery is suspended.
    pub fn is_suspended(self) -> bool {
        self == Self::Suspended
    }

    /// Whether an immediate or extended bolus is running.
    pub fn is_bolusing(self) -> bool {
        matches!(
            self,
            Self::BolusInProgress
                | Self::BolusAndTempBasal
                | Self::ExtendedBolusRunning
                | Self::ExtendedBolusAndTempBasal
        )
    }

    /// Whether a temporary basal is running.
    pub fn is_temp_basal_running(self) -> bool {
        matches!(
            self,
            Self::TempBasalRunning | Self::BolusAndTempBasal | Self::ExtendedBolusAndTempBasal
        )
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Suspended => "suspended",
            Self::ScheduledBasal => "scheduled basal",
            Self::TempBasalRunning => "temp basal running",
            Self::Priming => "priming",
            Self::BolusInProgress => "bolus in progress",
            Self::BolusAndTempBasal => "bolus and temp basal",
            Self::ExtendedBolusRunning => "extended bolus running",
            Self::ExtendedBolusAndTempBasal => "extended bolus and temp basal",
        };

        write!(f, "{s} ({})", *self as u8)
    }
}

/// One of the eight alert slots a pod can be programmed with.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlertSlot {
    Slot0 = 0,
    Slot1 = 1,
    Slot2 = 2,
    Slot3 = 3,
    Slot4 = 4,
    Slot5 = 5,
    Slot6 = 6,
    Slot7 = 7,
}

impl AlertSlot {
    /// Every slot, lowest first.
    pub const ALL: [Self; 8] = [
        Self::Slot0,
        Self::Slot1,
        Self::Slot2,
        Self::Slot3,
        Self::Slot4,
        Self::Slot5,
        Self::Slot6,
        Self::Slot7,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// A set of alert slots, one bit per slot.
///
/// Every raw byte is a valid set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AlertSet(u8);

impl AlertSet {
    /// The set as its raw bitmask.
    pub fn raw(self) -> u8 {
        self.0
    }

    /// Whether no slot is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether a slot is set.
    pub fn contains(self, slot: AlertSlot) -> bool {
        self.0 & slot.bit() != 0
    }

    /// Iterate over the slots in the set, lowest first.
    pub fn iter(self) -> impl Iterator<Item = AlertSlot> {
        AlertSlot::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

impl From<u8> for AlertSet {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

impl fmt::Display for AlertSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }

        for (i, slot) in self.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "slot{}", slot as u8)?;
        }

        Ok(())
    }
}

macro_rules! fault_types {
    ($($name:ident = $($raw:literal)|+ => $desc:literal,)*) => {
        /// Classification of a pod fault code.
        ///
        /// Raw codes without a known meaning classify as
        /// [`FaultType::Unknown`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum FaultType {
            $($name,)*
            Unknown,
        }

        impl FaultType {
            fn classify(raw: u8) -> Self {
                match raw {
                    $($($raw)|+ => Self::$name,)*
                    _ => Self::Unknown,
                }
            }

            /// A short English description of the fault.
            pub fn description(self) -> &'static str {
                match self {
                    $(Self::$name => $desc,)*
                    Self::Unknown => "unknown fault",
                }
            }
        }
    };
}

fault_types! {
    NoFaults = 0x00 => "no faults",
    FailedFlashErase = 0x01 => "flash erase failed",
    FailedFlashStore = 0x02 => "flash store failed",
    TableCorruptionBasalSubcommand = 0x03 => "basal subcommand table corruption",
    CorruptionByte720 = 0x05 => "corruption in byte 720",
    CorruptionInWord129 = 0x06 => "corruption in word 129",
    TableCorruptionBolusSubcommand = 0x07 => "bolus subcommand table corruption",
    TableCorruptionTempBasalSubcommand = 0x08 => "temp basal subcommand table corruption",
    ResetDueToCop = 0x0D => "reset due to COP",
    ResetDueToIllegalOpcode = 0x0E => "reset due to illegal opcode",
    ResetDueToIllegalAddress = 0x0F => "reset due to illegal address",
    ResetDueToSawCop = 0x10 => "reset due to SAW COP",
    ResetDueToLvd = 0x12 => "reset due to low voltage detect",
    MessageLengthTooLong = 0x13 => "message length too long",
    Occluded = 0x14 | 0x44 => "occlusion detected",
    ReservoirEmpty = 0x18 => "reservoir empty",
    ExceededMaximumPodLife80Hrs = 0x1C => "exceeded maximum pod life of 80 hours",
    BadTimerVariableState = 0x21 => "bad timer variable state",
    ProblemCalibrateTimer = 0x23 => "problem calibrating timer",
    RtcInterruptHandlerUnexpectedCall = 0x26 => "unexpected RTC interrupt",
    AutoOff0 = 0x28 => "auto-off 0",
    AutoOff1 = 0x29 => "auto-off 1",
    AutoOff2 = 0x2A => "auto-off 2",
    AutoOff3 = 0x2B => "auto-off 3",
    AutoOff4 = 0x2C => "auto-off 4",
    AutoOff5 = 0x2D => "auto-off 5",
    AutoOff6 = 0x2E => "auto-off 6",
    AutoOff7 = 0x2F => "auto-off 7",
    InsulinDeliveryCommandError = 0x31 => "insulin delivery command error",
    DisableFlashSecurityFailed = 0x39 => "disabling flash security failed",
    TrimIcsTooCloseTo0x1FF = 0x4B => "trim ICS too close to 0x1FF",
    ProblemFindingBestTrimValue = 0x4C => "problem finding best trim value",
    BadSetTpm1MultiCasesValue = 0x4D => "bad TPM1 multi-case value",
    BleTimeout = 0xA0 => "BLE timeout",
    BleInitiated = 0xA1 => "BLE initiated",
    BleUnknownAlarm = 0xA2 => "BLE unknown alarm",
    BleIaas = 0xA3 => "BLE IAAS",
    BleCrcFailure = 0xA4 => "BLE CRC failure",
    BleWatchdogPingTimeout = 0xA5 => "BLE watchdog ping timeout",
    BleExcessiveResets = 0xA6 => "BLE excessive resets",
    BleNakError = 0xA7 => "BLE NAK error",
    BleRequestHighTimeout = 0xA8 => "BLE request high timeout",
    BleUnknownResponse = 0xA9 => "BLE unknown response",
    BleRequestStuckHigh = 0xAA => "BLE request stuck high",
    BleStateMachine1 = 0xAB => "BLE state machine 1",
    BleStateMachine2 = 0xAC => "BLE state machine 2",
    BleArbitrationLost = 0xAD => "BLE arbitration lost",
    BleDualNack = 0xAE => "BLE dual NACK",
    BleQueueExceededMaxRetry = 0xAF => "BLE queue exceeded maximum retries",
    BleQueueCriticalVariableFail = 0xB0 => "BLE queue critical variable failure",
}

/// A raw fault code together with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaultEventCode {
    raw: u8,
    fault_type: FaultType,
}

impl FaultEventCode {
    /// The fault code as received.
    pub fn raw(self) -> u8 {
        self.raw
    }

    /// The classification of the fault code.
    pub fn fault_type(self) -> FaultType {
        self.fault_type
    }
}

impl From<u8> for FaultEventCode {
    fn from(raw: u8) -> Self {
        Self {
            raw,
            fault_type: FaultType::classify(raw),
        }
    }
}

impl fmt::Display for FaultEventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fault {:03} (0x{:02X}): {}",
            self.raw,
            self.raw,
            self.fault_type.description()
        )
    }
}
