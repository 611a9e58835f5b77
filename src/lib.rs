#![no_std]

//! A decoder for the detailed status record reported by Omnipod-style insulin
//! pumps.
//!
//! The detailed status is the richest diagnostic payload a pod produces. It is
//! returned on explicit status queries and whenever the pod has faulted, and
//! reports progress and delivery state, fault information, dosing totals and
//! radio link quality.
//!
//! Most users should begin with [`DetailedStatus::decode`], then ask the record
//! for a [`reference_code`](DetailedStatus::reference_code) or render it as a
//! [`Report`].
//!
//! ```
//! let status = podstatus::DetailedStatus::decode(&bytes)?;
//!
//! if let Some(code) = status.reference_code() {
//!     println!("{code}");
//! }
//! ```
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable `String` conveniences (default).
//! - `log`: trace decoding through the `log` crate.

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod log;

pub mod config;
pub mod enums;
pub mod error_event;
pub mod reference;
pub mod report;
pub mod status;
pub mod wire;

pub use config::PodConstants;
pub use error_event::ErrorEventInfo;
pub use reference::ReferenceCode;
pub use report::{ActiveTime, Report};
pub use status::{DetailedStatus, Error, Field};
