//! Cooperative awareness: message model, generation triggering and the
//! service that ties them to a vehicle.

pub mod generate;
pub mod logger;
pub mod message;
pub mod service;
pub mod trigger;
pub mod values;
pub mod vehicle;

pub use generate::{attach_low_frequency, build_cam};
pub use logger::CamLog;
pub use message::AwarenessMessage;
pub use service::{CaService, CaServiceConfig, CamListener};
pub use trigger::{CamTrigger, SendPlan, TriggerConfig, TriggerReason};
pub use vehicle::{RateControl, VehicleState};

use thiserror::Error;

/// Errors raised while assembling or emitting a CAM.
#[derive(Debug, Error)]
pub enum CamError {
    /// A message field fell outside its permitted range.
    ///
    /// The value converters clamp or sentinel everything the standard cannot
    /// represent, so this surfacing at runtime indicates a construction bug
    /// rather than bad input data.
    #[error("invalid message field: {0}")]
    Invalid(String),

    /// Writing to the emission log failed.
    #[error("emission log write failed")]
    Log(#[from] std::io::Error),
}
