//! camlink - Cooperative awareness messaging for V2X simulation
//!
//! This library implements the vehicle-facing side of an ETSI-style V2X
//! stack for use inside a discrete-event traffic simulation: CAM
//! (Cooperative Awareness Message) generation and triggering, a family of
//! pseudonym-change privacy strategies, and a bridge translating messages
//! to the Cohda hardware wire framing over UDP.
//!
//! # Quick Start
//!
//! ```rust
//! use camlink::cam::{CaService, CaServiceConfig};
//! use camlink::cam::message::StationType;
//! use camlink::cam::vehicle::VehicleState;
//! use camlink::time::SimTime;
//!
//! let mut service = CaService::new(CaServiceConfig::default(), SimTime::ZERO);
//! let mut vehicle = VehicleState {
//!     station_id: 1,
//!     vehicle_id: "veh0".into(),
//!     station_type: StationType::PassengerCar,
//!     latitude: 48.74,
//!     longitude: 9.32,
//!     speed: 13.9,
//!     heading: 90.0,
//!     acceleration: 0.0,
//!     yaw_rate: 0.0,
//!     curvature: 0.0,
//!     length: 4.5,
//!     width: 1.8,
//!     tx_range: 300,
//! };
//!
//! // the host calls tick on every update step
//! if let Some(cam) = service.tick(SimTime::from_millis(1000), &mut vehicle, None)? {
//!     assert_eq!(cam.station_id, 1);
//! }
//! # Ok::<(), camlink::cam::CamError>(())
//! ```
//!
//! # Components
//!
//! - [`protocol`] - fixed-layout big-endian Cohda header codec
//! - [`cam`] - message model, generation, triggering and the service shell
//! - [`pseudonym`] - SLOW, cooperative, Whisper and composite strategies
//! - [`bridge`] - UDP link and metadata translation toward the hardware
//!
//! Everything is single-threaded and driven by the host's simulated clock;
//! see [`time::SimTime`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod bridge;
pub mod cam;
pub mod geo;
pub mod protocol;
pub mod pseudonym;
pub mod time;

pub use bridge::{BtpDataIndication, BtpDataRequest, HardwareLink};
pub use cam::{AwarenessMessage, CaService, CaServiceConfig, CamError, TriggerConfig};
pub use protocol::{DataIndicationHeader, DataRequestHeader, WireError};
pub use pseudonym::Strategy;
pub use time::SimTime;

/// Default BTP port for the cooperative awareness service.
pub const CAM_PORT: u16 = 2001;
