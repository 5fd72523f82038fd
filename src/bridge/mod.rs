//! Bridge to external V2X hardware over a UDP datagram link.
//!
//! The hardware speaks the Cohda wire framing from [`crate::protocol`];
//! this module owns the socket, the header translation in both directions
//! and the degraded-default policy for metadata the two sides encode
//! differently.

pub mod link;
pub mod socket;
pub mod translate;
pub mod types;

pub use link::{HardwareLink, LinkError};
pub use translate::{classify_port, indication_meta, request_header};
pub use types::{AreaShape, BtpDataIndication, BtpDataRequest, GeoArea, TransportType};
