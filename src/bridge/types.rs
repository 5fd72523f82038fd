//! Host-side transport types exchanged with the hardware bridge.
//!
//! These are the bridge's API surface toward the simulation: a send request
//! going out to the radio and an indication coming back in. The fixed wire
//! records live in [`crate::protocol`]; the translation between the two is
//! in [`super::translate`].

use bytes::Bytes;

/// GeoNetworking packet transport mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportType {
    /// Single-hop broadcast, the mode awareness beacons use
    #[default]
    SingleHopBroadcast,
    /// Geographically scoped broadcast
    GeoBroadcast,
    /// Unicast toward a geographic position
    GeoUnicast,
}

/// Destination-area geometry for geographically scoped transport.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AreaShape {
    /// Circle of `radius` meters
    Circle {
        /// Radius in meters
        radius: u16,
    },
    /// Axis-aligned rectangle before rotation by the area angle
    Rectangle {
        /// Half-length along the long axis, meters
        half_length: u16,
        /// Half-width along the short axis, meters
        half_width: u16,
    },
    /// Ellipse before rotation by the area angle
    Ellipse {
        /// Semi-major axis, meters
        semi_major: u16,
        /// Semi-minor axis, meters
        semi_minor: u16,
    },
}

/// A geographic destination area.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoArea {
    /// Center latitude in degrees
    pub latitude: f64,
    /// Center longitude in degrees
    pub longitude: f64,
    /// Area shape and extent
    pub shape: AreaShape,
    /// Azimuth of the shape's long axis in degrees
    pub angle: u16,
}

/// An outbound transmission handed to the hardware.
#[derive(Debug, Clone, Default)]
pub struct BtpDataRequest {
    /// BTP destination port
    pub destination_port: u16,
    /// BTP destination port info
    pub destination_port_info: u16,
    /// Transport mode; derived from the application identifier when `None`
    pub transport: Option<TransportType>,
    /// ITS application identifier; classified from the port when `None`
    pub its_aid: Option<u32>,
    /// Traffic class byte; derived from the application identifier when
    /// `None`
    pub traffic_class: Option<u8>,
    /// Maximum packet lifetime in seconds
    pub max_packet_lifetime: u8,
    /// Repeat interval for repeated transmission, zero for one-shot
    pub repeat_interval: u8,
    /// Destination area for geographically scoped transport
    pub area: Option<GeoArea>,
    /// Whether the hardware should sign the message
    pub security_enabled: bool,
    /// Service specific permissions, at most 6 bytes
    pub ssp: Bytes,
    /// Encoded application payload
    pub payload: Bytes,
}

/// An inbound reception reported by the hardware.
#[derive(Debug, Clone)]
pub struct BtpDataIndication {
    /// BTP destination port
    pub destination_port: u16,
    /// BTP destination port info
    pub destination_port_info: u16,
    /// Transport mode the packet arrived with
    pub transport: TransportType,
    /// ITS application identifier from the security envelope
    pub its_aid: u32,
    /// Destination area, absent for single-hop receptions or when the
    /// hardware reported an unknown shape
    pub area: Option<GeoArea>,
    /// Service specific permissions
    pub ssp: [u8; 6],
    /// Number of valid bytes in `ssp`
    pub ssp_length: u8,
    /// Identifier of the signing certificate
    pub cert_id: [u8; 8],
    /// Encoded application payload
    pub payload: Bytes,
}
