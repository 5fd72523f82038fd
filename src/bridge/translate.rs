//! Translation between host transport types and the Cohda wire headers.
//!
//! The two protocols disagree on several encodings (transport-mode values,
//! area shapes, coordinate resolution), and the hardware side additionally
//! wants an application identifier and traffic class the host does not
//! always supply. Every gap is closed here, in one direction per function,
//! with degraded defaults and a warning rather than a dropped message.

use tracing::warn;

use crate::protocol::header::{
    btp_type, comms_profile, its_aid, packet_transport, security_profile, shape,
    DataIndicationHeader, DataRequestHeader, GnDestination,
};

use super::types::{AreaShape, BtpDataRequest, GeoArea, TransportType};

/// Well-known BTP service ports, used to classify the application when the
/// request carries no explicit identifier.
mod port {
    pub const CAM: u16 = 2001;
    pub const DENM: u16 = 2002;
    pub const MAP: u16 = 2003;
    pub const SPAT: u16 = 2004;
    pub const SAEM: u16 = 2005;
    pub const IVI: u16 = 2006;
    pub const CPM: u16 = 2009;
}

/// ITS application identifier for a well-known service port.
#[must_use]
pub fn classify_port(destination_port: u16) -> Option<u32> {
    match destination_port {
        port::CAM => Some(its_aid::CAM),
        port::DENM => Some(its_aid::DENM),
        port::MAP => Some(its_aid::MAP),
        port::SPAT => Some(its_aid::SPAT),
        port::SAEM => Some(its_aid::SAEM),
        port::IVI => Some(its_aid::IVI),
        port::CPM => Some(its_aid::CPM),
        _ => None,
    }
}

/// Wire transport value for an application identifier.
///
/// Beacon-style services broadcast single-hop; event and infrastructure
/// messages are geographically scoped. An identifier outside the known set
/// leaves the field at zero with a warning.
fn transport_code_for_aid(aid: u32) -> u8 {
    match aid {
        its_aid::CAM | its_aid::SAEM => packet_transport::SINGLE_HOP_BROADCAST,
        its_aid::DENM | its_aid::MAP | its_aid::SPAT | its_aid::IVI => {
            packet_transport::GEO_BROADCAST
        }
        other => {
            warn!(aid = other, "no transport mode for application identifier");
            0
        }
    }
}

/// Traffic class byte for an application identifier.
fn traffic_class_for_aid(aid: u32) -> u8 {
    use crate::protocol::header::traffic_class;
    match aid {
        its_aid::CAM => traffic_class::CAM,
        its_aid::DENM => traffic_class::DENM,
        its_aid::MAP | its_aid::SPAT | its_aid::IVI | its_aid::SAEM => {
            traffic_class::MAP_SPAT_IVIM_SAEM
        }
        _ => traffic_class::SCH,
    }
}

fn transport_code(transport: TransportType) -> u8 {
    match transport {
        TransportType::GeoUnicast => packet_transport::GEO_UNICAST,
        TransportType::GeoBroadcast => packet_transport::GEO_BROADCAST,
        TransportType::SingleHopBroadcast => packet_transport::SINGLE_HOP_BROADCAST,
    }
}

/// A coordinate in the destination block's 1/10-microdegree fixed point.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn tenth_microdegrees(degrees: f64) -> u32 {
    (degrees * 10_000_000.0).round() as i64 as u32
}

fn encode_area(area: &GeoArea) -> GnDestination {
    let (shape_code, distance_a, distance_b) = match area.shape {
        AreaShape::Circle { radius } => (shape::CIRCLE, radius, 0),
        AreaShape::Rectangle {
            half_length,
            half_width,
        } => (shape::RECTANGLE, half_length, half_width),
        AreaShape::Ellipse {
            semi_major,
            semi_minor,
        } => (shape::ELLIPSE, semi_major, semi_minor),
    };
    GnDestination {
        latitude: tenth_microdegrees(area.latitude),
        longitude: tenth_microdegrees(area.longitude),
        distance_a,
        distance_b,
        angle: area.angle,
        shape: shape_code,
    }
}

fn decode_area(destination: &GnDestination) -> Option<GeoArea> {
    let shape = match destination.shape {
        shape::CIRCLE => AreaShape::Circle {
            radius: destination.distance_a,
        },
        shape::RECTANGLE => AreaShape::Rectangle {
            half_length: destination.distance_a,
            half_width: destination.distance_b,
        },
        shape::ELLIPSE => AreaShape::Ellipse {
            semi_major: destination.distance_a,
            semi_minor: destination.distance_b,
        },
        other => {
            warn!(shape = other, "unknown destination shape, area dropped");
            return None;
        }
    };
    #[allow(clippy::cast_possible_wrap)]
    Some(GeoArea {
        latitude: f64::from(destination.latitude as i32) / 10_000_000.0,
        longitude: f64::from(destination.longitude as i32) / 10_000_000.0,
        shape,
        angle: destination.angle,
    })
}

/// Build the wire header for an outbound request.
///
/// The application identifier comes from the request when present, else
/// from the well-known port table; an unclassifiable port degrades to a
/// zero identifier with a warning. Transport mode and traffic class are
/// copied verbatim when the host supplies them and derived from the
/// identifier otherwise. Permission arrays longer than the wire's six
/// bytes are dropped entirely rather than truncated, since a prefix of an
/// SSP array authorizes different things than the full array.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn request_header(request: &BtpDataRequest) -> DataRequestHeader {
    let aid = request.its_aid.or_else(|| {
        let classified = classify_port(request.destination_port);
        if classified.is_none() {
            warn!(
                port = request.destination_port,
                "unclassifiable destination port, zero application identifier"
            );
        }
        classified
    });
    let packet_transport = match request.transport {
        Some(transport) => transport_code(transport),
        None => transport_code_for_aid(aid.unwrap_or(0)),
    };

    let mut sec_ssp_bits = [0u8; 6];
    let mut sec_ssp_bits_length = 0;
    if !request.ssp.is_empty() {
        if request.ssp.len() <= sec_ssp_bits.len() {
            sec_ssp_bits[..request.ssp.len()].copy_from_slice(&request.ssp);
            sec_ssp_bits_length = request.ssp.len() as u8;
        } else {
            warn!(
                bytes = request.ssp.len(),
                "oversized permission array, permissions omitted"
            );
        }
    }

    DataRequestHeader {
        btp_type: btp_type::TP_B,
        packet_transport,
        traffic_class: request
            .traffic_class
            .unwrap_or_else(|| traffic_class_for_aid(aid.unwrap_or(0))),
        max_packet_lifetime: request.max_packet_lifetime,
        destination_port: request.destination_port,
        destination_port_info: request.destination_port_info,
        destination: request.area.as_ref().map(encode_area).unwrap_or_default(),
        comms_profile: comms_profile::G5,
        repeat_interval: request.repeat_interval,
        security_profile: if request.security_enabled {
            security_profile::ENABLED
        } else {
            security_profile::DISABLED
        },
        sec_ssp_bits_length,
        security_its_aid: aid.unwrap_or(0),
        sec_ssp_bits,
        data_length: request.payload.len() as u16,
    }
}

/// Interpret an inbound wire header as a host-side indication (without its
/// payload, which the link layer attaches).
///
/// An unrecognized transport value defaults to single-hop broadcast with a
/// warning; an unrecognized shape drops the area only.
#[must_use]
pub fn indication_meta(header: &DataIndicationHeader) -> super::types::BtpDataIndication {
    let transport = match header.packet_transport {
        packet_transport::GEO_UNICAST => TransportType::GeoUnicast,
        packet_transport::GEO_BROADCAST => TransportType::GeoBroadcast,
        packet_transport::SINGLE_HOP_BROADCAST => TransportType::SingleHopBroadcast,
        other => {
            warn!(
                transport = other,
                "unknown packet transport, assuming single-hop broadcast"
            );
            TransportType::SingleHopBroadcast
        }
    };

    super::types::BtpDataIndication {
        destination_port: header.destination_port,
        destination_port_info: header.destination_port_info,
        transport,
        its_aid: header.security_its_aid,
        area: decode_area(&header.destination),
        ssp: header.sec_ssp_bits,
        ssp_length: header.sec_ssp_bits_length,
        cert_id: header.sec_cert_id,
        payload: bytes::Bytes::new(),
    }
}
