//! Cohda data request / data indication headers.
//!
//! Fixed-layout big-endian records exchanged with external V2X hardware over
//! UDP, as defined in the Cohda document "ETSI: Sending / receiving BTP
//! packets through UDP". A data request travels from the simulation to the
//! hardware (40 bytes), a data indication the other way (48 bytes); each is
//! immediately followed by `data_length` bytes of application payload on the
//! same datagram.
//!
//! The codec is deliberately dumb: discriminant fields are carried as raw
//! integers and never range-checked here, because the hardware may emit
//! values this crate does not know about. Semantic interpretation lives in
//! [`crate::bridge`].

use super::error::{Result, WireError};
use super::wire::{Reader, put_u8, put_u16, put_u32};

/// BTP header type values.
pub mod btp_type {
    /// BTP-B (non-interactive) transport
    pub const TP_B: u8 = 2;
}

/// GeoNetworking packet transport values used by Cohda hardware.
///
/// These differ from the vanetza-style encodings; see
/// [`crate::bridge::translate`] for the mapping.
pub mod packet_transport {
    /// Geographically scoped unicast
    pub const GEO_UNICAST: u8 = 2;
    /// Geographically scoped broadcast
    pub const GEO_BROADCAST: u8 = 4;
    /// Single-hop broadcast
    pub const SINGLE_HOP_BROADCAST: u8 = 7;
}

/// GeoNetworking traffic class identifiers.
pub mod traffic_class {
    /// Cooperative awareness messages
    pub const CAM: u8 = 0x02;
    /// Decentralized environmental notifications
    pub const DENM: u8 = 0x01;
    /// MAP / SPAT / IVIM / SAEM infrastructure messages
    pub const MAP_SPAT_IVIM_SAEM: u8 = 0x03;
    /// Service channel traffic
    pub const SCH: u8 = 0x09;
}

/// Destination-area shape discriminants.
pub mod shape {
    /// Circular destination area (`distance_a` = radius)
    pub const CIRCLE: u8 = 0;
    /// Rectangular destination area
    pub const RECTANGLE: u8 = 1;
    /// Elliptical destination area
    pub const ELLIPSE: u8 = 2;
}

/// Communication profile values.
pub mod comms_profile {
    /// ITS-G5
    pub const G5: u8 = 0;
}

/// Security profile values.
pub mod security_profile {
    /// Unsecured transmission
    pub const DISABLED: u8 = 0;
    /// Signed transmission
    pub const ENABLED: u8 = 1;
}

/// Well-known ITS application identifiers.
pub mod its_aid {
    /// Cooperative awareness
    pub const CAM: u32 = 0x24;
    /// Environmental notification
    pub const DENM: u32 = 0x25;
    /// Topology information
    pub const MAP: u32 = 0x8A;
    /// Signal phase and timing
    pub const SPAT: u32 = 0x89;
    /// In-vehicle information
    pub const IVI: u32 = 0x8B;
    /// Services announcement
    pub const SAEM: u32 = 0x8_4081;
    /// Collective perception
    pub const CPM: u32 = 0x27F;
}

/// GeoNetworking destination-area block shared by both header variants.
///
/// Latitude and longitude are fixed point in 1/10 microdegrees; the meaning
/// of the two distance fields depends on `shape`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GnDestination {
    /// Area center latitude, 1/10 microdegrees
    pub latitude: u32,
    /// Area center longitude, 1/10 microdegrees
    pub longitude: u32,
    /// First distance in meters (radius, half-length, or semi-major axis)
    pub distance_a: u16,
    /// Second distance in meters (zero for circles)
    pub distance_b: u16,
    /// Area azimuth in degrees
    pub angle: u16,
    /// Shape discriminant, see [`shape`]
    pub shape: u8,
}

/// Cohda data request header (simulation → hardware), 40 bytes on the wire.
///
/// `Default` yields an all-zero header, matching the zero-initializing
/// constructor of the reference hardware tooling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataRequestHeader {
    /// BTP header type, see [`btp_type`]
    pub btp_type: u8,
    /// Packet transport mode, see [`packet_transport`]
    pub packet_transport: u8,
    /// Traffic class, see [`traffic_class`]
    pub traffic_class: u8,
    /// Maximum packet lifetime in seconds
    pub max_packet_lifetime: u8,
    /// BTP destination port
    pub destination_port: u16,
    /// BTP destination port info
    pub destination_port_info: u16,
    /// Destination area geometry
    pub destination: GnDestination,
    /// Communication profile, see [`comms_profile`]
    pub comms_profile: u8,
    /// Packet repetition interval (zero = no repetition)
    pub repeat_interval: u8,
    /// Security profile, see [`security_profile`]
    pub security_profile: u8,
    /// Number of valid bytes in `sec_ssp_bits`
    pub sec_ssp_bits_length: u8,
    /// ITS application identifier, see [`its_aid`]
    pub security_its_aid: u32,
    /// Service specific permissions, zero padded
    pub sec_ssp_bits: [u8; 6],
    /// Length of the application payload following this header
    pub data_length: u16,
}

impl DataRequestHeader {
    /// Serialized size in bytes.
    pub const SIZE: usize = 40;

    /// Serialize into the fixed 40-byte wire layout.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(Self::SIZE);

        put_u8(&mut data, self.btp_type);
        put_u8(&mut data, self.packet_transport);
        put_u8(&mut data, self.traffic_class);
        put_u8(&mut data, self.max_packet_lifetime);

        put_u16(&mut data, self.destination_port);
        put_u16(&mut data, self.destination_port_info);

        put_u32(&mut data, self.destination.latitude);
        put_u32(&mut data, self.destination.longitude);
        put_u16(&mut data, self.destination.distance_a);
        put_u16(&mut data, self.destination.distance_b);
        put_u16(&mut data, self.destination.angle);
        put_u8(&mut data, self.destination.shape);
        put_u8(&mut data, 0); // reserved

        put_u8(&mut data, self.comms_profile);
        put_u8(&mut data, self.repeat_interval);
        put_u8(&mut data, self.security_profile);
        put_u8(&mut data, self.sec_ssp_bits_length);
        put_u32(&mut data, self.security_its_aid);

        data.extend_from_slice(&self.sec_ssp_bits);
        put_u16(&mut data, self.data_length);

        debug_assert_eq!(data.len(), Self::SIZE);
        data
    }

    /// Deserialize from exactly [`Self::SIZE`] bytes.
    ///
    /// Any other input length is rejected outright; on error no header value
    /// is produced at all.
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        if data.len() != Self::SIZE {
            return Err(WireError::LengthMismatch {
                expected: Self::SIZE,
                got: data.len(),
            });
        }

        let mut r = Reader::new(data);
        let btp_type = r.u8()?;
        let packet_transport = r.u8()?;
        let traffic_class = r.u8()?;
        let max_packet_lifetime = r.u8()?;
        let destination_port = r.u16()?;
        let destination_port_info = r.u16()?;
        let destination = GnDestination {
            latitude: r.u32()?,
            longitude: r.u32()?,
            distance_a: r.u16()?,
            distance_b: r.u16()?,
            angle: r.u16()?,
            shape: r.u8()?,
        };
        let _reserved = r.u8()?;
        let comms_profile = r.u8()?;
        let repeat_interval = r.u8()?;
        let security_profile = r.u8()?;
        let sec_ssp_bits_length = r.u8()?;
        let security_its_aid = r.u32()?;
        let sec_ssp_bits = r.bytes()?;
        let data_length = r.u16()?;

        Ok(Self {
            btp_type,
            packet_transport,
            traffic_class,
            max_packet_lifetime,
            destination_port,
            destination_port_info,
            destination,
            comms_profile,
            repeat_interval,
            security_profile,
            sec_ssp_bits_length,
            security_its_aid,
            sec_ssp_bits,
            data_length,
        })
    }
}

/// Cohda data indication header (hardware → simulation), 48 bytes on the
/// wire. Compared to the request it lacks the comms profile and repeat
/// interval but carries the signing certificate digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataIndicationHeader {
    /// BTP header type, see [`btp_type`]
    pub btp_type: u8,
    /// Packet transport mode, see [`packet_transport`]
    pub packet_transport: u8,
    /// Traffic class, see [`traffic_class`]
    pub traffic_class: u8,
    /// Maximum packet lifetime in seconds
    pub max_packet_lifetime: u8,
    /// BTP destination port
    pub destination_port: u16,
    /// BTP destination port info
    pub destination_port_info: u16,
    /// Destination area geometry
    pub destination: GnDestination,
    /// Security profile, see [`security_profile`]
    pub security_profile: u8,
    /// Number of valid bytes in `sec_ssp_bits`
    pub sec_ssp_bits_length: u8,
    /// ITS application identifier, see [`its_aid`]
    pub security_its_aid: u32,
    /// Service specific permissions, zero padded
    pub sec_ssp_bits: [u8; 6],
    /// Digest of the signing certificate
    pub sec_cert_id: [u8; 8],
    /// Length of the application payload following this header
    pub data_length: u16,
}

impl DataIndicationHeader {
    /// Serialized size in bytes.
    pub const SIZE: usize = 48;

    /// Serialize into the fixed 48-byte wire layout.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(Self::SIZE);

        put_u8(&mut data, self.btp_type);
        put_u8(&mut data, self.packet_transport);
        put_u8(&mut data, self.traffic_class);
        put_u8(&mut data, self.max_packet_lifetime);

        put_u16(&mut data, self.destination_port);
        put_u16(&mut data, self.destination_port_info);

        put_u32(&mut data, self.destination.latitude);
        put_u32(&mut data, self.destination.longitude);
        put_u16(&mut data, self.destination.distance_a);
        put_u16(&mut data, self.destination.distance_b);
        put_u16(&mut data, self.destination.angle);
        put_u8(&mut data, self.destination.shape);
        put_u8(&mut data, 0); // reserved

        put_u8(&mut data, self.security_profile);
        put_u16(&mut data, 0); // reserved
        put_u8(&mut data, self.sec_ssp_bits_length);
        put_u32(&mut data, self.security_its_aid);

        data.extend_from_slice(&self.sec_ssp_bits);
        data.extend_from_slice(&self.sec_cert_id);
        put_u16(&mut data, self.data_length);

        debug_assert_eq!(data.len(), Self::SIZE);
        data
    }

    /// Deserialize from exactly [`Self::SIZE`] bytes.
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        if data.len() != Self::SIZE {
            return Err(WireError::LengthMismatch {
                expected: Self::SIZE,
                got: data.len(),
            });
        }

        let mut r = Reader::new(data);
        let btp_type = r.u8()?;
        let packet_transport = r.u8()?;
        let traffic_class = r.u8()?;
        let max_packet_lifetime = r.u8()?;
        let destination_port = r.u16()?;
        let destination_port_info = r.u16()?;
        let destination = GnDestination {
            latitude: r.u32()?,
            longitude: r.u32()?,
            distance_a: r.u16()?,
            distance_b: r.u16()?,
            angle: r.u16()?,
            shape: r.u8()?,
        };
        let _reserved = r.u8()?;
        let security_profile = r.u8()?;
        let _reserved16 = r.u16()?;
        let sec_ssp_bits_length = r.u8()?;
        let security_its_aid = r.u32()?;
        let sec_ssp_bits = r.bytes()?;
        let sec_cert_id = r.bytes()?;
        let data_length = r.u16()?;

        Ok(Self {
            btp_type,
            packet_transport,
            traffic_class,
            max_packet_lifetime,
            destination_port,
            destination_port_info,
            destination,
            security_profile,
            sec_ssp_bits_length,
            security_its_aid,
            sec_ssp_bits,
            sec_cert_id,
            data_length,
        })
    }
}
