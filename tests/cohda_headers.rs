//! Wire-level tests of the Cohda header codec against the documented
//! byte layouts.

use camlink::protocol::header::{
    btp_type, comms_profile, its_aid, packet_transport, security_profile, shape,
};
use camlink::protocol::{GnDestination, INDICATION_HEADER_SIZE, REQUEST_HEADER_SIZE, WireError};
use camlink::{DataIndicationHeader, DataRequestHeader};
use proptest::prelude::*;

fn sample_destination() -> GnDestination {
    GnDestination {
        latitude: 487_412_345,
        longitude: 93_254_321,
        distance_a: 500,
        distance_b: 250,
        angle: 90,
        shape: shape::ELLIPSE,
    }
}

fn sample_request() -> DataRequestHeader {
    DataRequestHeader {
        btp_type: btp_type::TP_B,
        packet_transport: packet_transport::GEO_BROADCAST,
        traffic_class: 0x01,
        max_packet_lifetime: 10,
        destination_port: 2002,
        destination_port_info: 0,
        destination: sample_destination(),
        comms_profile: comms_profile::G5,
        repeat_interval: 0,
        security_profile: security_profile::ENABLED,
        sec_ssp_bits_length: 24,
        security_its_aid: its_aid::DENM,
        sec_ssp_bits: [0x01, 0xFF, 0xFC, 0, 0, 0],
        data_length: 123,
    }
}

fn sample_indication() -> DataIndicationHeader {
    DataIndicationHeader {
        btp_type: btp_type::TP_B,
        packet_transport: packet_transport::SINGLE_HOP_BROADCAST,
        traffic_class: 0x02,
        max_packet_lifetime: 1,
        destination_port: 2001,
        destination_port_info: 0,
        destination: GnDestination::default(),
        security_profile: security_profile::ENABLED,
        sec_ssp_bits_length: 8,
        security_its_aid: its_aid::CAM,
        sec_ssp_bits: [0x80, 0, 0, 0, 0, 0],
        sec_cert_id: [1, 2, 3, 4, 5, 6, 7, 8],
        data_length: 64,
    }
}

#[test]
fn request_layout_matches_the_specified_offsets() {
    let bytes = sample_request().serialize();
    assert_eq!(bytes.len(), REQUEST_HEADER_SIZE);

    assert_eq!(bytes[0], btp_type::TP_B);
    assert_eq!(bytes[1], packet_transport::GEO_BROADCAST);
    assert_eq!(&bytes[4..6], &2002u16.to_be_bytes());
    // destination block starts at offset 8
    assert_eq!(&bytes[8..12], &487_412_345u32.to_be_bytes());
    assert_eq!(&bytes[12..16], &93_254_321u32.to_be_bytes());
    assert_eq!(&bytes[16..18], &500u16.to_be_bytes());
    assert_eq!(&bytes[18..20], &250u16.to_be_bytes());
    assert_eq!(&bytes[20..22], &90u16.to_be_bytes());
    assert_eq!(bytes[22], shape::ELLIPSE);
    // reserved pad after the shape byte
    assert_eq!(bytes[23], 0);
    assert_eq!(bytes[24], comms_profile::G5);
    assert_eq!(bytes[26], security_profile::ENABLED);
    assert_eq!(bytes[27], 24);
    assert_eq!(&bytes[28..32], &its_aid::DENM.to_be_bytes());
    assert_eq!(&bytes[32..38], &[0x01, 0xFF, 0xFC, 0, 0, 0]);
    assert_eq!(&bytes[38..40], &123u16.to_be_bytes());
}

#[test]
fn indication_layout_matches_the_specified_offsets() {
    let bytes = sample_indication().serialize();
    assert_eq!(bytes.len(), INDICATION_HEADER_SIZE);

    assert_eq!(bytes[0], btp_type::TP_B);
    assert_eq!(bytes[23], 0); // pad after the shape byte
    assert_eq!(bytes[24], security_profile::ENABLED);
    // two reserved pad bytes after the security profile
    assert_eq!(&bytes[25..27], &[0, 0]);
    assert_eq!(bytes[27], 8);
    assert_eq!(&bytes[28..32], &its_aid::CAM.to_be_bytes());
    assert_eq!(&bytes[38..46], &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(&bytes[46..48], &64u16.to_be_bytes());
}

#[test]
fn request_round_trips() {
    let header = sample_request();
    let decoded = DataRequestHeader::deserialize(&header.serialize()).unwrap();
    assert_eq!(decoded, header);
}

#[test]
fn indication_round_trips() {
    let header = sample_indication();
    let decoded = DataIndicationHeader::deserialize(&header.serialize()).unwrap();
    assert_eq!(decoded, header);
}

#[test]
fn wrong_lengths_are_rejected() {
    let request = sample_request().serialize();
    let indication = sample_indication().serialize();

    for bad in [0usize, 1, 39, 41, 48, 100] {
        let buf = vec![0u8; bad];
        assert!(matches!(
            DataRequestHeader::deserialize(&buf),
            Err(WireError::LengthMismatch { expected: 40, got }) if got == bad
        ));
    }
    for bad in [0usize, 40, 47, 49, 100] {
        let buf = vec![0u8; bad];
        assert!(matches!(
            DataIndicationHeader::deserialize(&buf),
            Err(WireError::LengthMismatch { expected: 48, got }) if got == bad
        ));
    }

    // prefixes of valid serializations fail the same way
    assert!(DataRequestHeader::deserialize(&request[..39]).is_err());
    assert!(DataIndicationHeader::deserialize(&indication[..47]).is_err());
}

#[test]
fn codec_does_not_validate_semantics() {
    // unknown shape and transport discriminants pass through untouched
    let mut header = sample_request();
    header.destination.shape = 0xEE;
    header.packet_transport = 0x33;
    let decoded = DataRequestHeader::deserialize(&header.serialize()).unwrap();
    assert_eq!(decoded.destination.shape, 0xEE);
    assert_eq!(decoded.packet_transport, 0x33);
}

prop_compose! {
    fn arb_destination()(
        latitude in any::<u32>(),
        longitude in any::<u32>(),
        distance_a in any::<u16>(),
        distance_b in any::<u16>(),
        angle in any::<u16>(),
        shape in any::<u8>(),
    ) -> GnDestination {
        GnDestination { latitude, longitude, distance_a, distance_b, angle, shape }
    }
}

prop_compose! {
    fn arb_request()(
        btp_type in any::<u8>(),
        packet_transport in any::<u8>(),
        traffic_class in any::<u8>(),
        max_packet_lifetime in any::<u8>(),
        destination_port in any::<u16>(),
        destination_port_info in any::<u16>(),
        destination in arb_destination(),
        comms_profile in any::<u8>(),
        repeat_interval in any::<u8>(),
        security_profile in any::<u8>(),
        sec_ssp_bits_length in any::<u8>(),
        security_its_aid in any::<u32>(),
        sec_ssp_bits in any::<[u8; 6]>(),
        data_length in any::<u16>(),
    ) -> DataRequestHeader {
        DataRequestHeader {
            btp_type, packet_transport, traffic_class, max_packet_lifetime,
            destination_port, destination_port_info, destination,
            comms_profile, repeat_interval, security_profile,
            sec_ssp_bits_length, security_its_aid, sec_ssp_bits, data_length,
        }
    }
}

prop_compose! {
    fn arb_indication()(
        btp_type in any::<u8>(),
        packet_transport in any::<u8>(),
        traffic_class in any::<u8>(),
        max_packet_lifetime in any::<u8>(),
        destination_port in any::<u16>(),
        destination_port_info in any::<u16>(),
        destination in arb_destination(),
        security_profile in any::<u8>(),
        sec_ssp_bits_length in any::<u8>(),
        security_its_aid in any::<u32>(),
        sec_ssp_bits in any::<[u8; 6]>(),
        sec_cert_id in any::<[u8; 8]>(),
        data_length in any::<u16>(),
    ) -> DataIndicationHeader {
        DataIndicationHeader {
            btp_type, packet_transport, traffic_class, max_packet_lifetime,
            destination_port, destination_port_info, destination,
            security_profile, sec_ssp_bits_length, security_its_aid,
            sec_ssp_bits, sec_cert_id, data_length,
        }
    }
}

proptest! {
    #[test]
    fn any_request_round_trips(header in arb_request()) {
        let bytes = header.serialize();
        prop_assert_eq!(bytes.len(), REQUEST_HEADER_SIZE);
        prop_assert_eq!(DataRequestHeader::deserialize(&bytes).unwrap(), header);
    }

    #[test]
    fn any_indication_round_trips(header in arb_indication()) {
        let bytes = header.serialize();
        prop_assert_eq!(bytes.len(), INDICATION_HEADER_SIZE);
        prop_assert_eq!(DataIndicationHeader::deserialize(&bytes).unwrap(), header);
    }

    #[test]
    fn reserved_bytes_are_always_zero(header in arb_request(), ind in arb_indication()) {
        prop_assert_eq!(header.serialize()[23], 0);
        let bytes = ind.serialize();
        prop_assert_eq!(bytes[23], 0);
        prop_assert_eq!(&bytes[25..27], &[0u8, 0u8][..]);
    }
}
