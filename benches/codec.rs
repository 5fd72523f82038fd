//! Header codec benchmarks.

use camlink::protocol::header::{
    btp_type, comms_profile, its_aid, packet_transport, security_profile, shape,
};
use camlink::protocol::GnDestination;
use camlink::{DataIndicationHeader, DataRequestHeader};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn request() -> DataRequestHeader {
    DataRequestHeader {
        btp_type: btp_type::TP_B,
        packet_transport: packet_transport::GEO_BROADCAST,
        traffic_class: 0x01,
        max_packet_lifetime: 10,
        destination_port: 2002,
        destination_port_info: 0,
        destination: GnDestination {
            latitude: 487_412_345,
            longitude: 93_254_321,
            distance_a: 500,
            distance_b: 250,
            angle: 90,
            shape: shape::ELLIPSE,
        },
        comms_profile: comms_profile::G5,
        repeat_interval: 0,
        security_profile: security_profile::ENABLED,
        sec_ssp_bits_length: 24,
        security_its_aid: its_aid::DENM,
        sec_ssp_bits: [0x01, 0xFF, 0xFC, 0, 0, 0],
        data_length: 123,
    }
}

fn indication_bytes() -> Vec<u8> {
    let mut header = DataIndicationHeader::default();
    header.btp_type = btp_type::TP_B;
    header.packet_transport = packet_transport::SINGLE_HOP_BROADCAST;
    header.security_its_aid = its_aid::CAM;
    header.data_length = 200;
    header.serialize()
}

fn bench_serialize(c: &mut Criterion) {
    let header = request();
    c.bench_function("serialize_request_header", |b| {
        b.iter(|| black_box(&header).serialize());
    });
}

fn bench_deserialize(c: &mut Criterion) {
    let request_bytes = request().serialize();
    let indication = indication_bytes();

    c.bench_function("deserialize_request_header", |b| {
        b.iter(|| DataRequestHeader::deserialize(black_box(&request_bytes)).unwrap());
    });
    c.bench_function("deserialize_indication_header", |b| {
        b.iter(|| DataIndicationHeader::deserialize(black_box(&indication)).unwrap());
    });
}

criterion_group!(benches, bench_serialize, bench_deserialize);
criterion_main!(benches);
