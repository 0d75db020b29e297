//! Codec throughput benchmarks.
//!
//! ## Running the benchmarks
//!
//! ```bash
//! cargo bench -p rbridge-protocol
//! ```
//!
//! ## Benchmarks included
//!
//! - `decode_frame/<type>` - Raw frame decode per message type
//! - `decode_base64_frame` - Transport payload decode
//! - `encode_water_sensor` - Downlink validation and encoding

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use rbridge_protocol::{decode_base64_frame, decode_frame, encode, DownlinkRequest};

fn bench_decode_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_frame");

    let frames: [(&str, &[u8]); 4] = [
        ("water", &[0x10, 0x08, 0x00, 0x05]),
        ("supervisory", &[0x10, 0x01, 0x18, 0x00, 0x30, 0, 0, 0, 0, 0x01, 0x02]),
        ("air_temp_humidity", &[0x10, 0x0D, 0x00, 0x95, 0x50, 0x2D, 0x30]),
        ("unknown", &[0x10, 0x42, 0xDE, 0xAD]),
    ];

    for (name, raw) in frames {
        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), raw, |b, raw| {
            b.iter(|| decode_frame(black_box(raw)))
        });
    }

    group.finish();
}

fn bench_decode_base64(c: &mut Criterion) {
    c.bench_function("decode_base64_frame", |b| {
        b.iter(|| decode_base64_frame(black_box("EAgABQ")))
    });
}

fn bench_encode(c: &mut Criterion) {
    let request = DownlinkRequest::new("water_sensor")
        .with("enableWaterPresent", "1")
        .with("enableWaterNotPresent", "0")
        .with("threshold", "10")
        .with("restoral", "5");

    c.bench_function("encode_water_sensor", |b| {
        b.iter(|| encode(black_box(&request)))
    });
}

criterion_group!(benches, bench_decode_frame, bench_decode_base64, bench_encode);
criterion_main!(benches);
