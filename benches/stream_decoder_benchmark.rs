//! Stream payload deobfuscation benchmark
//!
//! Payloads carry one decoy per segment; the decoder scans for all 150 decoy
//! codes on every call, so the cost grows with payload length.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rezka_scraper::infrastructure::stream_decoder::{decode_streams, strip_obfuscation};

const OBFUSCATED_LISTING: &str = "#hWzcy//_//JCQ=MHBdaHR0cDovL2EuZXhh//_//QCMhbXBsZS94Lm0zdTggb3IgaHR0cDov//_//Xl4=L2IuZXhhbXBsZS94Lm0zdTgsWzQ4MHBdaHR0cDovL2MuZXhhbXBsZS95Lm0zdTg=";

/// Listing with `qualities` entries, encoded and prefixed with the marker
fn listing_payload(qualities: usize) -> String {
    let listing = (0..qualities)
        .map(|index| {
            format!(
                "[{index}p]https://stream.example/{index}/hls.m3u8 or https://stream.example/{index}/video.mp4"
            )
        })
        .collect::<Vec<_>>()
        .join(",");
    format!("#h{}", STANDARD.encode(listing))
}

fn bench_decode(c: &mut Criterion) {
    c.bench_function("decode_streams/fixture", |b| {
        b.iter(|| decode_streams(black_box(OBFUSCATED_LISTING)))
    });

    let mut group = c.benchmark_group("strip_obfuscation");
    for qualities in [1, 5, 20] {
        let payload = listing_payload(qualities);
        group.bench_with_input(BenchmarkId::from_parameter(qualities), &payload, |b, payload| {
            b.iter(|| strip_obfuscation(black_box(payload)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
