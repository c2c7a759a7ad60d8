use age::x25519;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use keychain::core::cipher::{open, seal};
use keychain::core::keys::{DecryptKey, EncryptKey, SymmetricKey};
use std::time::Duration;

const SIZES: [usize; 5] = [32, 256, 1024, 4096, 16384];

/// JSON object payload of roughly `size` bytes.
fn generate_payload(size: usize) -> String {
    format!(r#"{{"token": "{}"}}"#, "x".repeat(size))
}

fn symmetric_keys() -> (EncryptKey, DecryptKey) {
    let bytes = [7u8; 32];
    (
        EncryptKey::Symmetric(SymmetricKey::from_bytes(bytes)),
        DecryptKey::Symmetric(SymmetricKey::from_bytes(bytes)),
    )
}

fn age_keys() -> (EncryptKey, DecryptKey) {
    let identity = x25519::Identity::generate();
    (
        EncryptKey::Public(identity.to_public()),
        DecryptKey::Private(identity),
    )
}

/// Benchmark seal/open roundtrip for both modes with varying payload sizes.
fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundtrip");
    group.sample_size(50);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for (name, (encrypt_key, decrypt_key)) in [("symmetric", symmetric_keys()), ("age", age_keys())] {
        for size in SIZES {
            let payload = generate_payload(size);
            group.throughput(Throughput::Bytes(payload.len() as u64));

            group.bench_with_input(
                BenchmarkId::new(name, format!("{}B", size)),
                &payload,
                |b, payload| {
                    b.iter(|| {
                        let sealed = seal(black_box(payload), black_box(&encrypt_key)).unwrap();
                        let opened = open(black_box(&sealed), black_box(&decrypt_key)).unwrap();
                        black_box(opened);
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark sealing only.
fn bench_seal(c: &mut Criterion) {
    let mut group = c.benchmark_group("seal");
    group.sample_size(50);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for (name, (encrypt_key, _)) in [("symmetric", symmetric_keys()), ("age", age_keys())] {
        for size in SIZES {
            let payload = generate_payload(size);
            group.throughput(Throughput::Bytes(payload.len() as u64));

            group.bench_with_input(
                BenchmarkId::new(name, format!("{}B", size)),
                &payload,
                |b, payload| {
                    b.iter(|| {
                        let sealed = seal(black_box(payload), black_box(&encrypt_key)).unwrap();
                        black_box(sealed);
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark opening pre-sealed credentials.
fn bench_open(c: &mut Criterion) {
    let mut group = c.benchmark_group("open");
    group.sample_size(50);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for (name, (encrypt_key, decrypt_key)) in [("symmetric", symmetric_keys()), ("age", age_keys())] {
        for size in SIZES {
            let payload = generate_payload(size);
            let sealed = seal(&payload, &encrypt_key).unwrap();
            group.throughput(Throughput::Bytes(payload.len() as u64));

            group.bench_with_input(
                BenchmarkId::new(name, format!("{}B", size)),
                &sealed,
                |b, sealed| {
                    b.iter(|| {
                        let opened = open(black_box(sealed), black_box(&decrypt_key)).unwrap();
                        black_box(opened);
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_roundtrip, bench_seal, bench_open);
criterion_main!(benches);
