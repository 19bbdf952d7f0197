//! Benchmarks for GRANIT cipher operations.
//!
//! Measures key setup, full-message encrypt/decrypt throughput, and the
//! transposition box alone across message lengths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use granit::transposition;
use granit::Granit;

/// Keys used consistently across all benchmarks.
const BENCH_KEY1: &str = "stellenweisebewoelktmitschauern";
const BENCH_KEY2: &str = "abendrotschoenwetterbringtmorgen";
const BENCH_SUBKEY: &str = "granit";

/// A short operational message with digits and punctuation.
const BENCH_MESSAGE: &str = "Treffpunkt Bahnhof Nord, Gleis 4, um 2215 Uhr. Kennwort Adler.";

/// Benchmarks `Granit::with_subkey()`: key ranking and table construction.
fn bench_key_setup(c: &mut Criterion) {
    c.bench_function("key_setup", |b| {
        b.iter(|| {
            Granit::with_subkey(black_box(Some(BENCH_SUBKEY)), BENCH_KEY1, BENCH_KEY2).unwrap();
        });
    });
}

/// Benchmarks a full encrypt of the operational message.
fn bench_encrypt(c: &mut Criterion) {
    let granit = Granit::with_subkey(Some(BENCH_SUBKEY), BENCH_KEY1, BENCH_KEY2).unwrap();

    let mut group = c.benchmark_group("encrypt_message");
    group.throughput(Throughput::Bytes(BENCH_MESSAGE.len() as u64));
    group.bench_function("short_message", |b| {
        b.iter(|| granit.encrypt(black_box(BENCH_MESSAGE)));
    });
    group.finish();
}

/// Benchmarks a full decrypt, validator included.
fn bench_decrypt(c: &mut Criterion) {
    let granit = Granit::with_subkey(Some(BENCH_SUBKEY), BENCH_KEY1, BENCH_KEY2).unwrap();
    let ciphertext = granit.encrypt(BENCH_MESSAGE);

    let mut group = c.benchmark_group("decrypt_message");
    group.throughput(Throughput::Bytes(ciphertext.len() as u64));
    group.bench_function("short_message", |b| {
        b.iter(|| granit.decrypt(black_box(&ciphertext)).unwrap());
    });
    group.finish();
}

/// Benchmarks one forward box across message lengths.
///
/// Lengths are chosen so that some fill the box evenly and some leave
/// short columns.
fn bench_box_scaling(c: &mut Criterion) {
    let order: Vec<usize> = (0..17).rev().collect();
    let lengths: &[usize] = &[17, 100, 1_000, 10_000];

    let mut group = c.benchmark_group("box_forward_scaling");
    for &len in lengths {
        let input: Vec<u8> = (0..len).map(|i| (i % 10) as u8).collect();
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &input, |b, input| {
            b.iter(|| transposition::forward(black_box(&order), black_box(input)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_key_setup,
    bench_encrypt,
    bench_decrypt,
    bench_box_scaling,
);
criterion_main!(benches);
