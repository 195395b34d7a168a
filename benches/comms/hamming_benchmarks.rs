use commlink::comms::{hamming_decode, hamming_encode, Bits};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn random_bits(len: usize) -> Bits {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    (0..len).map(|_| rng.gen::<bool>()).collect()
}

fn bench_hamming(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamming74");

    for size in [1_024, 16_384, 131_072] {
        let data = random_bits(size);
        let encoded = hamming_encode(&data);

        group.bench_with_input(BenchmarkId::new("encode", size), &data, |b, data| {
            b.iter(|| hamming_encode(black_box(data)))
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &encoded, |b, encoded| {
            b.iter(|| hamming_decode(black_box(encoded)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hamming);
criterion_main!(benches);
