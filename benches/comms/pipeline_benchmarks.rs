use commlink::comms::{ChannelCondition, ModulationScheme, Payload, Pipeline};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_text_link(c: &mut Criterion) {
    let message = Payload::Text("The quick brown fox jumps over the lazy dog. ".repeat(64));
    let mut group = c.benchmark_group("text_link");

    for scheme in ModulationScheme::ALL {
        group.bench_with_input(
            BenchmarkId::new("awgn_10db", scheme),
            &scheme,
            |b, &scheme| {
                let mut pipeline =
                    Pipeline::with_seed(scheme, ChannelCondition::Awgn { eb_n0_db: 10.0 }, 42);
                b.iter(|| pipeline.run(black_box(&message)).unwrap())
            },
        );
    }

    group.finish();
}

fn bench_audio_link(c: &mut Criterion) {
    let samples: Vec<f32> = (0..8_000).map(|i| ((i as f32) * 0.05).sin() * 0.5).collect();
    let payload = Payload::Audio {
        samples,
        sample_rate: 8_000,
    };

    c.bench_function("audio_link_qam16_noiseless", |b| {
        let mut pipeline =
            Pipeline::with_seed(ModulationScheme::Qam16, ChannelCondition::Noiseless, 0);
        b.iter(|| pipeline.run(black_box(&payload)).unwrap())
    });
}

criterion_group!(benches, bench_text_link, bench_audio_link);
criterion_main!(benches);
