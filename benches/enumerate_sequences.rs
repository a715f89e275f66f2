use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use hifitime::{Duration, Epoch};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tofo::coordinates::EquatorialCoord;
use tofo::scheduler::transition::{FixedOverhead, SlewOverhead};
use tofo::scheduler::{EnumerationMode, NodeKey, ScheduleNode, SequenceEnumerator};
use tofo::site::SiteConfig;

/// `n` random one-night observations of `targets` distinct targets, 20-60 min long.
fn random_nodes(rng: &mut StdRng, n: usize, targets: usize) -> Vec<ScheduleNode> {
    let dusk = Epoch::from_gregorian_utc_hms(2024, 9, 1, 19, 0, 0);
    (0..n)
        .map(|i| {
            let start = dusk + Duration::from_seconds(rng.random_range(0.0..8.0 * 3600.0));
            let end = start + Duration::from_seconds(rng.random_range(1200.0..3600.0));
            let coord = EquatorialCoord::new(
                rng.random_range(0.0..360.0),
                rng.random_range(-30.0..80.0),
            )
            .unwrap();
            ScheduleNode::new(
                NodeKey::new(format!("T{}", i % targets), i / targets),
                start,
                end,
                1.0,
                coord,
            )
            .unwrap()
        })
        .collect()
}

fn bench_fixed_overhead(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x7AB5);
    let site = SiteConfig::builder("bench").build().unwrap();
    let overhead = FixedOverhead::new(Duration::from_seconds(300.0)).unwrap();

    c.bench_function("enumerate_sequences/fixed_overhead_24_nodes", |b| {
        b.iter_batched(
            || random_nodes(&mut rng, 24, 12),
            |nodes| {
                let out = SequenceEnumerator::new(&overhead, &site)
                    .enumerate_sequences(black_box(&nodes))
                    .unwrap();
                black_box(out.len());
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_slew_maximal(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x5E77);
    let site = SiteConfig::builder("bench").build().unwrap();
    let slew = SlewOverhead::new(2.0, Duration::from_seconds(60.0)).unwrap();

    c.bench_function("enumerate_sequences/slew_maximal_24_nodes", |b| {
        b.iter_batched(
            || random_nodes(&mut rng, 24, 12),
            |nodes| {
                let out = SequenceEnumerator::new(&slew, &site)
                    .with_mode(EnumerationMode::MaximalOnly)
                    .enumerate_sequences(black_box(&nodes))
                    .unwrap();
                black_box(out.len());
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_fixed_overhead, bench_slew_maximal
);
criterion_main!(benches);
