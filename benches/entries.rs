//! Benchmarks for entry insertion and matching.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use robolist::entry::EntryList;

fn large_list(rng: &mut StdRng, len: usize) -> EntryList {
    let mut list = EntryList::initialize(rng, 0);
    while list.len() < len {
        list.tick(rng, 0);
    }
    list
}

fn bench_tick(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let list = large_list(&mut rng, 10_000);

    c.bench_function("tick_10k", |b| {
        b.iter_batched(
            || (list.clone(), StdRng::seed_from_u64(2)),
            |(mut list, mut rng)| list.tick(&mut rng, black_box(500)),
            BatchSize::SmallInput,
        );
    });
}

fn bench_matching(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let list = large_list(&mut rng, 10_000);

    c.bench_function("matching_10k", |b| {
        b.iter(|| list.matching(black_box("ab")).count());
    });
}

criterion_group!(benches, bench_tick, bench_matching);
criterion_main!(benches);
