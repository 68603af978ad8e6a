use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use tally::{reduce, Action, Binding, Store};

fn reduce_benchmark(c: &mut Criterion) {
    c.bench_function("reduce", |b| {
        let mut value = 0u64;
        b.iter(|| {
            value = reduce(black_box(value), black_box(Action::Increment));
        });
    });
}

fn store_read_benchmark(c: &mut Criterion) {
    let store = Store::new();

    c.bench_function("store_read", |b| {
        b.iter(|| {
            black_box(store.get_value());
        });
    });
}

fn store_dispatch_benchmark(c: &mut Criterion) {
    let store = Store::new();

    c.bench_function("store_dispatch", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let action = if i % 3 == 0 {
                Action::Decrement
            } else {
                Action::Increment
            };
            store.dispatch(black_box(action)).unwrap();
            i += 1;
        });
    });
}

fn store_subscribe_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_subscribe");

    for subscriber_count in [1, 10, 100].iter() {
        let store = Store::new();

        for _ in 0..*subscriber_count {
            store.subscribe(|| {
                // Empty subscriber
            });
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(subscriber_count),
            subscriber_count,
            |b, _| {
                b.iter(|| {
                    store.increment().unwrap();
                });
            },
        );
    }
    group.finish();
}

fn binding_attach_benchmark(c: &mut Criterion) {
    let store = Store::new();

    c.bench_function("binding_attach_detach", |b| {
        b.iter(|| {
            let binding = Binding::attach(&store, |value| {
                black_box(value);
            });
            binding.detach();
        });
    });
}

criterion_group!(
    benches,
    reduce_benchmark,
    store_read_benchmark,
    store_dispatch_benchmark,
    store_subscribe_benchmark,
    binding_attach_benchmark,
);
criterion_main!(benches);
