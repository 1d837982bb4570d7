use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tether_observe::{HandleBag, Property, Registry, UpdateHandler};

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    for entries in [1usize, 16, 128] {
        group.bench_function(format!("{}_entries", entries), |b| {
            let registry = Registry::new();
            let mut prop = Property::new(0i64);
            registry.note_write(prop.id());

            let mut bag = HandleBag::new();
            for _ in 0..entries {
                registry
                    .register(prop.id(), UpdateHandler::update(false, |v: &i64| {
                        black_box(*v);
                    }))
                    .add_to(&mut bag);
            }

            let mut value = 0i64;
            b.iter(|| {
                value = value.wrapping_add(1);
                prop.set(&registry, black_box(value));
            });
        });
    }

    group.finish();
}

fn bench_register_release(c: &mut Criterion) {
    c.bench_function("register_release", |b| {
        let registry = Registry::new();
        let prop: Property<i64> = Property::new(0);
        registry.note_write(prop.id());

        b.iter(|| {
            let handle = registry.register(prop.id(), UpdateHandler::update(false, |v: &i64| {
                black_box(*v);
            }));
            drop(handle);
        });
    });
}

criterion_group!(benches, bench_dispatch, bench_register_release);
criterion_main!(benches);
