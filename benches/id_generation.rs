use nodeuid::{GeneratorOptions, IdGenerator, SystemClock};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_id_generation(c: &mut Criterion) {
    let generator = IdGenerator::with_node_id(42).unwrap();

    c.bench_function("id_generation", |b| {
        b.iter(|| {
            black_box(generator.next_id().unwrap());
        });
    });
}

fn bench_id_generation_yielding(c: &mut Criterion) {
    let options = GeneratorOptions {
        poll_interval: std::time::Duration::ZERO,
        ..GeneratorOptions::default()
    };
    let generator = IdGenerator::new(42u16, SystemClock, options).unwrap();

    c.bench_function("id_generation_yielding", |b| {
        b.iter(|| {
            black_box(generator.next_id().unwrap());
        });
    });
}

fn bench_generator_creation(c: &mut Criterion) {
    c.bench_function("generator_creation", |b| {
        b.iter(|| {
            black_box(IdGenerator::with_node_id(black_box(7)).unwrap());
        });
    });
}

fn bench_concurrent_generation(c: &mut Criterion) {
    let generator = std::sync::Arc::new(IdGenerator::with_node_id(1).unwrap());

    c.bench_function("concurrent_generation", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let gen = std::sync::Arc::clone(&generator);
                    std::thread::spawn(move || {
                        (0..250)
                            .map(|_| gen.next_id().unwrap())
                            .collect::<Vec<u64>>()
                    })
                })
                .collect();
            for handle in handles {
                black_box(handle.join().unwrap());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_id_generation,
    bench_id_generation_yielding,
    bench_generator_creation,
    bench_concurrent_generation
);
criterion_main!(benches);
