use criterion::{Criterion, criterion_group, criterion_main};
use quickstyle_engine::{from_json, to_json};
mod common;

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    group.sample_size(10);

    let doc = common::generate_document(500);
    let json = to_json(&doc).unwrap();

    group.bench_function("encode", |b| {
        b.iter(|| {
            let json = to_json(std::hint::black_box(&doc)).unwrap();
            std::hint::black_box(json);
        });
    });

    group.bench_function("decode", |b| {
        b.iter(|| {
            let doc = from_json(std::hint::black_box(&json)).unwrap();
            std::hint::black_box(doc);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
