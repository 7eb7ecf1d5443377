use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dealease_demo::demo::{aggregate, profile_for, DatasetGenerator, DemoSettings};
use dealease_demo::test_utils::{memory_store, TEST_SEED};
use dealease_demo::DensityTier;

fn bench_generate_heavy(c: &mut Criterion) {
    let profile = profile_for(DensityTier::Heavy);
    let settings = DemoSettings::for_tier(DensityTier::Heavy);
    let mut generator = DatasetGenerator::with_seed(TEST_SEED);
    c.bench_function("generate_heavy", |b| {
        b.iter(|| generator.generate(black_box(&profile), black_box(&settings)).unwrap());
    });
}

fn bench_aggregate_heavy(c: &mut Criterion) {
    let dataset = DatasetGenerator::with_seed(TEST_SEED)
        .generate(&profile_for(DensityTier::Heavy), &DemoSettings::for_tier(DensityTier::Heavy))
        .unwrap();
    c.bench_function("aggregate_heavy", |b| {
        b.iter(|| aggregate(black_box(&dataset)));
    });
}

fn bench_export_import(c: &mut Criterion) {
    let (store, _storage) = memory_store();
    store.init(DensityTier::Heavy).unwrap();
    let payload = store.export_demo_data().unwrap();
    c.bench_function("import_heavy_export", |b| {
        b.iter(|| store.import_demo_data(black_box(&payload)).unwrap());
    });
}

criterion_group!(benches, bench_generate_heavy, bench_aggregate_heavy, bench_export_import);
criterion_main!(benches);
