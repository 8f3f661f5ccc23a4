use criterion::{criterion_group, criterion_main, Criterion};
use route_tester::routes::{ActionBucket, Route};
use route_tester::templates::{behavior_spec, feature, page_object, steps, ScaffoldContext, SectionRenderer};
use std::hint::black_box;

fn contexts() -> Vec<(ScaffoldContext, ActionBucket)> {
    ActionBucket::ALL
        .iter()
        .map(|bucket| {
            let route = Route::new("admin/users", bucket.as_str());
            (ScaffoldContext::new(&route, true), *bucket)
        })
        .collect()
}

fn bench_scaffold_generation(c: &mut Criterion) {
    let renderer = SectionRenderer::new();
    let contexts = contexts();
    let require = "../support/page_objects/admin/users_index_page";

    let mut group = c.benchmark_group("scaffold_generation");
    group.bench_function("page_object", |b| {
        b.iter(|| {
            for (ctx, bucket) in &contexts {
                black_box(page_object::render(&renderer, ctx, *bucket, "../base_page").ok());
            }
        })
    });
    group.bench_function("behavior_spec", |b| {
        b.iter(|| {
            for (ctx, bucket) in &contexts {
                black_box(behavior_spec::render(&renderer, ctx, *bucket, require).ok());
            }
        })
    });
    group.bench_function("feature", |b| {
        b.iter(|| {
            for (ctx, bucket) in &contexts {
                black_box(feature::render(&renderer, ctx, *bucket).ok());
            }
        })
    });
    group.bench_function("steps", |b| {
        b.iter(|| {
            for (ctx, bucket) in &contexts {
                black_box(steps::render(&renderer, ctx, *bucket, require).ok());
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_scaffold_generation);
criterion_main!(benches);
