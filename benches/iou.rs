use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pariksha::core::types::BBox;
use pariksha::geometry::{calculate_iou, find_overlaps};

fn bench_geometry(c: &mut Criterion) {
    let a = BBox::new(0.5, 0.5, 0.2, 0.2);
    let b = BBox::new(0.52, 0.52, 0.2, 0.2);
    c.bench_function("calculate_iou", |bencher| {
        bencher.iter(|| calculate_iou(black_box(&a), black_box(&b)))
    });

    // A crowded image: 20 instances strung along one row.
    let boxes: Vec<BBox> = (0..20)
        .map(|i| BBox::new(0.05 + i as f64 * 0.045, 0.5, 0.1, 0.1))
        .collect();
    c.bench_function("find_overlaps_20_boxes", |bencher| {
        bencher.iter(|| find_overlaps(black_box(&boxes)))
    });
}

criterion_group!(benches, bench_geometry);
criterion_main!(benches);
