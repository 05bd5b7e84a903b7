use criterion::{Criterion, black_box, criterion_group, criterion_main};
use blank_overlay::utils::binarization::{smooth, threshold_binarize};
use image::{GrayImage, Luma};

fn gradient(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| Luma([((x ^ y) & 0xff) as u8]))
}

fn bench_threshold_binarize_medium(c: &mut Criterion) {
    let gray = gradient(640, 480);
    c.bench_function("threshold_binarize_640x480", |b| {
        b.iter(|| threshold_binarize(black_box(&gray), black_box(250)))
    });
}

fn bench_threshold_binarize_large(c: &mut Criterion) {
    let gray = gradient(1920, 1080);
    c.bench_function("threshold_binarize_1920x1080", |b| {
        b.iter(|| threshold_binarize(black_box(&gray), black_box(250)))
    });
}

fn bench_smooth_medium(c: &mut Criterion) {
    let mask = threshold_binarize(&gradient(640, 480), 128);
    c.bench_function("smooth_5x5_x4_640x480", |b| {
        b.iter(|| smooth(black_box(&mask), black_box(5), black_box(4)))
    });
}

criterion_group!(
    benches,
    bench_threshold_binarize_medium,
    bench_threshold_binarize_large,
    bench_smooth_medium
);
criterion_main!(benches);
