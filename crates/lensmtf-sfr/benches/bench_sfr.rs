use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use lensmtf_image::{Image, ImageSize};
use lensmtf_sfr::{Roi, SfrConfig, SfrEstimator};

/// Area-sampled edge running left to right with a gentle slant.
fn horizontal_edge(width: usize, height: usize) -> Image<u8, 3> {
    let data = (0..height)
        .flat_map(|y| {
            (0..width).flat_map(move |x| {
                let edge = height as f64 / 2.0 + x as f64 * 0.1;
                let v = (30.0 + 190.0 * (y as f64 + 0.5 - edge).clamp(0.0, 1.0)) as u8;
                [v, v, v]
            })
        })
        .collect();
    Image::new(ImageSize { width, height }, data).unwrap()
}

fn bench_sfr(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sfr");

    for (width, height) in [(64, 96), (128, 160), (256, 320)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let frame = horizontal_edge(*width, *height);
        let roi = Roi::new(0, 0, *width as i64, *height as i64);

        for rate in [4, 8] {
            let estimator =
                SfrEstimator::new(SfrConfig::default().with_oversampling_rate(rate)).unwrap();

            group.bench_with_input(
                BenchmarkId::new(format!("estimate_r{rate}"), &parameter_string),
                &frame,
                |b, i| b.iter(|| estimator.estimate(black_box(i), black_box(roi))),
            );
        }
    }
    group.finish();
}

fn bench_measure_rois(c: &mut Criterion) {
    let mut group = c.benchmark_group("MeasureRois");

    let frame = horizontal_edge(640, 480);
    let estimator = SfrEstimator::default();

    for num_rois in [1, 5, 20].iter() {
        let rois = (0..*num_rois)
            .map(|i| {
                let x = (i * 29 % 540) as i64;
                Roi::new(x, 160, x + 96, 320)
            })
            .collect::<Vec<_>>();

        group.bench_with_input(BenchmarkId::new("par", num_rois), &rois, |b, r| {
            b.iter(|| lensmtf_sfr::measure_rois(&estimator, black_box(&frame), black_box(r)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sfr, bench_measure_rois);
criterion_main!(benches);
