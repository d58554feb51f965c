use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use birdseye_bev::{
    transform::compute_transform, BevParams, BevProcessor, BevSettings, CameraModel, Orientation,
};
use birdseye_image::{Image, ImageSize};
use birdseye_imgproc::interpolation::InterpolationMode;

fn bench_compute_transform(c: &mut Criterion) {
    let camera = CameraModel::default();
    let size = ImageSize {
        width: 1280,
        height: 720,
    };
    let params = BevParams::new(-70.0, 1.5, 10.0);

    c.bench_function("compute_transform", |b| {
        b.iter(|| black_box(compute_transform(&camera, black_box(size), black_box(&params))))
    });
}

fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("BevProcessor::process");

    let orientation = Orientation::new(0.0, -70.0, 0.0);
    let settings = BevSettings::default();

    for (width, height) in [(320, 240), (640, 480), (1280, 720)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{width}x{height}");

        let size = ImageSize {
            width: *width,
            height: *height,
        };
        let frame =
            Image::<u8, 3>::from_fn(size, |x, y| [(x % 256) as u8, (y % 256) as u8, 128]).unwrap();

        let processor =
            BevProcessor::new(CameraModel::default(), InterpolationMode::Bilinear).unwrap();

        group.bench_with_input(
            BenchmarkId::new("rgb8", &parameter_string),
            &frame,
            |b, frame| {
                b.iter(|| {
                    black_box(processor.process(
                        black_box(frame),
                        black_box(&orientation),
                        black_box(&settings),
                    ))
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compute_transform, bench_process);
criterion_main!(benches);
