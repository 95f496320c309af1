use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use spectral::{num_complex::Complex, TransformEngine};

fn bench_plan_reuse(c: &mut Criterion) {
	use rand::prelude::*;
	let mut rng = rand::thread_rng();
	let length = 44_100;
	let sample: Vec<f32> = (0..length).map(|_| rng.gen_range(-1.0..=1.0)).collect();
	let mut spectrum = vec![Complex::new(0., 0.); length / 2 + 1];

	let mut group = c.benchmark_group("Real DFT");

	let mut engine = TransformEngine::<f32>::new(length).unwrap();
	group.bench_function(BenchmarkId::new("Cached plan", length), |b| {
		b.iter(|| {
			engine.rdft(black_box(&sample), &mut spectrum).unwrap();
		});
	});

	group.bench_function(BenchmarkId::new("Engine per call", length), |b| {
		b.iter(|| {
			let mut engine = TransformEngine::<f32>::new(length).unwrap();
			engine.rdft(black_box(&sample), &mut spectrum).unwrap();
		});
	});

	let mut staged = TransformEngine::<f32, f64>::new(length).unwrap();
	group.bench_function(BenchmarkId::new("Staged through f64", length), |b| {
		b.iter(|| {
			staged.rdft(black_box(&sample), &mut spectrum).unwrap();
		});
	});

	group.finish();
}

fn bench_cosine(c: &mut Criterion) {
	use rand::prelude::*;
	let mut rng = rand::thread_rng();

	let mut group = c.benchmark_group("DCT-II");
	for length in [256, 1000, 4096] {
		let sample: Vec<f64> = (0..length).map(|_| rng.gen_range(-1.0..=1.0)).collect();
		let mut output = vec![0.; length];
		let mut engine = TransformEngine::<f64>::new(length).unwrap();
		group.bench_function(BenchmarkId::new("Cached plan", length), |b| {
			b.iter(|| {
				engine.dct(black_box(&sample), &mut output).unwrap();
			});
		});
	}
	group.finish();
}

criterion_group! {
  name = benches;
  config = Criterion::default().measurement_time(Duration::from_secs(8));
  targets = bench_plan_reuse, bench_cosine
}
criterion_main!(benches);
