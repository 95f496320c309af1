//! Quadratic-time transforms straight from their definitions, used to check the engine.

#![allow(clippy::cast_precision_loss)]

use std::f64::consts::PI;

use rustfft::num_complex::Complex;

pub fn dft(input: &[Complex<f64>], inverse: bool) -> Vec<Complex<f64>> {
	let n = input.len() as f64;
	let sign = if inverse { 1. } else { -1. };
	(0..input.len())
		.map(|k| {
			input
				.iter()
				.enumerate()
				.map(|(j, x)| x * Complex::from_polar(1., sign * 2. * PI * (j * k) as f64 / n))
				.sum()
		})
		.collect()
}

pub fn dht(input: &[f64]) -> Vec<f64> {
	let n = input.len() as f64;
	(0..input.len())
		.map(|k| {
			input
				.iter()
				.enumerate()
				.map(|(j, x)| {
					let angle = 2. * PI * (j * k) as f64 / n;
					x * (angle.cos() + angle.sin())
				})
				.sum()
		})
		.collect()
}

pub fn dct2(input: &[f64]) -> Vec<f64> {
	let n = input.len() as f64;
	(0..input.len())
		.map(|k| {
			2. * input
				.iter()
				.enumerate()
				.map(|(j, x)| x * (PI * (2 * j + 1) as f64 * k as f64 / (2. * n)).cos())
				.sum::<f64>()
		})
		.collect()
}

pub fn dct3(input: &[f64]) -> Vec<f64> {
	let n = input.len() as f64;
	(0..input.len())
		.map(|j| {
			input[0]
				+ 2. * input
					.iter()
					.enumerate()
					.skip(1)
					.map(|(k, x)| x * (PI * k as f64 * (2 * j + 1) as f64 / (2. * n)).cos())
					.sum::<f64>()
		})
		.collect()
}

#[test]
fn cosine_references_are_inverse_pairs() {
	let signal = [0.5, -1., 2., 0.25, 3.];
	let restored = dct3(&dct2(&signal));
	for (r, s) in restored.iter().zip(&signal) {
		assert!((r / 10. - s).abs() < 1e-12);
	}
}
