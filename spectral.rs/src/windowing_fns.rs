//! Symmetric windows: the first and last weights are equal.

#![allow(clippy::cast_precision_loss)]

use std::f64::consts::TAU;

use crate::WindowingFn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HannWindow;
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HammingWindow;
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlackmanWindow;
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlackmanHarrisWindow;
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlackmanNuttallWindow;
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BartlettWindow;
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoxcarWindow;
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlatTopWindow;

macro_rules! impl_new_for {
	($($window:ident),+) => {
		$(
			impl $window {
				#[must_use]
				pub const fn new() -> Self {
					Self
				}
			}
		)+
	};
}

impl_new_for!(
	HannWindow,
	HammingWindow,
	BlackmanWindow,
	BlackmanHarrisWindow,
	BlackmanNuttallWindow,
	BartlettWindow,
	BoxcarWindow,
	FlatTopWindow
);

/// `2πi / (n - 1)`, or `None` for a single-sample window.
fn phase(index: usize, n_of_samples: usize) -> Option<f64> {
	(n_of_samples > 1).then(|| TAU * index as f64 / (n_of_samples - 1) as f64)
}

/// `Σ (-1)^k a_k cos(k·phase)`
fn cosine_sum(coefficients: &[f64], index: usize, n_of_samples: usize) -> f64 {
	let Some(phase) = phase(index, n_of_samples) else {
		return 1.;
	};
	coefficients
		.iter()
		.enumerate()
		.map(|(k, a)| {
			let term = a * (k as f64 * phase).cos();
			if k % 2 == 0 {
				term
			} else {
				-term
			}
		})
		.sum()
}

impl WindowingFn for HannWindow {
	fn ratio_at(&self, index: usize, n_of_samples: usize) -> f64 {
		cosine_sum(&[0.5, 0.5], index, n_of_samples)
	}
}

impl WindowingFn for HammingWindow {
	fn ratio_at(&self, index: usize, n_of_samples: usize) -> f64 {
		cosine_sum(&[0.54, 0.46], index, n_of_samples)
	}
}

impl WindowingFn for BlackmanWindow {
	fn ratio_at(&self, index: usize, n_of_samples: usize) -> f64 {
		cosine_sum(&[0.42, 0.5, 0.08], index, n_of_samples)
	}
}

impl WindowingFn for BlackmanHarrisWindow {
	fn ratio_at(&self, index: usize, n_of_samples: usize) -> f64 {
		cosine_sum(&[0.358_75, 0.488_29, 0.141_28, 0.011_68], index, n_of_samples)
	}
}

impl WindowingFn for BlackmanNuttallWindow {
	fn ratio_at(&self, index: usize, n_of_samples: usize) -> f64 {
		cosine_sum(
			&[0.363_581_9, 0.489_177_5, 0.136_599_5, 0.010_641_1],
			index,
			n_of_samples,
		)
	}
}

impl WindowingFn for FlatTopWindow {
	fn ratio_at(&self, index: usize, n_of_samples: usize) -> f64 {
		cosine_sum(
			&[
				0.215_578_95,
				0.416_631_58,
				0.277_263_158,
				0.083_578_947,
				0.006_947_368,
			],
			index,
			n_of_samples,
		)
	}
}

impl WindowingFn for BartlettWindow {
	fn ratio_at(&self, index: usize, n_of_samples: usize) -> f64 {
		if n_of_samples <= 1 {
			return 1.;
		}
		let half = (n_of_samples - 1) as f64 / 2.;
		1. - ((index as f64 - half) / half).abs()
	}
}

impl WindowingFn for BoxcarWindow {
	fn ratio_at(&self, _index: usize, _n_of_samples: usize) -> f64 {
		1.
	}
}
