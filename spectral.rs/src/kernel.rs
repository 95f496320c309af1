//! Native-precision execution of every transform kind.
//!
//! Complex transforms run on `rustfft`, the half-spectrum pair on `realfft`.
//! Hartley and the cosine pair are derived from a length-N complex FFT.

#![allow(clippy::cast_precision_loss)]

use std::{alloc::Layout, alloc::LayoutError, collections::TryReserveError, f64::consts::PI, sync::Arc};

use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use rustfft::{num_complex::Complex, num_traits::Zero, Fft, FftNum, FftPlanner};

use crate::{half_spectrum_len, staging::reserve_filled, Direction, PlanKey, TransformError, TransformKind};

#[derive(thiserror::Error, Debug)]
pub(crate) enum BuildFailure {
	#[error("buffer layout overflows the address space ({0})")]
	Layout(#[from] LayoutError),
	#[error("unable to reserve plan memory ({0})")]
	Reserve(#[from] TryReserveError),
	#[error("twiddle factor {0} is not representable in the native precision")]
	Twiddle(usize),
}

pub(crate) enum Kernel<N: FftNum> {
	Complex {
		fft: Arc<dyn Fft<N>>,
		scratch: Vec<Complex<N>>,
	},
	RealForward {
		fft: Arc<dyn RealToComplex<N>>,
		// realfft consumes its input
		input: Vec<N>,
		scratch: Vec<Complex<N>>,
	},
	RealInverse {
		fft: Arc<dyn ComplexToReal<N>>,
		input: Vec<Complex<N>>,
		scratch: Vec<Complex<N>>,
	},
	Hartley {
		fft: Arc<dyn Fft<N>>,
		work: Vec<Complex<N>>,
		scratch: Vec<Complex<N>>,
	},
	/// DCT-II
	Cosine {
		fft: Arc<dyn Fft<N>>,
		work: Vec<Complex<N>>,
		twiddles: Vec<Complex<N>>,
		scratch: Vec<Complex<N>>,
	},
	/// DCT-III
	InverseCosine {
		fft: Arc<dyn Fft<N>>,
		work: Vec<Complex<N>>,
		twiddles: Vec<Complex<N>>,
		scratch: Vec<Complex<N>>,
	},
}

impl<N: FftNum> std::fmt::Debug for Kernel<N> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Kernel")
			.field("variant", &self.name())
			.field("fft", &"omitted")
			.finish()
	}
}

impl<N: FftNum> Kernel<N> {
	pub(crate) fn build(key: PlanKey, length: usize) -> Result<Self, BuildFailure> {
		// Every kernel holds at least one length-N complex buffer.
		Layout::array::<Complex<N>>(length)?;

		let mut planner = FftPlanner::<N>::new();
		let zero = Complex::<N>::zero();

		// Length-N buffers are reserved before planning, the planners abort instead of failing.
		Ok(match (key.kind, key.direction) {
			(TransformKind::Complex, direction) => {
				Vec::<Complex<N>>::new().try_reserve_exact(length)?;
				let fft = match direction {
					Direction::Forward => planner.plan_fft_forward(length),
					Direction::Inverse => planner.plan_fft_inverse(length),
				};
				Self::Complex {
					scratch: reserve_filled(fft.get_inplace_scratch_len(), zero)?,
					fft,
				}
			}
			(TransformKind::Real, Direction::Forward) => {
				let input = reserve_filled(length, N::zero())?;
				let fft = RealFftPlanner::<N>::new().plan_fft_forward(length);
				Self::RealForward {
					input,
					scratch: reserve_filled(fft.get_scratch_len(), zero)?,
					fft,
				}
			}
			(TransformKind::Real, Direction::Inverse) => {
				let input = reserve_filled(half_spectrum_len(length), zero)?;
				let fft = RealFftPlanner::<N>::new().plan_fft_inverse(length);
				Self::RealInverse {
					input,
					scratch: reserve_filled(fft.get_scratch_len(), zero)?,
					fft,
				}
			}
			(TransformKind::Hartley, _) => {
				let work = reserve_filled(length, zero)?;
				let fft = planner.plan_fft_forward(length);
				Self::Hartley {
					work,
					scratch: reserve_filled(fft.get_inplace_scratch_len(), zero)?,
					fft,
				}
			}
			(TransformKind::Cosine, Direction::Forward) => {
				let work = reserve_filled(length, zero)?;
				let twiddles = quarter_wave_twiddles(length, -1.)?;
				let fft = planner.plan_fft_forward(length);
				Self::Cosine {
					work,
					twiddles,
					scratch: reserve_filled(fft.get_inplace_scratch_len(), zero)?,
					fft,
				}
			}
			(TransformKind::Cosine, Direction::Inverse) => {
				let work = reserve_filled(length, zero)?;
				let twiddles = quarter_wave_twiddles(length, 1.)?;
				let fft = planner.plan_fft_inverse(length);
				Self::InverseCosine {
					work,
					twiddles,
					scratch: reserve_filled(fft.get_inplace_scratch_len(), zero)?,
					fft,
				}
			}
		})
	}

	pub(crate) const fn name(&self) -> &'static str {
		match self {
			Self::Complex { .. } => "complex",
			Self::RealForward { .. } => "real forward",
			Self::RealInverse { .. } => "real inverse",
			Self::Hartley { .. } => "hartley",
			Self::Cosine { .. } => "cosine",
			Self::InverseCosine { .. } => "inverse cosine",
		}
	}

	pub(crate) fn run_complex(
		&mut self,
		input: &[Complex<N>],
		output: &mut [Complex<N>],
	) -> Result<(), TransformError> {
		let name = self.name();
		let Self::Complex { fft, scratch } = self else {
			return Err(unexpected(name, "complex"));
		};
		output.copy_from_slice(input);
		fft.process_with_scratch(output, scratch);
		Ok(())
	}

	pub(crate) fn run_real_forward(
		&mut self,
		input: &[N],
		output: &mut [Complex<N>],
	) -> Result<(), TransformError> {
		let name = self.name();
		let Self::RealForward {
			fft,
			input: consumed,
			scratch,
		} = self
		else {
			return Err(unexpected(name, "real forward"));
		};
		consumed.copy_from_slice(input);
		fft.process_with_scratch(consumed, output, scratch)
			.map_err(|err| TransformError::NativeExecution(err.to_string()))
	}

	pub(crate) fn run_real_inverse(
		&mut self,
		input: &[Complex<N>],
		output: &mut [N],
	) -> Result<(), TransformError> {
		let name = self.name();
		let Self::RealInverse {
			fft,
			input: consumed,
			scratch,
		} = self
		else {
			return Err(unexpected(name, "real inverse"));
		};
		consumed.copy_from_slice(input);
		// A real signal has no imaginary DC (nor Nyquist) component, the native
		// convention is to ignore whatever the caller put there.
		consumed[0].im = N::zero();
		if output.len() % 2 == 0 {
			if let Some(nyquist) = consumed.last_mut() {
				nyquist.im = N::zero();
			}
		}
		fft.process_with_scratch(consumed, output, scratch)
			.map_err(|err| TransformError::NativeExecution(err.to_string()))
	}

	/// Real-to-real kinds: Hartley, DCT-II, DCT-III.
	pub(crate) fn run_real(&mut self, input: &[N], output: &mut [N]) -> Result<(), TransformError> {
		let name = self.name();
		match self {
			Self::Hartley { fft, work, scratch } => {
				for (w, &x) in work.iter_mut().zip(input) {
					*w = Complex::new(x, N::zero());
				}
				fft.process_with_scratch(work, scratch);
				// cas(θ) = cos(θ) + sin(θ), while the DFT carries -sin(θ) in its imaginary part
				for (y, w) in output.iter_mut().zip(work.iter()) {
					*y = w.re - w.im;
				}
				Ok(())
			}
			Self::Cosine {
				fft,
				work,
				twiddles,
				scratch,
			} => {
				let n = input.len();
				for (i, &x) in input.iter().enumerate() {
					work[makhoul_slot(i, n)] = Complex::new(x, N::zero());
				}
				fft.process_with_scratch(work, scratch);
				for ((y, v), t) in output.iter_mut().zip(work.iter()).zip(twiddles.iter()) {
					let re = (v * t).re;
					*y = re + re;
				}
				Ok(())
			}
			Self::InverseCosine {
				fft,
				work,
				twiddles,
				scratch,
			} => {
				let n = input.len();
				for (k, (w, t)) in work.iter_mut().zip(twiddles.iter()).enumerate() {
					let mirrored = if k == 0 { N::zero() } else { input[n - k] };
					*w = t * Complex::new(input[k], -mirrored);
				}
				fft.process_with_scratch(work, scratch);
				for (i, y) in output.iter_mut().enumerate() {
					*y = work[makhoul_slot(i, n)].re;
				}
				Ok(())
			}
			_ => Err(unexpected(name, "real-to-real")),
		}
	}
}

/// Makhoul's reordering: even samples ascending from the front, odd samples descending from the back.
const fn makhoul_slot(i: usize, n: usize) -> usize {
	if i % 2 == 0 {
		i / 2
	} else {
		n - 1 - i / 2
	}
}

/// `exp(sign * iπk / 2N)` for `k` in `0..length`.
fn quarter_wave_twiddles<N: FftNum>(length: usize, sign: f64) -> Result<Vec<Complex<N>>, BuildFailure> {
	let mut twiddles = reserve_filled(length, Complex::<N>::zero())?;
	let denominator = 2. * length as f64;
	for (k, twiddle) in twiddles.iter_mut().enumerate() {
		let angle = sign * PI * k as f64 / denominator;
		let (Some(re), Some(im)) = (N::from_f64(angle.cos()), N::from_f64(angle.sin())) else {
			return Err(BuildFailure::Twiddle(k));
		};
		*twiddle = Complex::new(re, im);
	}
	Ok(twiddles)
}

fn unexpected(plan: &str, requested: &str) -> TransformError {
	TransformError::NativeExecution(format!(
		"a {plan} plan cannot execute a {requested} transform"
	))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn makhoul_reordering_is_a_permutation() {
		for n in 1..=9 {
			let mut slots: Vec<usize> = (0..n).map(|i| makhoul_slot(i, n)).collect();
			slots.sort_unstable();
			assert_eq!(slots, (0..n).collect::<Vec<_>>());
		}
	}

	#[test]
	fn twiddles_start_at_one() {
		let twiddles = quarter_wave_twiddles::<f64>(4, -1.).unwrap();
		assert!((twiddles[0] - Complex::new(1., 0.)).norm() < 1e-12);
		// exp(-iπ·2/8) = exp(-iπ/4)
		let expected = Complex::new(0.5_f64.sqrt(), -(0.5_f64.sqrt()));
		assert!((twiddles[2] - expected).norm() < 1e-12);
	}

	#[test]
	fn oversized_layout_is_rejected_before_planning() {
		let key = PlanKey::new(TransformKind::Complex, Direction::Forward);
		assert!(matches!(
			Kernel::<f64>::build(key, usize::MAX / 8),
			Err(BuildFailure::Layout(_))
		));
	}

	#[test]
	fn unreservable_length_fails_before_planning() {
		// Passes the layout check but no allocator can provide it. Reaching a planner would abort.
		let length = isize::MAX as usize / 16;
		for kind in [
			TransformKind::Complex,
			TransformKind::Real,
			TransformKind::Hartley,
			TransformKind::Cosine,
		] {
			for direction in [Direction::Forward, Direction::Inverse] {
				assert!(
					matches!(
						Kernel::<f64>::build(PlanKey::new(kind, direction), length),
						Err(BuildFailure::Reserve(_))
					),
					"{kind:?}/{direction:?}"
				);
			}
		}
	}

	#[test]
	fn kernel_refuses_a_foreign_kind() {
		let mut kernel =
			Kernel::<f32>::build(PlanKey::new(TransformKind::Complex, Direction::Forward), 4).unwrap();
		let result = kernel.run_real(&[0.; 4], &mut [0.; 4]);
		assert!(matches!(result, Err(TransformError::NativeExecution(_))));
	}
}
