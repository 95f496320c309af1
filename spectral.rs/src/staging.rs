use std::collections::TryReserveError;

use rustfft::{
	num_complex::Complex,
	num_traits::{Float, Zero},
	FftNum,
};

use crate::{half_spectrum_len, Direction, PlanKey, Precision, TransformError, TransformKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
	Real,
	Complex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
	pub domain: Domain,
	pub len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferShape {
	pub input: Extent,
	pub output: Extent,
}

/// The exact buffer sizes a transform of `length` samples consumes and produces.
#[must_use]
pub const fn buffer_shape(key: PlanKey, length: usize) -> BufferShape {
	let full_real = Extent {
		domain: Domain::Real,
		len: length,
	};
	let full_complex = Extent {
		domain: Domain::Complex,
		len: length,
	};
	let half_complex = Extent {
		domain: Domain::Complex,
		len: half_spectrum_len(length),
	};

	match (key.kind, key.direction) {
		(TransformKind::Complex, _) => BufferShape {
			input: full_complex,
			output: full_complex,
		},
		(TransformKind::Real, Direction::Forward) => BufferShape {
			input: full_real,
			output: half_complex,
		},
		(TransformKind::Real, Direction::Inverse) => BufferShape {
			input: half_complex,
			output: full_real,
		},
		(TransformKind::Hartley | TransformKind::Cosine, _) => BufferShape {
			input: full_real,
			output: full_real,
		},
	}
}

pub(crate) fn reserve_filled<E: Clone>(len: usize, value: E) -> Result<Vec<E>, TryReserveError> {
	let mut buffer = Vec::new();
	buffer.try_reserve_exact(len)?;
	buffer.resize(len, value);
	Ok(buffer)
}

/// Native-precision copy of one side (input or output) of a transform.
#[derive(Debug)]
pub(crate) enum StagingBuffer<N> {
	Real(Vec<N>),
	Complex(Vec<Complex<N>>),
}

impl<N: FftNum> StagingBuffer<N> {
	pub(crate) fn allocate(extent: Extent) -> Result<Self, TryReserveError> {
		Ok(match extent.domain {
			Domain::Real => Self::Real(reserve_filled(extent.len, N::zero())?),
			Domain::Complex => Self::Complex(reserve_filled(extent.len, Complex::zero())?),
		})
	}

	pub(crate) fn address(&self) -> usize {
		match self {
			Self::Real(buffer) => buffer.as_ptr() as usize,
			Self::Complex(buffer) => buffer.as_ptr() as usize,
		}
	}
}

/// Element type of a caller buffer: either a real sample `T` or a complex `Complex<T>`.
///
/// Knows how to view itself as native memory (same precision) or how to
/// convert element-wise into and out of a [`StagingBuffer`].
pub(crate) trait Lane<T: Precision<N>, N: FftNum>: Copy {
	type Native: Copy;

	fn view(buffer: &[Self]) -> Option<&[Self::Native]>;

	fn view_mut(buffer: &mut [Self]) -> Option<&mut [Self::Native]>;

	fn stage(self) -> Self::Native;

	fn unstage(value: Self::Native) -> Self;

	/// Value written over the output of a failed transform.
	fn poisoned() -> Self;

	fn side(buffer: &mut StagingBuffer<N>) -> Option<&mut [Self::Native]>;
}

impl<T: Precision<N>, N: FftNum> Lane<T, N> for T {
	type Native = N;

	fn view(buffer: &[Self]) -> Option<&[N]> {
		T::real_view(buffer)
	}

	fn view_mut(buffer: &mut [Self]) -> Option<&mut [N]> {
		T::real_view_mut(buffer)
	}

	fn stage(self) -> N {
		self.to_native()
	}

	fn unstage(value: N) -> Self {
		T::from_native(value)
	}

	fn poisoned() -> Self {
		T::nan()
	}

	fn side(buffer: &mut StagingBuffer<N>) -> Option<&mut [N]> {
		match buffer {
			StagingBuffer::Real(buffer) => Some(buffer),
			StagingBuffer::Complex(_) => None,
		}
	}
}

impl<T: Precision<N>, N: FftNum> Lane<T, N> for Complex<T> {
	type Native = Complex<N>;

	fn view(buffer: &[Self]) -> Option<&[Complex<N>]> {
		T::complex_view(buffer)
	}

	fn view_mut(buffer: &mut [Self]) -> Option<&mut [Complex<N>]> {
		T::complex_view_mut(buffer)
	}

	fn stage(self) -> Complex<N> {
		Complex::new(self.re.to_native(), self.im.to_native())
	}

	fn unstage(value: Complex<N>) -> Self {
		Complex::new(T::from_native(value.re), T::from_native(value.im))
	}

	fn poisoned() -> Self {
		Complex::new(T::nan(), T::nan())
	}

	fn side(buffer: &mut StagingBuffer<N>) -> Option<&mut [Complex<N>]> {
		match buffer {
			StagingBuffer::Complex(buffer) => Some(buffer),
			StagingBuffer::Real(_) => None,
		}
	}
}

/// Copies `source` into the staging side selected by `S`, converting to native precision.
pub(crate) fn stage_in<T, N, S>(
	source: &[S],
	staging: &mut StagingBuffer<N>,
) -> Result<(), TransformError>
where
	T: Precision<N>,
	N: FftNum,
	S: Lane<T, N>,
{
	let target = S::side(staging).ok_or_else(layout_mismatch)?;
	for (dst, &src) in target.iter_mut().zip(source) {
		*dst = src.stage();
	}
	Ok(())
}

/// Copies the staging side selected by `S` back into `target`, converting to working precision.
pub(crate) fn stage_out<T, N, S>(
	staging: &mut StagingBuffer<N>,
	target: &mut [S],
) -> Result<(), TransformError>
where
	T: Precision<N>,
	N: FftNum,
	S: Lane<T, N>,
{
	let source = S::side(staging).ok_or_else(layout_mismatch)?;
	for (dst, &src) in target.iter_mut().zip(source.iter()) {
		*dst = S::unstage(src);
	}
	Ok(())
}

fn layout_mismatch() -> TransformError {
	TransformError::NativeExecution("staging buffer layout does not match the transform".into())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn shapes_follow_the_transform_kind() {
		let forward_real = buffer_shape(PlanKey::new(TransformKind::Real, Direction::Forward), 9);
		assert_eq!(
			forward_real.input,
			Extent {
				domain: Domain::Real,
				len: 9
			}
		);
		assert_eq!(
			forward_real.output,
			Extent {
				domain: Domain::Complex,
				len: 5
			}
		);

		let inverse_real = buffer_shape(PlanKey::new(TransformKind::Real, Direction::Inverse), 10);
		assert_eq!(inverse_real.input.len, 6);
		assert_eq!(inverse_real.output.len, 10);

		let cosine = buffer_shape(PlanKey::new(TransformKind::Cosine, Direction::Inverse), 10);
		assert_eq!(cosine.input, cosine.output);
		assert_eq!(cosine.input.domain, Domain::Real);
	}

	#[test]
	fn staging_round_trip_converts_precision() {
		let mut staging = StagingBuffer::<f64>::allocate(Extent {
			domain: Domain::Complex,
			len: 3,
		})
		.unwrap();
		let source = [
			Complex::new(1.5_f32, -2.0),
			Complex::new(0.25, 0.0),
			Complex::new(-3.0, 8.0),
		];
		stage_in::<f32, f64, _>(&source, &mut staging).unwrap();

		let mut target = [Complex::new(0.0_f32, 0.0); 3];
		stage_out::<f32, f64, _>(&mut staging, &mut target).unwrap();
		assert_eq!(source, target);
	}

	#[test]
	fn mismatched_staging_side_is_reported() {
		let mut staging = StagingBuffer::<f64>::allocate(Extent {
			domain: Domain::Real,
			len: 2,
		})
		.unwrap();
		let result = stage_in::<f32, f64, _>(&[Complex::new(1.0_f32, 0.0)], &mut staging);
		assert!(matches!(result, Err(TransformError::NativeExecution(_))));
	}
}
