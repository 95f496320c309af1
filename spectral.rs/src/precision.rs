//! Working precision vs. native precision.
//!
//! Callers work in `T`, the backend computes in `N`. When both are the same type the
//! caller's slices are handed to the backend as they are, otherwise every transform
//! goes through the plan's staging buffers.

#![allow(clippy::cast_precision_loss)]

use std::fmt::Debug;

use rustfft::{
	num_complex::Complex,
	num_traits::{Float, NumAssign},
	FftNum,
};

pub trait Precision<N: FftNum>: Float + NumAssign + Debug + Send + Sync + 'static {
	/// `true` when `Self` and `N` differ, i.e. data must be copied into native buffers.
	const STAGED: bool;

	#[must_use]
	fn to_native(self) -> N;

	#[must_use]
	fn from_native(value: N) -> Self;

	#[must_use]
	fn from_count(count: usize) -> Self;

	fn real_view(buffer: &[Self]) -> Option<&[N]>;

	fn real_view_mut(buffer: &mut [Self]) -> Option<&mut [N]>;

	fn complex_view(buffer: &[Complex<Self>]) -> Option<&[Complex<N>]>;

	fn complex_view_mut(buffer: &mut [Complex<Self>]) -> Option<&mut [Complex<N>]>;
}

macro_rules! impl_direct_precision_for {
	($t:ty) => {
		impl Precision<$t> for $t {
			const STAGED: bool = false;

			fn to_native(self) -> $t {
				self
			}

			fn from_native(value: $t) -> Self {
				value
			}

			fn from_count(count: usize) -> Self {
				count as Self
			}

			fn real_view(buffer: &[Self]) -> Option<&[$t]> {
				Some(buffer)
			}

			fn real_view_mut(buffer: &mut [Self]) -> Option<&mut [$t]> {
				Some(buffer)
			}

			fn complex_view(buffer: &[Complex<Self>]) -> Option<&[Complex<$t>]> {
				Some(buffer)
			}

			fn complex_view_mut(buffer: &mut [Complex<Self>]) -> Option<&mut [Complex<$t>]> {
				Some(buffer)
			}
		}
	};
	($t:ty, $($others:ty),+) => {
		impl_direct_precision_for!($t);
		impl_direct_precision_for!($($others),+);
	};
}

macro_rules! impl_staged_precision_for {
	($working:ty => $native:ty) => {
		impl Precision<$native> for $working {
			const STAGED: bool = true;

			fn to_native(self) -> $native {
				self as $native
			}

			fn from_native(value: $native) -> Self {
				value as Self
			}

			fn from_count(count: usize) -> Self {
				count as Self
			}

			fn real_view(_buffer: &[Self]) -> Option<&[$native]> {
				None
			}

			fn real_view_mut(_buffer: &mut [Self]) -> Option<&mut [$native]> {
				None
			}

			fn complex_view(_buffer: &[Complex<Self>]) -> Option<&[Complex<$native>]> {
				None
			}

			fn complex_view_mut(_buffer: &mut [Complex<Self>]) -> Option<&mut [Complex<$native>]> {
				None
			}
		}
	};
}

impl_direct_precision_for!(f32, f64);
impl_staged_precision_for!(f32 => f64);
impl_staged_precision_for!(f64 => f32);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn staging_is_only_required_across_precisions() {
		assert!(!<f32 as Precision<f32>>::STAGED);
		assert!(!<f64 as Precision<f64>>::STAGED);
		assert!(<f32 as Precision<f64>>::STAGED);
		assert!(<f64 as Precision<f32>>::STAGED);
	}

	#[test]
	fn direct_views_alias_the_caller_buffer() {
		let buffer = [1.0_f64, 2.0, 3.0];
		let view = <f64 as Precision<f64>>::real_view(&buffer).unwrap();
		assert_eq!(view.as_ptr(), buffer.as_ptr());
		assert!(<f32 as Precision<f64>>::real_view(&[1.0_f32]).is_none());
	}

	#[test]
	fn narrowing_conversion_rounds_to_nearest() {
		let value = <f64 as Precision<f32>>::to_native(0.1);
		assert!((f64::from(value) - 0.1).abs() < 1e-8);
		assert!((<f32 as Precision<f64>>::from_native(0.25) - 0.25).abs() < f32::EPSILON);
	}
}
