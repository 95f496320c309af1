use std::ops::DivAssign;

use rustfft::FftNum;

use crate::{error::check_len, BufferRole, Precision, TransformEngine, TransformError, TransformKind};

/// Factor by which a forward-then-inverse pair of `kind` scales a signal of `length` samples.
///
/// The cosine pair (DCT-II / DCT-III) scales by `2 * length`, every other kind by `length`.
#[must_use]
pub const fn normalization_factor(kind: TransformKind, length: usize) -> usize {
	match kind {
		TransformKind::Cosine => 2 * length,
		TransformKind::Complex | TransformKind::Real | TransformKind::Hartley => length,
	}
}

impl<T: Precision<N>, N: FftNum> TransformEngine<T, N> {
	/// Divides every element of `buffer` by [`normalization_factor`], undoing the scaling
	/// of an inverse transform. Works on real samples as well as on complex bins.
	///
	/// # Errors
	/// [`crate::LengthError::Mismatch`] if `buffer` doesn't hold exactly `length` elements.
	pub fn scale_inverse<S: DivAssign<T>>(&self, buffer: &mut [S], kind: TransformKind) -> Result<(), TransformError> {
		check_len(BufferRole::Scaled, self.length(), buffer.len())?;
		let factor = T::from_count(normalization_factor(kind, self.length()));
		for x in buffer {
			*x /= factor;
		}
		Ok(())
	}
}
