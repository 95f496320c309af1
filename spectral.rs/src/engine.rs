use std::marker::PhantomData;

use rustfft::{num_complex::Complex, FftNum};

use crate::{
	buffer_shape,
	error::check_len,
	kernel::Kernel,
	plan::{BufferBinding, PlanCache},
	staging::Lane,
	BufferRole, Direction, LengthError, PlanKey, Precision, TransformError, TransformKind,
};

/// A transform context bound to one fixed length.
///
/// `T` is the precision the caller works in, `N` the precision the backend computes in.
/// When they differ, every transform is staged through native buffers owned by the plan.
///
/// Plans are built lazily, one per ([`TransformKind`], [`Direction`]), and reused by every
/// later call of the same kind. Inverse transforms are **not** normalized, see
/// [`TransformEngine::scale_inverse`].
///
/// An engine is not meant to be shared between threads (every transform takes `&mut self`),
/// but separate engines are fully independent and can be moved to different threads.
pub struct TransformEngine<T, N: FftNum = T> {
	length: usize,
	plans: PlanCache<N>,
	failed: bool,
	_precision: PhantomData<T>,
}

impl<T, N: FftNum> std::fmt::Debug for TransformEngine<T, N> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct(&format!(
			"TransformEngine<{}, {}>",
			std::any::type_name::<T>(),
			std::any::type_name::<N>()
		))
		.field("length", &self.length)
		.field("plans", &self.plans)
		.field("failed", &self.failed)
		.finish()
	}
}

impl<T: Precision<N>, N: FftNum> TransformEngine<T, N> {
	/// # Errors
	/// [`LengthError::Zero`] if `length` is 0.
	pub fn new(length: usize) -> Result<Self, TransformError> {
		if length == 0 {
			return Err(LengthError::Zero.into());
		}
		Ok(Self {
			length,
			plans: PlanCache::new(length),
			failed: false,
			_precision: PhantomData,
		})
	}

	#[must_use]
	pub const fn length(&self) -> usize {
		self.length
	}

	/// Whether transforms copy through native-precision staging buffers.
	#[must_use]
	pub const fn is_staged(&self) -> bool {
		T::STAGED
	}

	/// Number of plans currently alive.
	#[must_use]
	pub fn planned(&self) -> usize {
		self.plans.planned()
	}

	/// Number of plans built so far. Stays put when a kind is executed again.
	#[must_use]
	pub const fn plan_builds(&self) -> usize {
		self.plans.builds()
	}

	#[must_use]
	pub fn binding(&self, kind: TransformKind, direction: Direction) -> Option<BufferBinding> {
		self.plans.binding(plan_key(kind, direction))
	}

	/// Builds the plan for `kind`/`direction` ahead of the first transform.
	///
	/// # Errors
	/// [`TransformError::PlanConstruction`] if the backend rejects the plan.
	pub fn prepare(&mut self, kind: TransformKind, direction: Direction) -> Result<(), TransformError> {
		self.plans.ensure(plan_key(kind, direction), T::STAGED)?;
		Ok(())
	}

	/// Forward complex DFT.
	///
	/// # Errors
	/// - [`TransformError::InvalidLength`] if either buffer doesn't hold `length` samples;
	/// - [`TransformError::PlanConstruction`] if the plan cannot be built;
	/// - [`TransformError::NativeExecution`] / [`TransformError::EngineFailed`].
	pub fn dft(&mut self, input: &[Complex<T>], output: &mut [Complex<T>]) -> Result<(), TransformError> {
		self.dispatch(
			PlanKey::new(TransformKind::Complex, Direction::Forward),
			input,
			output,
			Kernel::run_complex,
		)
	}

	/// Inverse complex DFT, scaled by `length`.
	///
	/// # Errors
	/// See [`TransformEngine::dft`].
	pub fn idft(&mut self, input: &[Complex<T>], output: &mut [Complex<T>]) -> Result<(), TransformError> {
		self.dispatch(
			PlanKey::new(TransformKind::Complex, Direction::Inverse),
			input,
			output,
			Kernel::run_complex,
		)
	}

	/// Forward DFT of a real signal. `output` holds the `length / 2 + 1` non-redundant bins.
	///
	/// # Errors
	/// See [`TransformEngine::dft`].
	pub fn rdft(&mut self, input: &[T], output: &mut [Complex<T>]) -> Result<(), TransformError> {
		self.dispatch(
			PlanKey::new(TransformKind::Real, Direction::Forward),
			input,
			output,
			Kernel::run_real_forward,
		)
	}

	/// Inverse of [`TransformEngine::rdft`], scaled by `length`.
	///
	/// The imaginary parts of the DC bin and, for even lengths, of the Nyquist bin are ignored.
	///
	/// # Errors
	/// See [`TransformEngine::dft`].
	pub fn irdft(&mut self, input: &[Complex<T>], output: &mut [T]) -> Result<(), TransformError> {
		self.dispatch(
			PlanKey::new(TransformKind::Real, Direction::Inverse),
			input,
			output,
			Kernel::run_real_inverse,
		)
	}

	/// Discrete Hartley transform. Applying it twice scales the signal by `length`.
	///
	/// # Errors
	/// See [`TransformEngine::dft`].
	pub fn dht(&mut self, input: &[T], output: &mut [T]) -> Result<(), TransformError> {
		self.dispatch(
			PlanKey::new(TransformKind::Hartley, Direction::Forward),
			input,
			output,
			Kernel::run_real,
		)
	}

	/// DCT-II, `Y[k] = 2 Σ x[n] cos(π(2n+1)k / 2N)`.
	///
	/// # Errors
	/// See [`TransformEngine::dft`].
	pub fn dct(&mut self, input: &[T], output: &mut [T]) -> Result<(), TransformError> {
		self.dispatch(
			PlanKey::new(TransformKind::Cosine, Direction::Forward),
			input,
			output,
			Kernel::run_real,
		)
	}

	/// DCT-III, the inverse of [`TransformEngine::dct`] scaled by `2 * length`.
	///
	/// # Errors
	/// See [`TransformEngine::dft`].
	pub fn idct(&mut self, input: &[T], output: &mut [T]) -> Result<(), TransformError> {
		self.dispatch(
			PlanKey::new(TransformKind::Cosine, Direction::Inverse),
			input,
			output,
			Kernel::run_real,
		)
	}

	fn dispatch<I, O, F>(
		&mut self,
		key: PlanKey,
		input: &[I],
		output: &mut [O],
		run: F,
	) -> Result<(), TransformError>
	where
		I: Lane<T, N>,
		O: Lane<T, N>,
		F: FnOnce(&mut Kernel<N>, &[I::Native], &mut [O::Native]) -> Result<(), TransformError>,
	{
		if self.failed {
			return Err(TransformError::EngineFailed);
		}

		let shape = buffer_shape(key, self.length);
		check_len(BufferRole::Input, shape.input.len, input.len())?;
		check_len(BufferRole::Output, shape.output.len, output.len())?;

		let plan = self.plans.ensure(key, T::STAGED)?;
		if let Err(err) = plan.execute::<T, I, O, F>(input, output, run) {
			log::error!("{key} transform failed, engine of length {} is no longer usable: {err}", self.length);
			self.failed = true;
			output.fill(O::poisoned());
			return Err(err);
		}
		Ok(())
	}
}

/// Hartley is its own inverse, both directions share one plan.
const fn plan_key(kind: TransformKind, direction: Direction) -> PlanKey {
	match kind {
		TransformKind::Hartley => PlanKey::new(kind, Direction::Forward),
		_ => PlanKey::new(kind, direction),
	}
}
