//! Lazily built, per-engine transform plans.

use std::fmt::{self, Display};

use hashbrown::{hash_map::Entry, HashMap};
use rustfft::FftNum;

use crate::{
	buffer_shape,
	kernel::Kernel,
	staging::{stage_in, stage_out, Lane, StagingBuffer},
	Precision, TransformError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransformKind {
	/// Complex-to-complex DFT.
	Complex,
	/// Real input, half-spectrum output (and its inverse).
	Real,
	/// Discrete Hartley transform, its own inverse up to scaling.
	Hartley,
	/// DCT-II forward, DCT-III inverse.
	Cosine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
	Forward,
	Inverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlanKey {
	pub kind: TransformKind,
	pub direction: Direction,
}

impl PlanKey {
	#[must_use]
	pub const fn new(kind: TransformKind, direction: Direction) -> Self {
		Self { kind, direction }
	}
}

impl Display for PlanKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:?}/{:?}", self.kind, self.direction)
	}
}

/// Memory a plan is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferBinding {
	/// Executes on whatever caller buffers are passed in.
	Caller,
	/// Executes against the staging buffers allocated with the plan; addresses never change.
	Staging { input: usize, output: usize },
}

#[derive(Debug)]
pub(crate) struct Staging<N> {
	input: StagingBuffer<N>,
	output: StagingBuffer<N>,
}

impl<N: FftNum> Staging<N> {
	fn binding(&self) -> BufferBinding {
		BufferBinding::Staging {
			input: self.input.address(),
			output: self.output.address(),
		}
	}
}

#[derive(Debug)]
pub struct TransformPlan<N: FftNum> {
	key: PlanKey,
	kernel: Kernel<N>,
	staging: Option<Staging<N>>,
	binding: BufferBinding,
}

impl<N: FftNum> TransformPlan<N> {
	/// # Errors
	/// [`TransformError::PlanConstruction`] when the backend cannot allocate or configure
	/// a plan of `length` samples.
	pub fn build(key: PlanKey, length: usize, staged: bool) -> Result<Self, TransformError> {
		let construction = |reason: String| TransformError::PlanConstruction { key, reason };

		let kernel = Kernel::build(key, length).map_err(|failure| construction(failure.to_string()))?;

		let staging = if staged {
			let shape = buffer_shape(key, length);
			Some(Staging {
				input: StagingBuffer::allocate(shape.input)
					.map_err(|err| construction(err.to_string()))?,
				output: StagingBuffer::allocate(shape.output)
					.map_err(|err| construction(err.to_string()))?,
			})
		} else {
			None
		};
		let binding = staging.as_ref().map_or(BufferBinding::Caller, Staging::binding);

		log::debug!("built {key} plan for {length} samples ({binding:?})");

		Ok(Self {
			key,
			kernel,
			staging,
			binding,
		})
	}

	#[must_use]
	pub const fn binding(&self) -> BufferBinding {
		self.binding
	}

	/// Runs the kernel on the caller buffers, going through the staging buffers when
	/// the caller precision is not the native one.
	pub(crate) fn execute<T, I, O, F>(
		&mut self,
		input: &[I],
		output: &mut [O],
		run: F,
	) -> Result<(), TransformError>
	where
		T: Precision<N>,
		I: Lane<T, N>,
		O: Lane<T, N>,
		F: FnOnce(&mut Kernel<N>, &[I::Native], &mut [O::Native]) -> Result<(), TransformError>,
	{
		if let (Some(native_input), Some(native_output)) = (I::view(input), O::view_mut(output)) {
			return run(&mut self.kernel, native_input, native_output);
		}

		let Some(staging) = self.staging.as_mut() else {
			return Err(TransformError::NativeExecution(format!(
				"{} plan has no staging buffers",
				self.key
			)));
		};
		debug_assert_eq!(
			staging.binding(),
			self.binding,
			"staged plan executed against rebound buffers"
		);

		stage_in::<T, N, I>(input, &mut staging.input)?;
		let (Some(staged_input), Some(staged_output)) = (
			I::side(&mut staging.input),
			O::side(&mut staging.output),
		) else {
			return Err(TransformError::NativeExecution(format!(
				"{} plan has mismatched staging buffers",
				self.key
			)));
		};
		run(&mut self.kernel, &*staged_input, staged_output)?;
		stage_out::<T, N, O>(&mut staging.output, output)
	}
}

enum PlanSlot<N: FftNum> {
	Ready(TransformPlan<N>),
	Failed(TransformError),
}

/// At most one plan per [`PlanKey`], built on first use and kept until the cache is dropped.
///
/// Failed constructions are remembered and replayed, never retried.
pub struct PlanCache<N: FftNum> {
	length: usize,
	slots: HashMap<PlanKey, PlanSlot<N>>,
	builds: usize,
}

impl<N: FftNum> std::fmt::Debug for PlanCache<N> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PlanCache")
			.field("length", &self.length)
			.field("planned", &self.planned())
			.field("builds", &self.builds)
			.finish()
	}
}

impl<N: FftNum> PlanCache<N> {
	#[must_use]
	pub fn new(length: usize) -> Self {
		Self {
			length,
			slots: HashMap::new(),
			builds: 0,
		}
	}

	/// # Errors
	/// [`TransformError::PlanConstruction`], either fresh or replayed from an earlier attempt.
	pub fn ensure(&mut self, key: PlanKey, staged: bool) -> Result<&mut TransformPlan<N>, TransformError> {
		self.ensure_with(key, |key, length| TransformPlan::build(key, length, staged))
	}

	/// Like [`PlanCache::ensure`] with a custom plan builder, called at most once per key.
	///
	/// # Errors
	/// Whatever `build` returned the first time it was called for `key`.
	pub fn ensure_with<F>(&mut self, key: PlanKey, build: F) -> Result<&mut TransformPlan<N>, TransformError>
	where
		F: FnOnce(PlanKey, usize) -> Result<TransformPlan<N>, TransformError>,
	{
		let length = self.length;
		let slot = match self.slots.entry(key) {
			Entry::Occupied(entry) => {
				let slot = entry.into_mut();
				if let PlanSlot::Failed(err) = slot {
					log::warn!("{key} plan previously failed to build, not retrying: {err}");
				}
				slot
			}
			Entry::Vacant(entry) => entry.insert(match build(key, length) {
				Ok(plan) => {
					self.builds += 1;
					PlanSlot::Ready(plan)
				}
				Err(err) => {
					log::warn!("{key} plan construction failed: {err}");
					PlanSlot::Failed(err)
				}
			}),
		};

		match slot {
			PlanSlot::Ready(plan) => Ok(plan),
			PlanSlot::Failed(err) => Err(err.clone()),
		}
	}

	/// Number of usable plans.
	#[must_use]
	pub fn planned(&self) -> usize {
		self.slots
			.values()
			.filter(|slot| matches!(slot, PlanSlot::Ready(_)))
			.count()
	}

	/// Number of successful plan constructions since the cache was created.
	#[must_use]
	pub const fn builds(&self) -> usize {
		self.builds
	}

	#[must_use]
	pub fn binding(&self, key: PlanKey) -> Option<BufferBinding> {
		match self.slots.get(&key) {
			Some(PlanSlot::Ready(plan)) => Some(plan.binding()),
			_ => None,
		}
	}
}
