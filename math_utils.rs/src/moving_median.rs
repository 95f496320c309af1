use std::cmp::Ordering;

use ringbuffer::{AllocRingBuffer, RingBuffer};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovingMedianError {
	#[error("moving median window must hold at least one sample")]
	EmptyWindow,
}

/// Value halfway between two samples, used for windows holding an even number of samples.
pub trait Midpoint {
	#[must_use]
	fn midpoint(self, rhs: Self) -> Self;
}

macro_rules! impl_midpoint_for_float {
	($($t:ty),+) => {
		$(
			impl Midpoint for $t {
				fn midpoint(self, rhs: Self) -> Self {
					(self + rhs) / 2.
				}
			}
		)+
	};
}

macro_rules! impl_midpoint_for_integer {
	($($t:ty),+) => {
		$(
			impl Midpoint for $t {
				fn midpoint(self, rhs: Self) -> Self {
					self / 2 + rhs / 2 + (self % 2 + rhs % 2) / 2
				}
			}
		)+
	};
}

impl_midpoint_for_float!(f32, f64);
impl_midpoint_for_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Median over the last `window_size` samples.
///
/// Until the window fills up, the median is computed over the samples seen so far.
#[derive(Debug, Clone)]
pub struct MovingMedian<T> {
	series: AllocRingBuffer<T>,
	sorted: Vec<T>,
}

impl<T: Copy + PartialOrd + Midpoint> MovingMedian<T> {
	/// # Errors
	/// [`MovingMedianError::EmptyWindow`] if `window_size` is 0.
	pub fn new(window_size: usize) -> Result<Self, MovingMedianError> {
		if window_size == 0 {
			return Err(MovingMedianError::EmptyWindow);
		}
		Ok(Self {
			series: AllocRingBuffer::new(window_size),
			sorted: Vec::with_capacity(window_size),
		})
	}

	#[must_use]
	pub fn window_size(&self) -> usize {
		self.series.capacity()
	}

	#[must_use]
	pub fn is_window_full(&self) -> bool {
		self.series.is_full()
	}

	/// Pushes `tick` into the window, evicting the oldest sample if full, and returns the new median.
	pub fn push(&mut self, tick: T) -> T {
		self.series.push(tick);

		self.sorted.clear();
		self.sorted.extend(self.series.iter().copied());
		// NaN compares as equal to everything, it just ends up somewhere in the middle
		self.sorted
			.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

		let mid = self.sorted.len() / 2;
		if self.sorted.len() % 2 == 0 {
			self.sorted[mid - 1].midpoint(self.sorted[mid])
		} else {
			self.sorted[mid]
		}
	}

	/// Pushes every sample of `input` in order, storing each running median in `output`.
	pub fn filter(&mut self, input: &[T], output: &mut [T]) {
		for (y, &x) in output.iter_mut().zip(input) {
			*y = self.push(x);
		}
	}

	pub fn reset(&mut self) {
		self.series.clear();
	}

	/// Changes the window size, keeping the most recent samples that still fit.
	///
	/// # Errors
	/// [`MovingMedianError::EmptyWindow`] if `window_size` is 0, the filter is left untouched.
	pub fn resize(&mut self, window_size: usize) -> Result<(), MovingMedianError> {
		if window_size == 0 {
			return Err(MovingMedianError::EmptyWindow);
		}
		let mut series = AllocRingBuffer::new(window_size);
		for &x in self.series.iter() {
			series.push(x);
		}
		self.series = series;
		self.sorted = Vec::with_capacity(window_size);
		Ok(())
	}
}
