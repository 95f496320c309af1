use rustfft::num_traits::AsPrimitive;

pub trait WindowingFn {
	/// Weight of sample `index` in a window of `n_of_samples` samples.
	fn ratio_at(&self, index: usize, n_of_samples: usize) -> f64;
}

/// Fills `window` with the weights of `windowing_fn`, one per element.
pub fn make_window<T>(windowing_fn: &impl WindowingFn, window: &mut [T])
where
	T: Copy + 'static,
	f64: AsPrimitive<T>,
{
	let n_of_samples = window.len();
	for (i, w) in window.iter_mut().enumerate() {
		*w = windowing_fn.ratio_at(i, n_of_samples).as_();
	}
}

/// Multiplies `signal` sample by sample with the weights of `windowing_fn`.
pub fn apply_window<T>(windowing_fn: &impl WindowingFn, signal: &mut [T])
where
	T: Copy + std::ops::MulAssign + 'static,
	f64: AsPrimitive<T>,
{
	let n_of_samples = signal.len();
	for (i, x) in signal.iter_mut().enumerate() {
		*x *= windowing_fn.ratio_at(i, n_of_samples).as_();
	}
}
