use rustfft::num_traits::Float;

/// Square wave generator, `+amplitude` during the first `duty` fraction of every period
/// and `-amplitude` during the rest.
///
/// The phase is accumulated in Hz (`frequency` per sample, wrapped at `sample_rate`), so with
/// integral rates it stays exact and a period lasts exactly `sample_rate / frequency` samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareOscillator<T> {
	amplitude: T,
	sample_rate: T,
	frequency: T,
	/// Phase, in Hz, at which the output flips to `-amplitude`.
	threshold: T,
	phase: T,
}

impl<T: Float> SquareOscillator<T> {
	/// `duty` is clamped to `[0, 1]`.
	#[must_use]
	pub fn new(amplitude: T, sample_rate: T, frequency: T, duty: T) -> Self {
		let mut oscillator = Self {
			amplitude,
			sample_rate,
			frequency,
			threshold: T::zero(),
			phase: T::zero(),
		};
		oscillator.set_duty(duty);
		oscillator
	}

	pub fn set_duty(&mut self, duty: T) {
		self.threshold = duty.max(T::zero()).min(T::one()) * self.sample_rate;
	}

	#[must_use]
	pub fn duty(&self) -> T {
		self.threshold / self.sample_rate
	}

	#[must_use]
	pub const fn amplitude(&self) -> T {
		self.amplitude
	}

	#[must_use]
	pub const fn frequency(&self) -> T {
		self.frequency
	}

	#[must_use]
	pub const fn sample_rate(&self) -> T {
		self.sample_rate
	}

	/// Restarts from the beginning of a period.
	pub fn reset(&mut self) {
		self.phase = T::zero();
	}

	pub fn fill(&mut self, buffer: &mut [T]) {
		for (x, value) in buffer.iter_mut().zip(self) {
			*x = value;
		}
	}
}

impl<T: Float> Iterator for SquareOscillator<T> {
	type Item = T;

	fn next(&mut self) -> Option<T> {
		let value = if self.phase < self.threshold {
			self.amplitude
		} else {
			-self.amplitude
		};
		self.phase = self.phase + self.frequency;
		if self.phase >= self.sample_rate {
			self.phase = self.phase - self.sample_rate;
		}
		Some(value)
	}
}

#[cfg(test)]
mod tests {
	use rustfft::num_complex::Complex;

	use super::*;
	use crate::TransformEngine;

	#[test]
	fn one_period_follows_the_duty_cycle() {
		let oscillator = SquareOscillator::new(2_f64, 8., 1., 0.25);
		let period: Vec<_> = oscillator.take(16).collect();
		assert_eq!(
			period,
			[2., 2., -2., -2., -2., -2., -2., -2., 2., 2., -2., -2., -2., -2., -2., -2.]
		);
	}

	fn rising_edge_intervals<T: Float>(oscillator: SquareOscillator<T>, samples: usize) -> Vec<usize> {
		let mut intervals = Vec::new();
		let mut previous = None;
		let mut last_edge = None;
		for (i, x) in oscillator.take(samples).enumerate() {
			if previous.is_some_and(|p: T| p < T::zero()) && x > T::zero() {
				if let Some(edge) = last_edge {
					intervals.push(i - edge);
				}
				last_edge = Some(i);
			}
			previous = Some(x);
		}
		intervals
	}

	#[test]
	fn period_is_exact_at_audio_rates() {
		for (sample_rate, frequency) in [(44_100., 100.), (48_000., 1_000.), (48_000., 480.)] {
			let expected = (sample_rate / frequency) as usize;

			let wide = rising_edge_intervals(SquareOscillator::new(1_f64, sample_rate, frequency, 0.5), 20_000);
			assert!(!wide.is_empty());
			assert!(wide.iter().all(|&p| p == expected), "f64 {sample_rate}/{frequency}: {wide:?}");

			let narrow = rising_edge_intervals(
				SquareOscillator::new(1_f32, sample_rate as f32, frequency as f32, 0.5),
				20_000,
			);
			assert!(!narrow.is_empty());
			assert!(narrow.iter().all(|&p| p == expected), "f32 {sample_rate}/{frequency}: {narrow:?}");
		}
	}

	#[test]
	fn duty_is_a_fraction_of_the_period() {
		let mut oscillator = SquareOscillator::new(1_f32, 44_100., 441., 0.5);
		assert!((oscillator.duty() - 0.5).abs() < 1e-6);
		oscillator.set_duty(0.75);
		assert!((oscillator.duty() - 0.75).abs() < 1e-6);
		oscillator.set_duty(3.);
		assert!((oscillator.duty() - 1.).abs() < 1e-6);
		assert!((oscillator.frequency() - 441.).abs() < 1e-3);
	}

	#[test]
	fn full_and_empty_duty_are_constant() {
		assert!(SquareOscillator::new(1_f64, 16., 2., 1.).take(32).all(|x| x > 0.));
		assert!(SquareOscillator::new(1_f64, 16., 2., 0.).take(32).all(|x| x < 0.));
	}

	#[test]
	fn reset_restarts_the_period() {
		let mut oscillator = SquareOscillator::new(1_f64, 4., 1., 0.5);
		let mut buffer = [0.; 3];
		oscillator.fill(&mut buffer);
		assert_eq!(buffer, [1., 1., -1.]);
		oscillator.reset();
		oscillator.fill(&mut buffer);
		assert_eq!(buffer, [1., 1., -1.]);
	}

	#[test]
	fn symmetric_square_wave_has_only_odd_harmonics() {
		let length = 64;
		let mut signal = vec![0.; length];
		SquareOscillator::new(1_f64, 64., 4., 0.5).fill(&mut signal);

		let mut engine = TransformEngine::<f64>::new(length).unwrap();
		let mut spectrum = vec![Complex::new(0., 0.); length / 2 + 1];
		engine.rdft(&signal, &mut spectrum).unwrap();

		assert!(spectrum[0].norm() < 1e-9);
		assert!(spectrum[4].norm() > 10.);
		assert!(spectrum[8].norm() < 1e-9);
		assert!(spectrum[12].norm() > 1.);
	}
}
