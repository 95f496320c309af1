use std::ops::RangeInclusive;

use rustfft::{num_complex::Complex, num_traits::Zero, FftNum};

use crate::{frequency_bins, half_spectrum_len, Precision, TransformEngine, TransformError, TransformKind};

/// Brick-wall bandpass over blocks of `length` samples: every bin outside the pass band is zeroed.
#[derive(Debug)]
pub struct DftBandpass<T, N: FftNum = T> {
	engine: TransformEngine<T, N>,
	sample_rate: f64,
	band: RangeInclusive<f64>,
	spectrum: Vec<Complex<T>>,
}

impl<T: Precision<N>, N: FftNum> DftBandpass<T, N> {
	/// Keeps the bins whose frequency, in Hz, falls within `band`.
	///
	/// # Errors
	/// [`crate::LengthError::Zero`] if `length` is 0.
	pub fn new(length: usize, sample_rate: f64, band: RangeInclusive<f64>) -> Result<Self, TransformError> {
		Ok(Self {
			engine: TransformEngine::new(length)?,
			sample_rate,
			band,
			spectrum: vec![Complex::zero(); half_spectrum_len(length)],
		})
	}

	#[must_use]
	pub const fn band(&self) -> &RangeInclusive<f64> {
		&self.band
	}

	pub fn set_band(&mut self, band: RangeInclusive<f64>) {
		self.band = band;
	}

	/// # Errors
	/// See [`TransformEngine::rdft`].
	pub fn filter(&mut self, input: &[T], output: &mut [T]) -> Result<(), TransformError> {
		self.engine.rdft(input, &mut self.spectrum)?;

		let length = self.engine.length();
		for (bin, frequency) in self.spectrum.iter_mut().zip(frequency_bins(self.sample_rate, length)) {
			if !self.band.contains(&frequency) {
				*bin = Complex::zero();
			}
		}

		self.engine.irdft(&self.spectrum, output)?;
		self.engine.scale_inverse(output, TransformKind::Real)
	}
}
