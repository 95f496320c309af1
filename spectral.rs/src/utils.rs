#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

/// Real-input spectra are conjugate-symmetric, only the non-redundant half is stored.
///
/// Even lengths include the Nyquist bin (`length / 2`), odd lengths have none.
#[must_use]
pub const fn half_spectrum_len(length: usize) -> usize {
	length / 2 + 1
}

#[must_use]
pub fn bin_to_frequency(bin: usize, sample_rate: f64, length: usize) -> f64 {
	bin as f64 * sample_rate / length as f64
}

/// Nearest bin of a `length`-point transform.
///
/// Negative frequencies saturate to bin 0.
#[must_use]
pub fn frequency_to_bin(frequency: f64, sample_rate: f64, length: usize) -> usize {
	(frequency / sample_rate * length as f64).round().max(0.) as usize
}

/// Frequencies of the half-spectrum bins, from DC up to (and including, for even lengths) Nyquist.
pub fn frequency_bins(sample_rate: f64, length: usize) -> impl Iterator<Item = f64> {
	(0..half_spectrum_len(length)).map(move |bin| bin_to_frequency(bin, sample_rate, length))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn half_spectrum_of_both_parities() {
		assert_eq!(half_spectrum_len(1), 1);
		assert_eq!(half_spectrum_len(2), 2);
		assert_eq!(half_spectrum_len(7), 4);
		assert_eq!(half_spectrum_len(8), 5);
	}

	#[test]
	fn frequency_to_bin_and_viceversa() {
		const SAMPLE_RATE: f64 = 44_100.;

		for length in [1, 2, 3, 64, 441, 1000, 4096] {
			for bin in 0..half_spectrum_len(length) {
				assert_eq!(
					bin,
					frequency_to_bin(bin_to_frequency(bin, SAMPLE_RATE, length), SAMPLE_RATE, length)
				);
			}
		}
	}

	#[test]
	fn bins_end_at_nyquist_for_even_lengths() {
		let bins: Vec<f64> = frequency_bins(8_000., 8).collect();
		assert_eq!(bins.len(), 5);
		assert!((bins[0]).abs() < f64::EPSILON);
		assert!((bins[4] - 4_000.).abs() < f64::EPSILON);

		let bins: Vec<f64> = frequency_bins(7_000., 7).collect();
		assert_eq!(bins.len(), 4);
		assert!(bins[3] < 3_500.);
	}
}
