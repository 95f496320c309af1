//! Hertz ↔ mel conversions.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MelBase {
	/// `m = 2595 log10(1 + f / 700)`
	#[default]
	Ten,
	/// `m = 1127.01048 ln(1 + f / 700)`
	E,
}

pub trait MelScale: Sized {
	#[must_use]
	fn hertz_to_mel(self, base: MelBase) -> Self;

	#[must_use]
	fn mel_to_hertz(self, base: MelBase) -> Self;
}

macro_rules! impl_mel_scale_for {
	($($t:ty),+) => {
		$(
			impl MelScale for $t {
				fn hertz_to_mel(self, base: MelBase) -> Self {
					match base {
						MelBase::Ten => 2595. * (1. + self / 700.).log10(),
						MelBase::E => 1127.010_48 * (1. + self / 700.).ln(),
					}
				}

				fn mel_to_hertz(self, base: MelBase) -> Self {
					match base {
						MelBase::Ten => 700. * (10. as $t).powf(self / 2595.) - 700.,
						MelBase::E => 700. * ((self / 1127.010_48).exp() - 1.),
					}
				}
			}
		)+
	};
}

impl_mel_scale_for!(f32, f64);

#[must_use]
pub fn hertz_to_mel<T: MelScale>(hertz: T, base: MelBase) -> T {
	hertz.hertz_to_mel(base)
}

#[must_use]
pub fn mel_to_hertz<T: MelScale>(mel: T, base: MelBase) -> T {
	mel.mel_to_hertz(base)
}
