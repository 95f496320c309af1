#![allow(clippy::cast_possible_truncation)]

pub use rustfft::num_complex;

mod utils;
pub use utils::*;

#[cfg(feature = "transform")]
mod error;
#[cfg(feature = "transform")]
pub use error::*;

#[cfg(feature = "transform")]
mod precision;
#[cfg(feature = "transform")]
pub use precision::*;

#[cfg(feature = "transform")]
mod staging;
#[cfg(feature = "transform")]
pub use staging::{buffer_shape, BufferShape, Domain, Extent};

#[cfg(feature = "transform")]
mod kernel;

#[cfg(feature = "transform")]
pub mod plan;
#[cfg(feature = "transform")]
pub use plan::{Direction, PlanKey, TransformKind};

#[cfg(feature = "transform")]
mod engine;
#[cfg(feature = "transform")]
pub use engine::*;

#[cfg(feature = "transform")]
mod normalization;
#[cfg(feature = "transform")]
pub use normalization::*;

#[cfg(feature = "signals")]
mod windowing_fn;
#[cfg(feature = "signals")]
pub use windowing_fn::*;

#[cfg(feature = "signals")]
pub mod windowing_fns;

#[cfg(feature = "signals")]
pub mod oscillators;

#[cfg(feature = "signals")]
mod bandpass;
#[cfg(feature = "signals")]
pub use bandpass::*;

#[cfg(all(test, feature = "transform"))]
mod reference;
