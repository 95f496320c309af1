use std::fmt::{self, Display};

use crate::PlanKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferRole {
	Input,
	Output,
	Scaled,
}

impl Display for BufferRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Input => "input",
			Self::Output => "output",
			Self::Scaled => "scaled",
		})
	}
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthError {
	#[error("transform length must be at least 1")]
	Zero,
	#[error("{role} buffer holds {actual} elements, expected {expected}")]
	Mismatch {
		role: BufferRole,
		expected: usize,
		actual: usize,
	},
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
	#[error(transparent)]
	InvalidLength(#[from] LengthError),
	/// Fatal to `key` only, other plans of the same engine keep working.
	#[error("unable to build the {key} plan: {reason}")]
	PlanConstruction { key: PlanKey, reason: String },
	/// Fatal to the engine, see [`TransformError::EngineFailed`].
	#[error("native transform failed: {0}")]
	NativeExecution(String),
	#[error("engine is unusable after an earlier native failure")]
	EngineFailed,
}

pub(crate) fn check_len(role: BufferRole, expected: usize, actual: usize) -> Result<(), LengthError> {
	if expected == actual {
		Ok(())
	} else {
		Err(LengthError::Mismatch {
			role,
			expected,
			actual,
		})
	}
}
