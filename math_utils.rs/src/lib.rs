pub mod mel;
pub mod moving_median;
