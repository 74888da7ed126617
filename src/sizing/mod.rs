//! Position sizing: risk-budget quantity calculation and sizing defaults.

mod config;
mod sizer;

pub use config::SizingDefaults;
pub use sizer::{size_position, SizingError};
