//! Post-processing of solver output for runs on the generated channel.
//!
//! Each submodule turns raw solver artifacts into [`Table`](crate::io::table::Table)s
//! that can be written next to the case.

pub mod coefficients;
pub mod distribution;
pub mod residuals;

pub use coefficients::{CoefficientHistory, parse_coefficients};
pub use distribution::{LiftDistribution, accumulate, relative_error_percent, trapezoid};
pub use residuals::{ResidualHistory, parse_residuals};
