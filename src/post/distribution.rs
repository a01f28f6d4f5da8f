//! Sectional lift along a slicing axis.
//!
//! Slices are sampled at a fixed `step`; the accumulated curve is the running
//! rectangle sum `Σ lift·step`, and the integrated total uses the trapezoid
//! rule over the sample positions.

use std::path::Path;

use crate::io::table::Table;
use crate::mesh_error::{MeshError, MeshResult};

/// Header of the accumulated-lift table.
pub const ACCUMULATED_COLUMNS: [&str; 2] = ["x (m)", "Accumulated Lift (N)"];
/// Header of the lift-distribution table.
pub const DISTRIBUTION_COLUMNS: [&str; 2] = ["x (m)", "Lift (N)"];

/// Running sum of `lift[i] * step`.
pub fn accumulate(lift: &[f64], step: f64) -> Vec<f64> {
    lift.iter()
        .scan(0.0, |acc, l| {
            *acc += l * step;
            Some(*acc)
        })
        .collect()
}

/// Trapezoid-rule integral of `y` over `x`.
///
/// # Example
/// ```
/// use bend_mesh::post::trapezoid;
/// let area = trapezoid(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0]).unwrap();
/// assert!((area - 1.0).abs() < 1e-12);
/// ```
pub fn trapezoid(x: &[f64], y: &[f64]) -> MeshResult<f64> {
    if x.len() != y.len() {
        return Err(MeshError::TableParse {
            line: 0,
            message: format!("{} positions for {} samples", x.len(), y.len()),
        });
    }
    Ok(x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| 0.5 * (xs[1] - xs[0]) * (ys[0] + ys[1]))
        .sum())
}

/// `(integrated - direct) / direct * 100`, or `None` when `direct` is zero.
pub fn relative_error_percent(integrated: f64, direct: f64) -> Option<f64> {
    if direct == 0.0 {
        None
    } else {
        Some((integrated - direct) / direct * 100.0)
    }
}

/// Lift sampled at evenly spaced slice positions.
#[derive(Clone, Debug, PartialEq)]
pub struct LiftDistribution {
    pub x: Vec<f64>,
    pub lift: Vec<f64>,
    pub step: f64,
}

impl LiftDistribution {
    pub fn new(x: Vec<f64>, lift: Vec<f64>, step: f64) -> MeshResult<Self> {
        if x.len() != lift.len() {
            return Err(MeshError::TableParse {
                line: 0,
                message: format!("{} positions for {} samples", x.len(), lift.len()),
            });
        }
        if !(step.is_finite() && step > 0.0) {
            return Err(MeshError::configuration(format!(
                "slice step must be positive, got {step}"
            )));
        }
        Ok(Self { x, lift, step })
    }

    /// Use the first two columns of `table` as position and lift.
    pub fn from_table(table: &Table, step: f64) -> MeshResult<Self> {
        let (Some(x), Some(lift)) = (table.column(0), table.column(1)) else {
            return Err(MeshError::TableParse {
                line: 0,
                message: "distribution needs two columns".into(),
            });
        };
        Self::new(x, lift, step)
    }

    pub fn read<P: AsRef<Path>>(path: P, step: f64) -> MeshResult<Self> {
        Self::from_table(&Table::read(path)?, step)
    }

    /// Reflect a half-span distribution about `x = 0`.
    ///
    /// Mirrored samples come first in ascending position; a sample sitting
    /// exactly on the plane is not duplicated.
    pub fn mirrored(&self) -> Self {
        let (mut x, mut lift): (Vec<f64>, Vec<f64>) = self
            .x
            .iter()
            .zip(&self.lift)
            .rev()
            .filter(|(x, _)| **x != 0.0)
            .map(|(x, l)| (-x, *l))
            .unzip();
        x.extend_from_slice(&self.x);
        lift.extend_from_slice(&self.lift);
        Self {
            x,
            lift,
            step: self.step,
        }
    }

    pub fn accumulated(&self) -> Vec<f64> {
        accumulate(&self.lift, self.step)
    }

    pub fn integrated(&self) -> f64 {
        // Lengths are checked on construction.
        trapezoid(&self.x, &self.lift).unwrap_or(f64::NAN)
    }

    pub fn accumulated_table(&self) -> MeshResult<Table> {
        Table::from_columns(&ACCUMULATED_COLUMNS, &[&self.x, &self.accumulated()])
    }

    pub fn distribution_table(&self) -> MeshResult<Table> {
        Table::from_columns(&DISTRIBUTION_COLUMNS, &[&self.x, &self.lift])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_is_running_rectangle_sum() {
        assert_eq!(accumulate(&[1.0, 2.0, 3.0], 0.5), vec![0.5, 1.5, 3.0]);
        assert!(accumulate(&[], 0.1).is_empty());
    }

    #[test]
    fn trapezoid_of_linear_ramp() {
        let x = [0.0, 0.5, 1.0];
        let y = [0.0, 1.0, 2.0];
        assert!((trapezoid(&x, &y).unwrap() - 1.0).abs() < 1e-12);
        assert!(trapezoid(&x, &y[..2]).is_err());
    }

    #[test]
    fn relative_error_guards_zero() {
        assert!((relative_error_percent(110.0, 100.0).unwrap() - 10.0).abs() < 1e-12);
        assert!((relative_error_percent(90.0, 100.0).unwrap() + 10.0).abs() < 1e-12);
        assert_eq!(relative_error_percent(1.0, 0.0), None);
    }

    #[test]
    fn tables_carry_fixed_headers() {
        let dist = LiftDistribution::new(vec![0.0, 0.01], vec![10.0, 20.0], 0.01).unwrap();
        let acc = dist.accumulated_table().unwrap();
        assert_eq!(acc.columns, ACCUMULATED_COLUMNS);
        assert!((acc.rows[1][1] - 0.3).abs() < 1e-12);
        let raw = dist.distribution_table().unwrap();
        assert_eq!(raw.render(), "# x (m)\tLift (N)\n0.000000\t10.000000\n0.010000\t20.000000\n");
    }

    #[test]
    fn mirror_skips_centre_sample() {
        let dist = LiftDistribution::new(vec![0.0, 0.5, 1.0], vec![1.0, 2.0, 3.0], 0.5).unwrap();
        let full = dist.mirrored();
        assert_eq!(full.x, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(full.lift, vec![3.0, 2.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn rejects_non_positive_step() {
        assert!(LiftDistribution::new(vec![0.0], vec![1.0], 0.0).is_err());
    }
}
