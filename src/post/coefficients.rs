//! Force-coefficient histories from `coefficient.dat` files.
//!
//! Lines starting with `#` are comments. Every other line advances the
//! iteration counter (starting at 1), and rows with more than four
//! whitespace-separated columns contribute `Cd` from column 1 and `Cl`
//! from column 3.

use std::path::Path;

use crate::io::table::Table;
use crate::mesh_error::{MeshError, MeshResult};

const CD_COLUMN: usize = 1;
const CL_COLUMN: usize = 3;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoefficientHistory {
    pub iterations: Vec<usize>,
    pub cd: Vec<f64>,
    pub cl: Vec<f64>,
}

impl CoefficientHistory {
    pub fn len(&self) -> usize {
        self.iterations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty()
    }

    /// Last recorded `(Cd, Cl)` pair.
    pub fn last(&self) -> Option<(f64, f64)> {
        Some((*self.cd.last()?, *self.cl.last()?))
    }

    pub fn to_table(&self) -> MeshResult<Table> {
        let iterations: Vec<f64> = self.iterations.iter().map(|&i| i as f64).collect();
        Table::from_columns(&["iteration", "Cd", "Cl"], &[&iterations, &self.cd, &self.cl])
    }

    pub fn read<P: AsRef<Path>>(path: P) -> MeshResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| MeshError::TableParse {
            line: 0,
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        parse_coefficients(&text)
    }
}

fn field(columns: &[&str], idx: usize, line: usize) -> MeshResult<f64> {
    columns[idx].parse::<f64>().map_err(|e| MeshError::TableParse {
        line,
        message: format!("column {idx} `{}`: {e}", columns[idx]),
    })
}

pub fn parse_coefficients(text: &str) -> MeshResult<CoefficientHistory> {
    let mut history = CoefficientHistory::default();
    let mut iteration = 0;
    for (idx, line) in text.lines().enumerate() {
        if line.starts_with('#') {
            continue;
        }
        iteration += 1;
        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.len() <= 4 {
            continue;
        }
        history.cd.push(field(&columns, CD_COLUMN, idx + 1)?);
        history.cl.push(field(&columns, CL_COLUMN, idx + 1)?);
        history.iterations.push(iteration);
    }
    log::debug!("parsed {} coefficient sample(s)", history.len());
    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAT: &str = "\
# Force coefficients
# Time\tCd\tCd(f)\tCl\tCl(f)
1\t0.50\t0.25\t-1.20\t-0.60
2\t0.45\t0.22\t-1.10\t-0.55

4\t0.40\t0.20\t-1.00\t-0.50
";

    #[test]
    fn picks_cd_and_cl_columns() {
        let h = parse_coefficients(DAT).unwrap();
        assert_eq!(h.cd, vec![0.50, 0.45, 0.40]);
        assert_eq!(h.cl, vec![-1.20, -1.10, -1.00]);
        assert_eq!(h.last(), Some((0.40, -1.00)));
    }

    #[test]
    fn short_lines_still_advance_iteration() {
        let h = parse_coefficients(DAT).unwrap();
        assert_eq!(h.iterations, vec![1, 2, 4]);
    }

    #[test]
    fn bad_number_reports_line() {
        let err = parse_coefficients("1 x 0 1 0\n").unwrap_err();
        assert!(matches!(err, MeshError::TableParse { line: 1, .. }));
    }

    #[test]
    fn table_has_three_columns() {
        let table = parse_coefficients(DAT).unwrap().to_table().unwrap();
        assert_eq!(table.columns, vec!["iteration", "Cd", "Cl"]);
        assert_eq!(table.rows[2], vec![4.0, 0.40, -1.00]);
    }
}
