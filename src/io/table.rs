//! Tab-separated numeric tables exchanged with the post-processing scripts.
//!
//! # Supported format
//! - An optional header line naming the columns, with or without a leading
//!   `#` (`# x (m)\tLift (N)`).
//! - Further lines starting with `#` and blank lines are skipped.
//! - Data rows hold at least two numeric columns separated by tabs (any
//!   whitespace is accepted when a row has no tabs).
//!
//! Written tables always carry a `# ` header and 6-decimal fixed point.

use std::path::Path;

use itertools::Itertools;

use crate::io::write_atomic;
use crate::mesh_error::{MeshError, MeshResult};

/// Decimal places used when writing tables.
pub const TABLE_PRECISION: usize = 6;

/// A rectangular table of `f64` columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

fn split_fields(line: &str) -> Vec<&str> {
    if line.contains('\t') {
        line.split('\t').map(str::trim).filter(|f| !f.is_empty()).collect()
    } else {
        line.split_whitespace().collect()
    }
}

fn parse_row(line: &str) -> Option<Vec<f64>> {
    split_fields(line)
        .into_iter()
        .map(|f| f.parse::<f64>().ok())
        .collect()
}

impl Table {
    /// Build a table from named columns of equal length.
    pub fn from_columns(names: &[&str], columns: &[&[f64]]) -> MeshResult<Self> {
        if names.len() != columns.len() {
            return Err(MeshError::TableParse {
                line: 0,
                message: format!("{} names for {} columns", names.len(), columns.len()),
            });
        }
        let len = columns.first().map_or(0, |c| c.len());
        if let Some(bad) = columns.iter().position(|c| c.len() != len) {
            return Err(MeshError::TableParse {
                line: 0,
                message: format!("column `{}` has {} rows, expected {len}", names[bad], columns[bad].len()),
            });
        }
        let rows = (0..len)
            .map(|i| columns.iter().map(|c| c[i]).collect())
            .collect();
        Ok(Self {
            columns: names.iter().map(|n| n.to_string()).collect(),
            rows,
        })
    }

    /// Parse tab-separated text.
    pub fn parse(text: &str) -> MeshResult<Self> {
        let mut columns: Vec<String> = Vec::new();
        let mut rows: Vec<Vec<f64>> = Vec::new();
        let mut width: Option<usize> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(header) = line.strip_prefix('#') {
                if columns.is_empty() && rows.is_empty() {
                    columns = split_fields(header.trim())
                        .into_iter()
                        .map(|s| s.trim_start_matches('#').trim().to_string())
                        .collect();
                }
                continue;
            }
            match parse_row(line) {
                Some(values) => {
                    if values.len() < 2 {
                        return Err(MeshError::TableParse {
                            line: line_no,
                            message: format!("expected at least 2 columns, found {}", values.len()),
                        });
                    }
                    match width {
                        Some(w) if w != values.len() => {
                            return Err(MeshError::TableParse {
                                line: line_no,
                                message: format!("row has {} columns, expected {w}", values.len()),
                            });
                        }
                        _ => width = Some(values.len()),
                    }
                    rows.push(values);
                }
                None if columns.is_empty() && rows.is_empty() => {
                    columns = split_fields(line).into_iter().map(str::to_string).collect();
                }
                None => {
                    return Err(MeshError::TableParse {
                        line: line_no,
                        message: format!("non-numeric row `{line}`"),
                    });
                }
            }
        }

        if let Some(w) = width {
            if !columns.is_empty() && columns.len() != w {
                log::warn!(
                    "table header names {} columns but rows have {w}; using positional names",
                    columns.len()
                );
                columns.clear();
            }
            if columns.is_empty() {
                columns = (0..w).map(|i| format!("col{i}")).collect();
            }
        }
        Ok(Self { columns, rows })
    }

    /// Read and parse a table file.
    pub fn read<P: AsRef<Path>>(path: P) -> MeshResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| MeshError::TableParse {
            line: 0,
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::parse(&text)
    }

    /// Values of column `idx`.
    pub fn column(&self, idx: usize) -> Option<Vec<f64>> {
        if idx >= self.columns.len() {
            return None;
        }
        Some(self.rows.iter().map(|r| r[idx]).collect())
    }

    /// Render with a `# ` header and fixed-point values.
    pub fn render(&self) -> String {
        let mut out = format!("# {}\n", self.columns.iter().join("\t"));
        for row in &self.rows {
            out.push_str(
                &row.iter()
                    .map(|v| format!("{v:.prec$}", prec = TABLE_PRECISION))
                    .join("\t"),
            );
            out.push('\n');
        }
        out
    }

    /// Write the rendered table to `path`, replacing any existing file.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> MeshResult<()> {
        write_atomic(path.as_ref(), self.render().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commented_header() {
        let table = Table::parse("# x (m)\tLift (N)\n0.000000\t1.5\n0.010000\t2.5\n").unwrap();
        assert_eq!(table.columns, vec!["x (m)", "Lift (N)"]);
        assert_eq!(table.rows, vec![vec![0.0, 1.5], vec![0.01, 2.5]]);
        assert_eq!(table.column(1), Some(vec![1.5, 2.5]));
        assert_eq!(table.column(2), None);
    }

    #[test]
    fn accepts_plain_header_and_skips_comments() {
        let text = "x\ty\n# note\n1\t2\n\n3\t4\n";
        let table = Table::parse(text).unwrap();
        assert_eq!(table.columns, vec!["x", "y"]);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Table::parse("# a\tb\n1\t2\n1\t2\t3\n").unwrap_err();
        assert_eq!(
            err,
            MeshError::TableParse {
                line: 3,
                message: "row has 3 columns, expected 2".into()
            }
        );
    }

    #[test]
    fn single_column_is_rejected() {
        assert!(Table::parse("1\n2\n").is_err());
    }

    #[test]
    fn render_uses_fixed_point() {
        let table = Table::from_columns(&["x (m)", "Lift (N)"], &[&[0.0, 0.5], &[1.0, -2.25]])
            .unwrap();
        assert_eq!(
            table.render(),
            "# x (m)\tLift (N)\n0.000000\t1.000000\n0.500000\t-2.250000\n"
        );
    }

    #[test]
    fn mismatched_header_falls_back_to_positional_names() {
        let table = Table::parse("# only_one\n1\t2\n").unwrap();
        assert_eq!(table.columns, vec!["col0", "col1"]);
    }
}
