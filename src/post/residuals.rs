//! Final-residual history extracted from a solver log.
//!
//! A step opens at every line starting with `Time = <int>`. Within a step,
//! `Solving for <var>, ... Final residual = <value>` records the value for
//! `<var>`; a later solve of the same variable in the same step overwrites
//! the earlier one. Lines before the first step marker are ignored.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::io::table::Table;
use crate::mesh_error::{MeshError, MeshResult};

static TIME_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Time\s=\s(\d+)").expect("static pattern"));

static FINAL_RESIDUAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Solving\sfor\s(\w+),\s.*\sFinal\sresidual\s=\s([\deE+.-]+)")
        .expect("static pattern")
});

/// Residuals per step, one series per solved variable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResidualHistory {
    /// Step numbers in log order.
    pub times: Vec<u64>,
    /// Variable names in order of first appearance.
    pub variables: Vec<String>,
    /// `series[v][t]`: residual of `variables[v]` at `times[t]`; `None`
    /// before the variable's first sample.
    pub series: Vec<Vec<Option<f64>>>,
}

impl ResidualHistory {
    fn variable_slot(&mut self, name: &str) -> usize {
        if let Some(idx) = self.variables.iter().position(|v| v == name) {
            return idx;
        }
        self.variables.push(name.to_string());
        self.series.push(vec![None; self.times.len()]);
        self.variables.len() - 1
    }

    fn open_step(&mut self, time: u64) {
        self.times.push(time);
        for s in &mut self.series {
            s.push(None);
        }
    }

    fn forward_fill(&mut self) {
        for s in &mut self.series {
            for i in 1..s.len() {
                if s[i].is_none() {
                    s[i] = s[i - 1];
                }
            }
        }
    }

    /// Series for `name`, if it was ever solved for.
    pub fn variable(&self, name: &str) -> Option<&[Option<f64>]> {
        self.variables
            .iter()
            .position(|v| v == name)
            .map(|idx| self.series[idx].as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// `time` followed by one column per variable; gaps become `NaN`.
    pub fn to_table(&self) -> Table {
        let mut columns = vec!["time".to_string()];
        columns.extend(self.variables.iter().cloned());
        let rows = self
            .times
            .iter()
            .enumerate()
            .map(|(t, &time)| {
                std::iter::once(time as f64)
                    .chain(self.series.iter().map(|s| s[t].unwrap_or(f64::NAN)))
                    .collect()
            })
            .collect();
        Table { columns, rows }
    }

    /// Read and parse a log file.
    pub fn read<P: AsRef<Path>>(path: P) -> MeshResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| MeshError::LogParse(format!("cannot read {}: {e}", path.display())))?;
        parse_residuals(&text)
    }
}

/// Parse solver log text into a forward-filled residual history.
pub fn parse_residuals(text: &str) -> MeshResult<ResidualHistory> {
    let mut history = ResidualHistory::default();
    let mut preamble = 0usize;
    for (idx, line) in text.lines().enumerate() {
        if let Some(caps) = TIME_MARKER.captures(line) {
            let time = caps[1].parse::<u64>().map_err(|e| {
                MeshError::LogParse(format!("line {}: bad step `{}`: {e}", idx + 1, &caps[1]))
            })?;
            history.open_step(time);
        }
        let Some(caps) = FINAL_RESIDUAL.captures(line) else {
            continue;
        };
        if history.is_empty() {
            preamble += 1;
            continue;
        }
        let value = caps[2].parse::<f64>().map_err(|e| {
            MeshError::LogParse(format!("line {}: bad residual `{}`: {e}", idx + 1, &caps[2]))
        })?;
        let slot = history.variable_slot(&caps[1]);
        if let Some(last) = history.series[slot].last_mut() {
            *last = Some(value);
        }
    }
    if preamble > 0 {
        log::warn!("ignored {preamble} residual line(s) before the first `Time =` marker");
    }
    history.forward_fill();
    log::debug!(
        "parsed {} step(s), variables {:?}",
        history.times.len(),
        history.variables
    );
    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
smoothSolver:  Solving for Ux, Initial residual = 1, Final residual = 0.9, No Iterations 1
Time = 1

smoothSolver:  Solving for Ux, Initial residual = 1, Final residual = 0.05, No Iterations 2
GAMG:  Solving for p, Initial residual = 1, Final residual = 0.008, No Iterations 5
GAMG:  Solving for p, Initial residual = 0.5, Final residual = 0.004, No Iterations 3
Time = 2

smoothSolver:  Solving for Ux, Initial residual = 0.4, Final residual = 2.5e-3, No Iterations 2
Time = 3

smoothSolver:  Solving for k, Initial residual = 0.2, Final residual = 1e-4, No Iterations 2
";

    #[test]
    fn last_value_per_step_wins() {
        let h = parse_residuals(LOG).unwrap();
        assert_eq!(h.times, vec![1, 2, 3]);
        assert_eq!(h.variables, vec!["Ux", "p", "k"]);
        assert_eq!(h.variable("p").unwrap()[0], Some(0.004));
    }

    #[test]
    fn gaps_are_forward_filled() {
        let h = parse_residuals(LOG).unwrap();
        assert_eq!(h.variable("p").unwrap(), &[Some(0.004), Some(0.004), Some(0.004)]);
        assert_eq!(h.variable("Ux").unwrap(), &[Some(0.05), Some(2.5e-3), Some(2.5e-3)]);
        assert_eq!(h.variable("k").unwrap(), &[None, None, Some(1e-4)]);
    }

    #[test]
    fn preamble_is_ignored() {
        let h = parse_residuals("Solving for Ux, Initial residual = 1, Final residual = 0.5, x\n")
            .unwrap();
        assert!(h.is_empty());
        assert!(h.variables.is_empty());
    }

    #[test]
    fn table_marks_leading_gaps_as_nan() {
        let table = parse_residuals(LOG).unwrap().to_table();
        assert_eq!(table.columns, vec!["time", "Ux", "p", "k"]);
        assert_eq!(table.rows[0][0], 1.0);
        assert!(table.rows[0][3].is_nan());
        assert_eq!(table.rows[2][3], 1e-4);
    }

    #[test]
    fn indented_time_is_not_a_step() {
        let h = parse_residuals("  Time = 4\n").unwrap();
        assert!(h.is_empty());
    }
}
