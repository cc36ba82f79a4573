//! Readers for the solver's output files.
//!
//! The parameter echo is a dict-style text whose quote style varies between
//! solver versions; it is normalized to JSON before parsing. The data table
//! is whitespace-delimited with one header row.

use norsand_classify::{StressPath, StressPathSample};
use norsand_material::MaterialParameters;
use norsand_types::constants::{COL_EPS, COL_P, COL_PSI0, COL_Q, MIN_COLUMNS};
use norsand_types::{NorsandError, NorsandResult, Scalar};

/// Parses a parameter echo such as `{'pref': 100000.0, 'Gref': ...}`.
pub fn parse_params_echo(text: &str) -> NorsandResult<MaterialParameters> {
    let normalized = text.replace('\'', "\"");
    serde_json::from_str(&normalized)
        .map_err(|e| NorsandError::Input(format!("parameter echo: {e}")))
}

/// Parses the numeric data table into a stress path.
///
/// The first line is a header and is skipped. Blank lines are ignored.
pub fn parse_data_table(text: &str) -> NorsandResult<StressPath> {
    let mut samples = Vec::new();

    for (line_no, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let cells = line
            .split_whitespace()
            .map(|cell| {
                cell.parse::<Scalar>().map_err(|_| {
                    NorsandError::Input(format!("data table line {}: '{cell}' is not a number", line_no + 1))
                })
            })
            .collect::<NorsandResult<Vec<Scalar>>>()?;

        if cells.len() < MIN_COLUMNS {
            return Err(NorsandError::Input(format!(
                "data table line {}: expected at least {MIN_COLUMNS} columns, found {}",
                line_no + 1,
                cells.len()
            )));
        }

        samples.push(StressPathSample::new(
            cells[COL_P],
            cells[COL_Q],
            cells[COL_EPS],
            cells[COL_PSI0],
        ));
    }

    StressPath::new(samples)
}
