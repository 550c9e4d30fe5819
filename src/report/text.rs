//! Plain-text report, one block per selectivity.

use super::ConfigurationOutcome;
use crate::model::EXCLUDED_FROM_TOTAL;

use std::io::{self, Write};

const SEPARATOR_WIDTH: usize = 48;

/// Shortest round-trip form, always with a fractional part (`25.0`, `33.333`).
fn fmt_value(x: f64) -> String {
    format!("{:?}", x)
}

/// One selectivity block. Spacing follows the harness's analysis printout
/// (`Selectivity:  1  %`, `label  : 25.0 %`) so outputs diff cleanly.
pub fn write_outcome<W: Write>(outcome: &ConfigurationOutcome, out: &mut W) -> io::Result<()> {
    match &outcome.result {
        Ok(breakdown) => {
            writeln!(out, "Selectivity:  {}  %", outcome.selectivity)?;
            for share in &breakdown.shares {
                writeln!(out, "{}  : {} %", share.label, fmt_value(share.percentage))?;
            }
            if let Some(raw) = breakdown.excluded_absolute {
                writeln!(out, "{} (absolute): {}", EXCLUDED_FROM_TOTAL, fmt_value(raw))?;
            }
        }
        Err(err) => {
            writeln!(
                out,
                "Selectivity:  {}  % skipped: {}",
                outcome.selectivity, err
            )?;
        }
    }
    writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))
}
