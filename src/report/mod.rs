//! Batch driver and report emission.
//!
//! Each selectivity is processed to completion (read, parse, aggregate,
//! normalize) before the next one starts. A structural failure skips only
//! that selectivity; the batch fails only when no input log exists at all.

pub mod text;

use crate::Result;
use crate::diagnostics;
use crate::error::BreakdownError;
use crate::log::{LineParser, Role, log_path, read_log_lines};
use crate::model::{Breakdown, EXCLUDED_FROM_TOTAL, StageAggregator, StageTotals, normalize};
use crate::plan::RunPlan;

use anyhow::bail;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

pub use text::write_outcome;

#[derive(Debug)]
pub struct ConfigurationOutcome {
    pub selectivity: u32,
    pub result: std::result::Result<Breakdown, BreakdownError>,
}

#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<ConfigurationOutcome>,
}

/// Serializable shape shared by the JSON output and the HTML renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchView {
    pub excluded_stage: &'static str,
    pub configurations: Vec<ConfigurationView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationView {
    pub selectivity: u32,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Parallel to `percentages`.
    pub labels: Vec<String>,
    pub percentages: Vec<f64>,
    pub excluded_absolute: Option<f64>,
    pub total: Option<f64>,
}

/// Read every role log for one selectivity and fold them into fresh totals.
///
/// All role logs must exist; a missing one skips the selectivity.
pub fn stage_totals_for(
    dir: &Path,
    roles: &[Role],
    selectivity: u32,
    parser: &LineParser,
) -> std::result::Result<StageTotals, BreakdownError> {
    let mut sources: Vec<Vec<String>> = Vec::with_capacity(roles.len());
    for role in roles {
        sources.push(read_log_lines(dir, *role, selectivity)?);
    }

    let mut aggregator = StageAggregator::new();
    for lines in &sources {
        aggregator.fold_all(lines.iter().filter_map(|line| parser.try_parse(line)));
    }
    Ok(aggregator.finish())
}

pub fn breakdown_for(
    dir: &Path,
    roles: &[Role],
    selectivity: u32,
    parser: &LineParser,
) -> std::result::Result<Breakdown, BreakdownError> {
    normalize(stage_totals_for(dir, roles, selectivity, parser)?)
}

/// Process every selectivity of the plan, handing each outcome to `emit`
/// as soon as it is done, before the next selectivity is read.
pub fn run_batch<F>(dir: &Path, plan: &RunPlan, mut emit: F) -> Result<BatchReport>
where
    F: FnMut(&ConfigurationOutcome) -> Result<()>,
{
    let parser = LineParser::new()?;
    let mut outcomes = Vec::with_capacity(plan.selectivities.len());
    let mut any_source = false;

    for &selectivity in &plan.selectivities {
        let _span = tracing::info_span!("selectivity", value = selectivity).entered();

        any_source |= plan
            .roles
            .iter()
            .any(|role| log_path(dir, *role, selectivity).is_file());

        let result = breakdown_for(dir, &plan.roles, selectivity, &parser);
        if let Err(err) = &result {
            diagnostics::warn(format!("skipping selectivity {}%: {}", selectivity, err));
        }
        let outcome = ConfigurationOutcome {
            selectivity,
            result,
        };
        emit(&outcome)?;
        outcomes.push(outcome);
    }

    if !any_source {
        bail!(
            "{}",
            diagnostics::error_message(format!("no input logs found in {}", dir.display()))
        );
    }

    Ok(BatchReport { outcomes })
}

impl BatchReport {
    pub fn to_view(&self) -> BatchView {
        let configurations = self
            .outcomes
            .iter()
            .map(|o| match &o.result {
                Ok(b) => ConfigurationView {
                    selectivity: o.selectivity,
                    status: "ok",
                    reason: None,
                    labels: b.labels().into_iter().map(str::to_string).collect(),
                    percentages: b.percentages(),
                    excluded_absolute: b.excluded_absolute,
                    total: Some(b.total),
                },
                Err(err) => ConfigurationView {
                    selectivity: o.selectivity,
                    status: "skipped",
                    reason: Some(err.to_string()),
                    labels: Vec::new(),
                    percentages: Vec::new(),
                    excluded_absolute: None,
                    total: None,
                },
            })
            .collect();

        BatchView {
            excluded_stage: EXCLUDED_FROM_TOTAL,
            configurations,
        }
    }

    pub fn write_json<W: Write>(&self, out: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, &self.to_view())?;
        writeln!(out)?;
        Ok(())
    }
}
