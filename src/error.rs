//! Structural failures that abort one configuration's breakdown.
//!
//! Line-level parse failures are not represented here: the parser returns an
//! optional value instead.

use crate::log::Role;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BreakdownError {
    #[error("no {role} log for selectivity {selectivity}% at {}", .path.display())]
    SourceNotFound {
        role: Role,
        selectivity: u32,
        path: PathBuf,
    },

    #[error("read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("banner line {label:?} missing from stage totals")]
    MissingIgnoredStage { label: &'static str },

    #[error("stage totals sum to zero; percentages are undefined")]
    ZeroTotal,

    #[error("stage totals overflow to a non-finite sum")]
    NonFiniteTotal,
}

