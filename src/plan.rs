//! Run plan: which selectivities to process and which role logs to read.
//!
//! JSON shape (every field optional):
//! {
//!   "selectivities": [1, 10, 100],
//!   "roles": ["client", "server"]
//! }
//!
//! Selectivities given on the command line replace the plan's list.

use crate::Result;
use crate::diagnostics;
use crate::log::Role;

use anyhow::{Context, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_SELECTIVITIES: [u32; 3] = [1, 10, 100];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunPlan {
    #[serde(default = "default_selectivities")]
    pub selectivities: Vec<u32>,

    #[serde(default = "default_roles")]
    pub roles: Vec<Role>,
}

fn default_selectivities() -> Vec<u32> {
    DEFAULT_SELECTIVITIES.to_vec()
}

fn default_roles() -> Vec<Role> {
    Role::ALL.to_vec()
}

impl Default for RunPlan {
    fn default() -> Self {
        Self {
            selectivities: default_selectivities(),
            roles: default_roles(),
        }
    }
}

impl RunPlan {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| {
            diagnostics::error_message(format!("read plan file {}", path.display()))
        })?;
        let plan: RunPlan = serde_json::from_str(&text).with_context(|| {
            diagnostics::error_message(format!("parse plan file {}", path.display()))
        })?;
        Ok(plan)
    }

    /// Apply command-line selectivities (if any), drop duplicates keeping
    /// first occurrence, and reject an empty plan.
    pub fn resolve(mut self, cli_selectivities: &[u32]) -> Result<Self> {
        if !cli_selectivities.is_empty() {
            self.selectivities = cli_selectivities.to_vec();
        }
        self.selectivities = dedup_keep_first(self.selectivities);
        self.roles = dedup_keep_first(self.roles);

        if self.selectivities.is_empty() {
            bail!(
                "{}",
                diagnostics::error_message("run plan lists no selectivities")
            );
        }
        if self.roles.is_empty() {
            bail!("{}", diagnostics::error_message("run plan lists no roles"));
        }
        Ok(self)
    }
}

fn dedup_keep_first<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
