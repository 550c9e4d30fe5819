//! Log sources: one text file per (role, selectivity) pair.
//!
//! Layout: `<dir>/<role>_<selectivity>`, e.g. `client_10`, `server_10`.

use crate::error::BreakdownError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Which side of the benchmark wrote the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Server,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Client, Role::Server];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Server => "server",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn log_path(dir: &Path, role: Role, selectivity: u32) -> PathBuf {
    dir.join(format!("{}_{}", role, selectivity))
}

/// Load the non-blank lines of one role's log, in file order.
///
/// Trailing `\r\n` / `\n` are stripped; nothing else is trimmed.
pub fn read_log_lines(
    dir: &Path,
    role: Role,
    selectivity: u32,
) -> Result<Vec<String>, BreakdownError> {
    let path = log_path(dir, role, selectivity);

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(BreakdownError::SourceNotFound {
                role,
                selectivity,
                path,
            });
        }
        Err(source) => return Err(BreakdownError::Io { path, source }),
    };

    let lines: Vec<String> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect();

    tracing::debug!(
        path = %path.display(),
        lines = lines.len(),
        "loaded {} log",
        role
    );

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn path_follows_role_underscore_selectivity() {
        let p = log_path(Path::new("/logs"), Role::Server, 100);
        assert_eq!(p, PathBuf::from("/logs/server_100"));
    }

    #[test]
    fn reads_lines_in_order_and_skips_blanks() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("client_1"),
            "Using bake backend: bake\r\n\nread_ms: 1.5 ms\n   \ndecode_ms: 2\n",
        )
        .unwrap();

        let lines = read_log_lines(dir.path(), Role::Client, 1).unwrap();
        assert_eq!(
            lines,
            vec![
                "Using bake backend: bake".to_string(),
                "read_ms: 1.5 ms".to_string(),
                "decode_ms: 2".to_string(),
            ]
        );
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_log_lines(dir.path(), Role::Server, 10).unwrap_err();
        match err {
            BreakdownError::SourceNotFound {
                role,
                selectivity,
                path,
            } => {
                assert_eq!(role, Role::Server);
                assert_eq!(selectivity, 10);
                assert_eq!(path, dir.path().join("server_10"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn role_deserializes_lowercase() {
        let roles: Vec<Role> = serde_json::from_str(r#"["server", "client"]"#).unwrap();
        assert_eq!(roles, vec![Role::Server, Role::Client]);
    }
}
