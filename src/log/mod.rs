//! Reading and parsing the per-role timing logs.

pub mod parse;
pub mod source;

pub use parse::{LineParser, ParsedLine};
pub use source::{Role, log_path, read_log_lines};
