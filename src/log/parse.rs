use regex::Regex;

/// Result of reading one log line that has a `label: ` prefix.
///
/// `value` is `None` when the token after the separator is not a number.
/// The label is still reported so the aggregator can register it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub label: String,
    pub value: Option<f64>,
}

/// Splits `"<label>: <value> <trailing tokens>"` lines.
///
/// Parsing never fails: lines without a separator yield nothing, and a
/// value token that is not a non-negative number yields a label with no value. Log sources
/// interleave banner and diagnostic text with timing lines.
#[derive(Debug, Clone)]
pub struct LineParser {
    re: Regex,
}

impl LineParser {
    pub fn new() -> anyhow::Result<Self> {
        // Label is everything before the first ": "; it may itself contain ':'.
        const LINE_RE: &str = r#"^(.*?): (.*)$"#;
        Ok(Self {
            re: Regex::new(LINE_RE)?,
        })
    }

    /// Try to read one raw line. `None` means the line has no separator.
    pub fn try_parse(&self, line: &str) -> Option<ParsedLine> {
        let caps = self.re.captures(line)?;
        let label = caps.get(1)?.as_str();
        let rest = caps.get(2).map_or("", |m| m.as_str());

        let value = rest
            .split_whitespace()
            .next()
            .and_then(|token| token.parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v >= 0.0);

        Some(ParsedLine {
            label: label.to_string(),
            value,
        })
    }
}
