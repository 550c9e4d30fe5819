use crate::log::ParsedLine;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct StageTotal {
    pub label: String,
    pub total: f64,
    /// Number of lines that contributed a value. Zero means every
    /// occurrence of the label failed to parse.
    pub samples: usize,
}

/// Accumulated time per stage label, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageTotals {
    entries: Vec<StageTotal>,
    index: BTreeMap<String, usize>,
}

impl StageTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `label` if unseen, then add `value` when present.
    pub fn record(&mut self, label: &str, value: Option<f64>) {
        let idx = match self.index.get(label) {
            Some(idx) => *idx,
            None => {
                self.entries.push(StageTotal {
                    label: label.to_string(),
                    total: 0.0,
                    samples: 0,
                });
                let idx = self.entries.len() - 1;
                self.index.insert(label.to_string(), idx);
                idx
            }
        };

        if let (Some(v), Some(entry)) = (value, self.entries.get_mut(idx)) {
            entry.total += v;
            entry.samples += 1;
        }
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entry(label).map(|e| e.total)
    }

    pub fn entry(&self, label: &str) -> Option<&StageTotal> {
        self.index.get(label).and_then(|idx| self.entries.get(*idx))
    }

    /// Remove a label, keeping the remaining entries in first-seen order.
    pub fn remove(&mut self, label: &str) -> Option<StageTotal> {
        let idx = self.index.remove(label)?;
        let removed = self.entries.remove(idx);
        for slot in self.index.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StageTotal> {
        self.entries.iter()
    }

    #[cfg(test)]
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for StageTotals {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut totals = StageTotals::new();
        for (label, value) in iter {
            totals.record(label.as_ref(), Some(value));
        }
        totals
    }
}

/// Folds parsed lines from every role log of one configuration.
///
/// Construct a fresh aggregator per configuration; [`StageAggregator::finish`]
/// consumes it, so totals cannot leak into the next configuration.
#[derive(Debug, Default)]
pub struct StageAggregator {
    totals: StageTotals,
    lines_seen: usize,
    lines_without_value: usize,
}

impl StageAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fold(&mut self, line: ParsedLine) {
        self.lines_seen += 1;
        if line.value.is_none() {
            self.lines_without_value += 1;
        }
        self.totals.record(&line.label, line.value);
    }

    pub fn fold_all<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = ParsedLine>,
    {
        for line in lines {
            self.fold(line);
        }
    }

    pub fn finish(self) -> StageTotals {
        tracing::debug!(
            lines = self.lines_seen,
            without_value = self.lines_without_value,
            stages = self.totals.len(),
            "aggregated stage totals"
        );
        for entry in self.totals.iter().filter(|e| e.samples == 0) {
            tracing::debug!(label = %entry.label, "stage has no numeric samples; counted as zero");
        }
        self.totals
    }
}
