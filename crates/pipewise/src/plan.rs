//! Pipeline plan: the ordered record of stages a pipeline will apply.
//!
//! The builder records one [`StageKind`] per stage so a pipeline can be
//! inspected (and logged) before it runs.

use std::fmt;

/// The kind of a single non-terminal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// One output per input element.
    Map,
    /// Keeps elements matching a predicate.
    Filter,
    /// Concatenates per-element sub-sequences.
    FlatMap,
    /// Keeps the first occurrence of each value.
    Distinct,
    /// Drops the first `n` elements.
    Skip(usize),
    /// Keeps the first `n` elements.
    Limit(usize),
    /// Stable sort by a comparator.
    Sort,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Map => write!(f, "map"),
            StageKind::Filter => write!(f, "filter"),
            StageKind::FlatMap => write!(f, "flat_map"),
            StageKind::Distinct => write!(f, "distinct"),
            StageKind::Skip(n) => write!(f, "skip({n})"),
            StageKind::Limit(n) => write!(f, "limit({n})"),
            StageKind::Sort => write!(f, "sort"),
        }
    }
}

/// Ordered list of stage kinds, in application order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    stages: Vec<StageKind>,
}

impl Plan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage.
    pub fn push(&mut self, kind: StageKind) {
        self.stages.push(kind);
    }

    /// Returns the stages in application order.
    pub fn stages(&self) -> &[StageKind] {
        &self.stages
    }

    /// Returns the number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if no stage has been recorded.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl FromIterator<StageKind> for Plan {
    fn from_iter<I: IntoIterator<Item = StageKind>>(iter: I) -> Self {
        Self {
            stages: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stages.is_empty() {
            return write!(f, "(no stages)");
        }
        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{stage}")?;
        }
        Ok(())
    }
}
