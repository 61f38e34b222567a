//! Integer pipeline planner.
//!
//! Turns parsed [`StageSpec`]s into an [`IntPlan`]: an ordered list of
//! declarative stages plus at most one terminal, validated so that the
//! terminal comes last. Executing the plan runs the stages through
//! [`evaluate`] and the terminal through the [`Pipeline`] builder.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::error::{ArithmeticError, SpecError};
use crate::executor::{ExecMode, evaluate};
use crate::parser::{Expand, IntStage, MapOp, Predicate, SortOrder, StageSpec, Terminal};
use crate::pipeline::Pipeline;
use crate::reduced::Reduced;
use crate::stage::Stage;

/// Result of executing an [`IntPlan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    /// No terminal: the transformed sequence.
    Sequence(Vec<i64>),
    /// A reduced value.
    Value(i64),
    /// A reduction without a seed over an empty sequence.
    Empty,
    /// Number of elements.
    Count(usize),
    /// Joined text.
    Text(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Sequence(items) => write!(f, "{items:?}"),
            Outcome::Value(n) => write!(f, "{n}"),
            Outcome::Empty => write!(f, "<empty>"),
            Outcome::Count(n) => write!(f, "{n}"),
            Outcome::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<Reduced<i64>> for Outcome {
    fn from(reduced: Reduced<i64>) -> Self {
        match reduced {
            Reduced::Present(n) => Outcome::Value(n),
            Reduced::Empty => Outcome::Empty,
        }
    }
}

/// A validated integer pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntPlan {
    stages: Vec<IntStage>,
    terminal: Option<Terminal>,
}

/// Validates spec order and splits stages from the terminal.
pub fn plan_specs(specs: Vec<StageSpec>) -> Result<IntPlan, SpecError> {
    let mut plan = IntPlan::default();
    for spec in specs {
        if let Some(terminal) = &plan.terminal {
            return Err(SpecError::TerminalNotLast(terminal.to_string()));
        }
        match spec {
            StageSpec::Stage(stage) => plan.stages.push(stage),
            StageSpec::Terminal(terminal) => plan.terminal = Some(terminal),
        }
    }
    Ok(plan)
}

impl IntPlan {
    /// Returns the non-terminal stages in order.
    pub fn stages(&self) -> &[IntStage] {
        &self.stages
    }

    /// Returns the terminal, if any.
    pub fn terminal(&self) -> Option<&Terminal> {
        self.terminal.as_ref()
    }

    /// Renders the plan as `stage -> stage => terminal`.
    pub fn explain(&self) -> String {
        let mut rendered = self
            .stages
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" -> ");
        if let Some(terminal) = &self.terminal {
            if !rendered.is_empty() {
                rendered.push(' ');
            }
            rendered.push_str("=> ");
            rendered.push_str(&terminal.to_string());
        }
        if rendered.is_empty() {
            rendered.push_str("(no stages)");
        }
        rendered
    }

    /// Builds the declarative stage list.
    pub fn to_stages(&self) -> Vec<Stage<i64, ArithmeticError>> {
        self.stages.iter().copied().map(to_stage).collect()
    }

    /// Evaluates the plan over `values`.
    ///
    /// Seeded sums and products are a left fold from the seed. When `mode`
    /// partitions the sequence, partitions fold from the neutral identity
    /// (0 or 1) and the seed is applied to the merged result instead.
    pub fn execute(&self, values: Vec<i64>, mode: ExecMode) -> Result<Outcome, ArithmeticError> {
        debug!(plan = %self.explain(), input_len = values.len(), ?mode, "executing integer plan");

        let items = evaluate(values, &self.to_stages())?;
        let partitioned = mode.partitions(items.len());
        let pipeline = Pipeline::<i64, ArithmeticError>::from_vec(items);

        let outcome = match &self.terminal {
            None => Outcome::Sequence(pipeline.collect()?),
            Some(Terminal::Sum(Some(seed))) => {
                let folded = fold_seeded(pipeline, *seed, 0, checked_add, mode, partitioned)?;
                Outcome::Value(folded)
            }
            Some(Terminal::Sum(None)) => pipeline.try_reduce(checked_add)?.into(),
            Some(Terminal::Product(Some(seed))) => {
                let folded = fold_seeded(pipeline, *seed, 1, checked_mul, mode, partitioned)?;
                Outcome::Value(folded)
            }
            Some(Terminal::Product(None)) => pipeline.try_reduce(checked_mul)?.into(),
            Some(Terminal::Min) => pipeline.reduce(i64::min)?.into(),
            Some(Terminal::Max) => pipeline.reduce(i64::max)?.into(),
            Some(Terminal::Count) => Outcome::Count(pipeline.count()?),
            Some(Terminal::Join(separator)) => Outcome::Text(pipeline.join(separator)?),
        };
        Ok(outcome)
    }
}

impl Predicate {
    /// Returns true if `n` satisfies the predicate.
    pub fn matches(self, n: i64) -> bool {
        match self {
            Predicate::Odd => n % 2 != 0,
            Predicate::Even => n % 2 == 0,
            Predicate::Gt(k) => n > k,
            Predicate::Ge(k) => n >= k,
            Predicate::Lt(k) => n < k,
            Predicate::Le(k) => n <= k,
            Predicate::Eq(k) => n == k,
            Predicate::Ne(k) => n != k,
        }
    }
}

impl MapOp {
    /// Applies the operation with overflow checking.
    pub fn apply(self, n: i64) -> Result<i64, ArithmeticError> {
        let overflow = || ArithmeticError::Overflow(format!("map:{self} on {n}"));
        match self {
            MapOp::Add(k) => n.checked_add(k).ok_or_else(overflow),
            MapOp::Sub(k) => n.checked_sub(k).ok_or_else(overflow),
            MapOp::Mul(k) => n.checked_mul(k).ok_or_else(overflow),
            MapOp::Div(0) => Err(ArithmeticError::DivisionByZero(format!("map:{self}"))),
            MapOp::Div(k) => n.checked_div(k).ok_or_else(overflow),
            MapOp::Neg => n.checked_neg().ok_or_else(overflow),
            MapOp::Square => n.checked_mul(n).ok_or_else(overflow),
        }
    }
}

fn to_stage(stage: IntStage) -> Stage<i64, ArithmeticError> {
    match stage {
        IntStage::Map(op) => Stage::try_map(move |n| op.apply(n)),
        IntStage::Filter(predicate) => Stage::filter(move |n: &i64| predicate.matches(*n)),
        IntStage::FlatMap(Expand::Repeat(times)) => {
            Stage::flat_map(move |n| std::iter::repeat_n(n, times))
        }
        IntStage::FlatMap(Expand::Digits) => Stage::flat_map(digits),
        IntStage::Distinct => Stage::distinct(),
        IntStage::Skip(n) => Stage::Skip(n),
        IntStage::Limit(n) => Stage::Limit(n),
        IntStage::Sort(SortOrder::Ascending) => Stage::sort_by(i64::cmp),
        IntStage::Sort(SortOrder::Descending) => Stage::sort_by(|a: &i64, b: &i64| b.cmp(a)),
    }
}

/// Decimal digits of `|n|`, most significant first.
fn digits(n: i64) -> Vec<i64> {
    n.unsigned_abs()
        .to_string()
        .bytes()
        .map(|b| i64::from(b - b'0'))
        .collect()
}

fn fold_seeded(
    pipeline: Pipeline<'_, i64, ArithmeticError>,
    seed: i64,
    neutral: i64,
    op: fn(i64, i64) -> Result<i64, ArithmeticError>,
    mode: ExecMode,
    partitioned: bool,
) -> Result<i64, ArithmeticError> {
    if partitioned {
        let merged = pipeline.try_fold_with(neutral, op, op, mode)?;
        op(seed, merged)
    } else {
        pipeline.try_fold_with(seed, op, op, ExecMode::Sequential)
    }
}

fn checked_add(a: i64, b: i64) -> Result<i64, ArithmeticError> {
    a.checked_add(b)
        .ok_or_else(|| ArithmeticError::Overflow(format!("{a} + {b}")))
}

fn checked_mul(a: i64, b: i64) -> Result<i64, ArithmeticError> {
    a.checked_mul(b)
        .ok_or_else(|| ArithmeticError::Overflow(format!("{a} * {b}")))
}
