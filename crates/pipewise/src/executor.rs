//! Stage executor: applies stages to owned sequences.
//!
//! Every stage consumes its input `Vec` and returns a new one, so no caller
//! ever observes an in-place mutation. User functions returning `Err` stop
//! evaluation at the failing element.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::plan::Plan;
use crate::reduced::Reduced;
use crate::stage::Stage;

/// How reductions with a combiner are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecMode {
    /// Fold left to right on the calling thread. The combiner is never called.
    #[default]
    Sequential,
    /// Partition the sequence across the rayon pool once it holds at least
    /// `min_len` elements; shorter sequences fold sequentially.
    Parallel {
        /// Minimum sequence length before partitioning.
        min_len: usize,
    },
}

impl ExecMode {
    /// Returns true if a sequence of `len` elements should be partitioned.
    pub fn partitions(self, len: usize) -> bool {
        match self {
            ExecMode::Sequential => false,
            ExecMode::Parallel { min_len } => len >= min_len,
        }
    }
}

/// Evaluates a declarative stage list over `sequence`, left to right.
///
/// Stages are borrowed, so the same list can be evaluated again over fresh
/// input. The first error raised by a user function is returned unchanged
/// and no later element or stage is evaluated.
pub fn evaluate<T, E>(sequence: Vec<T>, stages: &[Stage<T, E>]) -> Result<Vec<T>, E> {
    let plan: Plan = stages.iter().map(Stage::kind).collect();
    debug!(input_len = sequence.len(), plan = %plan, "evaluating stages");

    let mut items = sequence;
    for stage in stages {
        trace!(stage = %stage.kind(), input_len = items.len(), "applying stage");
        items = apply_stage(items, stage)?;
    }

    debug!(output_len = items.len(), "stages evaluated");
    Ok(items)
}

/// Applies one declarative stage.
pub(crate) fn apply_stage<T, E>(items: Vec<T>, stage: &Stage<T, E>) -> Result<Vec<T>, E> {
    match stage {
        Stage::Map(f) => map_all(items, f),
        Stage::Filter(predicate) => filter_all(items, predicate),
        Stage::FlatMap(f) => flat_map_all(items, f),
        Stage::Distinct(dedup) => Ok(dedup(items)),
        Stage::Skip(n) => Ok(skip_all(items, *n)),
        Stage::Limit(n) => Ok(limit_all(items, *n)),
        Stage::Sort(compare) => Ok(sort_all(items, compare)),
    }
}

pub(crate) fn map_all<T, U, E>(items: Vec<T>, f: impl Fn(T) -> Result<U, E>) -> Result<Vec<U>, E> {
    items.into_iter().map(f).collect()
}

pub(crate) fn filter_all<T, E>(
    items: Vec<T>,
    predicate: impl Fn(&T) -> Result<bool, E>,
) -> Result<Vec<T>, E> {
    let mut kept = Vec::with_capacity(items.len());
    for item in items {
        if predicate(&item)? {
            kept.push(item);
        }
    }
    Ok(kept)
}

pub(crate) fn flat_map_all<T, U, I, E>(
    items: Vec<T>,
    f: impl Fn(T) -> Result<I, E>,
) -> Result<Vec<U>, E>
where
    I: IntoIterator<Item = U>,
{
    let mut flattened = Vec::with_capacity(items.len());
    for item in items {
        flattened.extend(f(item)?);
    }
    Ok(flattened)
}

/// Keeps the first occurrence of each value, in first-seen order.
pub(crate) fn distinct_all<T: Eq + Hash>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    let first_seen: Vec<bool> = items.iter().map(|item| seen.insert(item)).collect();
    drop(seen);

    items
        .into_iter()
        .zip(first_seen)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect()
}

pub(crate) fn skip_all<T>(mut items: Vec<T>, n: usize) -> Vec<T> {
    if n >= items.len() {
        return Vec::new();
    }
    items.split_off(n)
}

pub(crate) fn limit_all<T>(mut items: Vec<T>, n: usize) -> Vec<T> {
    items.truncate(n);
    items
}

/// Stable: elements comparing equal keep their input order.
pub(crate) fn sort_all<T>(mut items: Vec<T>, compare: impl Fn(&T, &T) -> Ordering) -> Vec<T> {
    items.sort_by(compare);
    items
}

/// Left fold from `identity`.
pub(crate) fn fold_sequential<T, R, E>(
    items: Vec<T>,
    identity: R,
    accumulator: impl Fn(R, T) -> Result<R, E>,
) -> Result<R, E> {
    items.into_iter().try_fold(identity, accumulator)
}

/// Partitioned fold: every partition starts from a clone of `identity` and
/// partial results are merged with `combiner` in sequence order.
///
/// Equals [`fold_sequential`] when `combiner` is associative and `identity`
/// is neutral for it. When several elements fail, which error is returned is
/// unspecified.
pub(crate) fn fold_partitioned<T, R, E, A, C>(
    items: Vec<T>,
    identity: R,
    accumulator: A,
    combiner: C,
) -> Result<R, E>
where
    T: Send,
    R: Clone + Send + Sync,
    E: Send,
    A: Fn(R, T) -> Result<R, E> + Send + Sync,
    C: Fn(R, R) -> Result<R, E> + Send + Sync,
{
    items
        .into_par_iter()
        .try_fold(|| identity.clone(), &accumulator)
        .try_reduce(|| identity.clone(), &combiner)
}

/// Left fold seeded with the first element; empty input yields
/// [`Reduced::Empty`].
pub(crate) fn reduce_first<T, E>(
    items: Vec<T>,
    accumulator: impl Fn(T, T) -> Result<T, E>,
) -> Result<Reduced<T>, E> {
    let mut iter = items.into_iter();
    let Some(first) = iter.next() else {
        return Ok(Reduced::Empty);
    };
    iter.try_fold(first, accumulator).map(Reduced::Present)
}
