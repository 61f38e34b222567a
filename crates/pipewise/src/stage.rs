//! Declarative, type-preserving stages.
//!
//! A [`Stage`] is one step of a pipeline whose element type does not change,
//! so a whole pipeline can be held as a plain `Vec<Stage<T, E>>` and handed
//! to [`evaluate`](crate::evaluate). Type-changing pipelines use the
//! [`Pipeline`](crate::Pipeline) builder instead.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;

use crate::executor::distinct_all;
use crate::plan::StageKind;

type MapFn<T, E> = Box<dyn Fn(T) -> Result<T, E>>;
type PredicateFn<T, E> = Box<dyn Fn(&T) -> Result<bool, E>>;
type FlatMapFn<T, E> = Box<dyn Fn(T) -> Result<Vec<T>, E>>;
type CompareFn<T> = Box<dyn Fn(&T, &T) -> Ordering>;
type DedupFn<T> = Box<dyn Fn(Vec<T>) -> Vec<T>>;

/// One transformation step over a sequence of `T`.
///
/// User functions may fail with `E`; the first failure aborts evaluation and
/// is returned unchanged.
pub enum Stage<T, E = Infallible> {
    /// Replaces every element with `f(element)`.
    Map(MapFn<T, E>),
    /// Keeps elements for which the predicate holds.
    Filter(PredicateFn<T, E>),
    /// Replaces every element with a sub-sequence, concatenated in order.
    FlatMap(FlatMapFn<T, E>),
    /// Keeps the first occurrence of each value. Built by
    /// [`Stage::distinct`], which is the only place hashing is required.
    Distinct(DedupFn<T>),
    /// Drops the first `n` elements.
    Skip(usize),
    /// Keeps at most the first `n` elements.
    Limit(usize),
    /// Stable sort by comparator.
    Sort(CompareFn<T>),
}

impl<T: 'static, E: 'static> Stage<T, E> {
    /// Infallible map.
    pub fn map(f: impl Fn(T) -> T + 'static) -> Self {
        Stage::Map(Box::new(move |item| Ok(f(item))))
    }

    /// Fallible map.
    pub fn try_map(f: impl Fn(T) -> Result<T, E> + 'static) -> Self {
        Stage::Map(Box::new(f))
    }

    /// Infallible filter.
    pub fn filter(predicate: impl Fn(&T) -> bool + 'static) -> Self {
        Stage::Filter(Box::new(move |item| Ok(predicate(item))))
    }

    /// Fallible filter.
    pub fn try_filter(predicate: impl Fn(&T) -> Result<bool, E> + 'static) -> Self {
        Stage::Filter(Box::new(predicate))
    }

    /// Infallible flat map.
    pub fn flat_map<I>(f: impl Fn(T) -> I + 'static) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Stage::FlatMap(Box::new(move |item| Ok(f(item).into_iter().collect())))
    }

    /// Fallible flat map.
    pub fn try_flat_map<I>(f: impl Fn(T) -> Result<I, E> + 'static) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Stage::FlatMap(Box::new(move |item| Ok(f(item)?.into_iter().collect())))
    }

    /// Stable sort by comparator.
    pub fn sort_by(compare: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        Stage::Sort(Box::new(compare))
    }
}

impl<T: Eq + Hash + 'static, E: 'static> Stage<T, E> {
    /// First-seen deduplication.
    pub fn distinct() -> Self {
        Stage::Distinct(Box::new(distinct_all::<T>))
    }
}

impl<T, E> Stage<T, E> {
    /// Returns the plan entry for this stage.
    pub fn kind(&self) -> StageKind {
        match self {
            Stage::Map(_) => StageKind::Map,
            Stage::Filter(_) => StageKind::Filter,
            Stage::FlatMap(_) => StageKind::FlatMap,
            Stage::Distinct(_) => StageKind::Distinct,
            Stage::Skip(n) => StageKind::Skip(*n),
            Stage::Limit(n) => StageKind::Limit(*n),
            Stage::Sort(_) => StageKind::Sort,
        }
    }
}

impl<T, E> fmt::Debug for Stage<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stage({})", self.kind())
    }
}
