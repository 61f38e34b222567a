//! Typed pipeline builder.
//!
//! A [`Pipeline`] records stages lazily and runs them, in declaration
//! order, when a terminal operation (`collect`, `count`, `join`, `fold`,
//! `fold_with`, `reduce`, ...) is called. Stages may change the element type.
//!
//! ```ignore
//! use pipewise::Pipeline;
//!
//! let odds = Pipeline::<i32>::from_vec(vec![1, 2, 3, 4, 5])
//!     .filter(|n| n % 2 == 1)
//!     .map(|n| n * 10)
//!     .to_vec();
//! assert_eq!(odds, vec![10, 30, 50]);
//! ```

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt::{self, Display};
use std::hash::Hash;

use tracing::{debug, trace};

use crate::executor::{self, ExecMode};
use crate::plan::{Plan, StageKind};
use crate::reduced::Reduced;
use crate::stage::Stage;

type Source<'a, T, E> = Box<dyn FnOnce() -> Result<Vec<T>, E> + 'a>;

/// A lazily evaluated sequence of stages over elements of type `T`.
///
/// `E` is the error type user functions may fail with; infallible pipelines
/// use the default [`Infallible`] and can finish with [`to_vec`](Self::to_vec).
#[must_use = "pipelines do nothing until a terminal operation is called"]
pub struct Pipeline<'a, T, E = Infallible> {
    source: Source<'a, T, E>,
    plan: Plan,
}

impl<'a, T: 'a, E: 'a> Pipeline<'a, T, E> {
    /// Starts a pipeline over an owned sequence.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            source: Box::new(move || Ok(items)),
            plan: Plan::new(),
        }
    }

    /// Returns the stages recorded so far.
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Renders the plan, e.g. `filter -> map -> limit(3)`.
    pub fn explain(&self) -> String {
        self.plan.to_string()
    }

    fn then<U: 'a>(
        self,
        kind: StageKind,
        step: impl FnOnce(Vec<T>) -> Result<Vec<U>, E> + 'a,
    ) -> Pipeline<'a, U, E> {
        let Self { source, mut plan } = self;
        plan.push(kind);
        Pipeline {
            source: Box::new(move || {
                let items = source()?;
                trace!(stage = %kind, input_len = items.len(), "applying stage");
                step(items)
            }),
            plan,
        }
    }

    /// Applies `f` to every element.
    pub fn map<U: 'a>(self, f: impl Fn(T) -> U + 'a) -> Pipeline<'a, U, E> {
        self.then(StageKind::Map, move |items| {
            Ok(items.into_iter().map(f).collect())
        })
    }

    /// Applies a fallible `f` to every element, stopping at the first error.
    pub fn try_map<U: 'a>(self, f: impl Fn(T) -> Result<U, E> + 'a) -> Pipeline<'a, U, E> {
        self.then(StageKind::Map, move |items| executor::map_all(items, f))
    }

    /// Keeps elements for which `predicate` holds.
    pub fn filter(self, predicate: impl Fn(&T) -> bool + 'a) -> Self {
        self.then(StageKind::Filter, move |items| {
            executor::filter_all(items, |item| Ok(predicate(item)))
        })
    }

    /// Keeps elements for which a fallible `predicate` holds.
    pub fn try_filter(self, predicate: impl Fn(&T) -> Result<bool, E> + 'a) -> Self {
        self.then(StageKind::Filter, move |items| {
            executor::filter_all(items, predicate)
        })
    }

    /// Replaces each element with the elements of `f(element)`, in order.
    pub fn flat_map<U: 'a, I>(self, f: impl Fn(T) -> I + 'a) -> Pipeline<'a, U, E>
    where
        I: IntoIterator<Item = U>,
    {
        self.then(StageKind::FlatMap, move |items| {
            executor::flat_map_all(items, |item| Ok(f(item)))
        })
    }

    /// Fallible [`flat_map`](Self::flat_map).
    pub fn try_flat_map<U: 'a, I>(self, f: impl Fn(T) -> Result<I, E> + 'a) -> Pipeline<'a, U, E>
    where
        I: IntoIterator<Item = U>,
    {
        self.then(StageKind::FlatMap, move |items| {
            executor::flat_map_all(items, f)
        })
    }

    /// Drops the first `n` elements.
    pub fn skip(self, n: usize) -> Self {
        self.then(StageKind::Skip(n), move |items| {
            Ok(executor::skip_all(items, n))
        })
    }

    /// Keeps at most the first `n` elements.
    pub fn limit(self, n: usize) -> Self {
        self.then(StageKind::Limit(n), move |items| {
            Ok(executor::limit_all(items, n))
        })
    }

    /// Stable sort by `compare`.
    pub fn sorted_by(self, compare: impl Fn(&T, &T) -> Ordering + 'a) -> Self {
        self.then(StageKind::Sort, move |items| {
            Ok(executor::sort_all(items, compare))
        })
    }

    /// Stable sort by a key.
    pub fn sorted_by_key<K: Ord>(self, key: impl Fn(&T) -> K + 'a) -> Self {
        self.sorted_by(move |a, b| key(a).cmp(&key(b)))
    }

    /// Appends a declarative [`Stage`].
    pub fn stage(self, stage: Stage<T, E>) -> Self {
        let kind = stage.kind();
        self.then(kind, move |items| executor::apply_stage(items, &stage))
    }

    /// Runs the pipeline and returns the resulting sequence.
    pub fn collect(self) -> Result<Vec<T>, E> {
        let Self { source, plan } = self;
        debug!(plan = %plan, "running pipeline");
        let items = source()?;
        debug!(output_len = items.len(), "pipeline finished");
        Ok(items)
    }

    /// Runs the pipeline and returns the number of resulting elements.
    pub fn count(self) -> Result<usize, E> {
        self.collect().map(|items| items.len())
    }

    /// Runs the pipeline and joins the elements' `Display` forms with `separator`.
    pub fn join(self, separator: &str) -> Result<String, E>
    where
        T: Display,
    {
        let items = self.collect()?;
        Ok(items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator))
    }

    /// Left fold from `identity`.
    pub fn fold<R>(self, identity: R, accumulator: impl Fn(R, T) -> R) -> Result<R, E> {
        self.try_fold(identity, |acc, item| Ok(accumulator(acc, item)))
    }

    /// Fallible left fold from `identity`.
    pub fn try_fold<R>(
        self,
        identity: R,
        accumulator: impl Fn(R, T) -> Result<R, E>,
    ) -> Result<R, E> {
        let items = self.collect()?;
        executor::fold_sequential(items, identity, accumulator)
    }

    /// Fold with an identity, accumulator and combiner.
    ///
    /// Under [`ExecMode::Sequential`] (or a sequence shorter than the
    /// parallel threshold) this is a left fold and `combiner` is not called.
    /// Otherwise the sequence is partitioned, each partition folds from a
    /// clone of `identity`, and partial results are merged with `combiner` in
    /// sequence order. Both paths agree when `combiner` is associative and
    /// `identity` is neutral for it; nothing is guaranteed otherwise.
    pub fn fold_with<R, A, C>(
        self,
        identity: R,
        accumulator: A,
        combiner: C,
        mode: ExecMode,
    ) -> Result<R, E>
    where
        T: Send,
        R: Clone + Send + Sync,
        E: Send,
        A: Fn(R, T) -> R + Send + Sync,
        C: Fn(R, R) -> R + Send + Sync,
    {
        self.try_fold_with(
            identity,
            |acc, item| Ok(accumulator(acc, item)),
            |left, right| Ok(combiner(left, right)),
            mode,
        )
    }

    /// Fallible [`fold_with`](Self::fold_with).
    pub fn try_fold_with<R, A, C>(
        self,
        identity: R,
        accumulator: A,
        combiner: C,
        mode: ExecMode,
    ) -> Result<R, E>
    where
        T: Send,
        R: Clone + Send + Sync,
        E: Send,
        A: Fn(R, T) -> Result<R, E> + Send + Sync,
        C: Fn(R, R) -> Result<R, E> + Send + Sync,
    {
        let items = self.collect()?;
        if mode.partitions(items.len()) {
            debug!(len = items.len(), "partitioned fold");
            executor::fold_partitioned(items, identity, accumulator, combiner)
        } else {
            executor::fold_sequential(items, identity, accumulator)
        }
    }

    /// Always-partitioned [`fold_with`](Self::fold_with).
    pub fn par_fold<R, A, C>(self, identity: R, accumulator: A, combiner: C) -> Result<R, E>
    where
        T: Send,
        R: Clone + Send + Sync,
        E: Send,
        A: Fn(R, T) -> R + Send + Sync,
        C: Fn(R, R) -> R + Send + Sync,
    {
        self.fold_with(identity, accumulator, combiner, ExecMode::Parallel { min_len: 0 })
    }

    /// Reduction without an identity: folds from the first element, or
    /// returns [`Reduced::Empty`] for an empty sequence.
    pub fn reduce(self, accumulator: impl Fn(T, T) -> T) -> Result<Reduced<T>, E> {
        self.try_reduce(|acc, item| Ok(accumulator(acc, item)))
    }

    /// Fallible [`reduce`](Self::reduce).
    pub fn try_reduce(
        self,
        accumulator: impl Fn(T, T) -> Result<T, E>,
    ) -> Result<Reduced<T>, E> {
        let items = self.collect()?;
        executor::reduce_first(items, accumulator)
    }
}

impl<'a, T: Eq + Hash + 'a, E: 'a> Pipeline<'a, T, E> {
    /// Keeps the first occurrence of each value, in first-seen order.
    pub fn distinct(self) -> Self {
        self.then(StageKind::Distinct, |items| Ok(executor::distinct_all(items)))
    }
}

impl<'a, T: Ord + 'a, E: 'a> Pipeline<'a, T, E> {
    /// Stable sort in natural order.
    pub fn sorted(self) -> Self {
        self.sorted_by(T::cmp)
    }
}

impl<'a, T: 'a> Pipeline<'a, T, Infallible> {
    /// Runs an infallible pipeline.
    pub fn to_vec(self) -> Vec<T> {
        match self.collect() {
            Ok(items) => items,
            Err(never) => match never {},
        }
    }
}

impl<'a, T: 'a, E: 'a> FromIterator<T> for Pipeline<'a, T, E> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T, E> fmt::Debug for Pipeline<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("plan", &self.plan.to_string())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_preserves_order_and_count() {
        let mapped = Pipeline::<i32>::from_vec(vec![1, 2, 3, 4, 5]).map(|n| n * 5).to_vec();
        assert_eq!(mapped, vec![5, 10, 15, 20, 25]);
    }

    #[test]
    fn test_map_changes_type() {
        let lengths = Pipeline::<&str>::from_vec(vec!["a", "bcd", "ef"])
            .map(str::len)
            .to_vec();
        assert_eq!(lengths, vec![1, 3, 2]);
    }

    #[test]
    fn test_explain_records_stages() {
        let pipeline = Pipeline::<i32>::from_vec(vec![1, 2, 3])
            .filter(|n| *n > 1)
            .map(|n| n + 1)
            .distinct()
            .skip(1)
            .limit(3)
            .sorted();
        assert_eq!(
            pipeline.explain(),
            "filter -> map -> distinct -> skip(1) -> limit(3) -> sort"
        );
        assert_eq!(pipeline.plan().len(), 6);
    }

    #[test]
    fn test_stages_run_in_declared_order() {
        // limit then skip differs from skip then limit
        let a = Pipeline::<i32>::from_vec(vec![1, 2, 3, 4, 5]).limit(3).skip(1).to_vec();
        let b = Pipeline::<i32>::from_vec(vec![1, 2, 3, 4, 5]).skip(1).limit(3).to_vec();
        assert_eq!(a, vec![2, 3]);
        assert_eq!(b, vec![2, 3, 4]);
    }

    #[test]
    fn test_try_map_propagates_error_unchanged() {
        let result = Pipeline::<i32, String>::from_vec(vec![1, 2, 3])
            .try_map(|n| {
                if n == 2 {
                    Err(format!("bad {n}"))
                } else {
                    Ok(n)
                }
            })
            .map(|n| n * 100)
            .collect();
        assert_eq!(result, Err("bad 2".to_string()));
    }

    #[test]
    fn test_error_skips_remaining_stages() {
        let later = std::cell::Cell::new(0);
        let result = Pipeline::<i32, &str>::from_vec(vec![1, 2, 3])
            .try_filter(|_| Err("stop"))
            .map(|n| {
                later.set(later.get() + 1);
                n
            })
            .collect();
        assert_eq!(result, Err("stop"));
        assert_eq!(later.get(), 0);
    }

    #[test]
    fn test_join_and_count() {
        let joined = Pipeline::<&str>::from_vec(vec!["a", "b", "a"])
            .sorted()
            .join(",")
            .unwrap();
        assert_eq!(joined, "a,a,b");

        let count = Pipeline::<i32>::from_vec(vec![1, 2, 3]).filter(|n| *n != 2).count();
        assert_eq!(count, Ok(2));
    }

    #[test]
    fn test_fold_with_sequential_never_combines() {
        let combined = std::sync::atomic::AtomicUsize::new(0);
        let sum = Pipeline::<i32>::from_vec(vec![1, 2, 3, 4, 5])
            .fold_with(
                50,
                |a, b| a + b,
                |a, b| {
                    combined.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                    a + b
                },
                ExecMode::Sequential,
            )
            .unwrap();
        assert_eq!(sum, 65);
        assert_eq!(combined.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn test_stage_appends_declarative_stage() {
        let out = Pipeline::<i32>::from_vec(vec![3, 1, 3, 2])
            .stage(Stage::distinct())
            .stage(Stage::sort_by(i32::cmp))
            .to_vec();
        assert_eq!(out, vec![1, 2, 3]);
    }

    #[test]
    fn test_from_iterator() {
        let pipeline: Pipeline<'_, u8> = (1..=3).collect();
        assert_eq!(pipeline.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_debug_shows_plan() {
        let pipeline = Pipeline::<i32>::from_vec(vec![]).limit(1);
        assert_eq!(format!("{pipeline:?}"), "Pipeline { plan: \"limit(1)\", .. }");
    }
}
