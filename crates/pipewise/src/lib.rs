//! # pipewise: ordered stream pipelines
//!
//! This crate evaluates declarative transformation stages over ordered,
//! in-memory sequences, left to right, producing either a transformed
//! sequence or a single aggregated value.
//!
//! ## Stages
//!
//! - `map` / `try_map`: one output per input, order and count preserved
//! - `filter` / `try_filter`: keeps matching elements in order
//! - `flat_map`: concatenates per-element sub-sequences in order
//! - `distinct`: first occurrence of each value, first-seen order
//! - `skip(n)` / `limit(n)`: drop or keep a prefix; `n` past the end is fine
//! - `sorted` / `sorted_by`: stable sort
//!
//! Terminals: `collect`, `count`, `join`, `fold`, `fold_with` (identity,
//! accumulator and combiner, optionally partitioned with rayon), and
//! `reduce` (no identity, returns a [`Reduced`]).
//!
//! ## Usage
//!
//! ```ignore
//! use pipewise::{ExecMode, Pipeline, Reduced};
//!
//! let total = Pipeline::<i32>::from_vec(vec![1, 2, 3, 4, 5])
//!     .fold_with(50, |a, b| a + b, |a, b| a + b, ExecMode::Sequential)?;
//! assert_eq!(total, 65);
//!
//! let max = Pipeline::<i32>::from_vec(vec![]).reduce(i32::max)?;
//! assert!(!max.is_present());
//! ```
//!
//! Type-preserving pipelines can also be held as data:
//!
//! ```ignore
//! use pipewise::{Stage, evaluate};
//!
//! let stages = vec![Stage::filter(|n: &i32| n % 2 == 1), Stage::Limit(2)];
//! assert_eq!(evaluate(vec![1, 2, 3, 4, 5], &stages)?, vec![1, 3]);
//! ```
//!
//! ## Integer stage specs
//!
//! [`parse_specs`] and [`plan_specs`] turn strings such as `filter:odd` or
//! `reduce:sum:50` into an executable [`IntPlan`].

mod error;
mod executor;
mod parser;
mod pipeline;
mod plan;
mod planner;
mod reduced;
mod stage;


// Re-export public types
pub use error::{ArithmeticError, EmptyResultError, SpecError};
pub use executor::{ExecMode, evaluate};
pub use parser::{
    Expand, IntStage, MAX_REPEAT, MapOp, Predicate, SortOrder, StageSpec, Terminal, parse_specs,
};
pub use pipeline::Pipeline;
pub use plan::{Plan, StageKind};
pub use planner::{IntPlan, Outcome, plan_specs};
pub use reduced::Reduced;
pub use stage::Stage;
