//! Textual stage specs for integer pipelines.
//!
//! A spec is a colon-separated string: the stage name, then its operator
//! and arguments.
//!
//! | Spec | Meaning |
//! |---|---|
//! | `map:add:N` `map:sub:N` `map:mul:N` `map:div:N` `map:neg` `map:square` | arithmetic map |
//! | `filter:odd` `filter:even` `filter:gt:N` `filter:ge:N` `filter:lt:N` `filter:le:N` `filter:eq:N` `filter:ne:N` | predicate |
//! | `flat_map:repeat:N` (N at most [`MAX_REPEAT`]) `flat_map:digits` | per-element sub-sequences |
//! | `distinct` `skip:N` `limit:N` `sort` `sort:asc` `sort:desc` | structural stages |
//! | `reduce:sum[:SEED]` `reduce:product[:SEED]` `reduce:min` `reduce:max` | terminal reductions |
//! | `count` `join:SEP` | terminal collectors |
//!
//! Every spec prints back to the canonical form it parses from.

use std::fmt;
use std::str::FromStr;

use crate::error::SpecError;

/// Largest `N` accepted by `flat_map:repeat:N`.
pub const MAX_REPEAT: usize = 10_000;

/// Arithmetic applied by `map:*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapOp {
    Add(i64),
    Sub(i64),
    Mul(i64),
    Div(i64),
    Neg,
    Square,
}

/// Predicate applied by `filter:*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    Odd,
    Even,
    Gt(i64),
    Ge(i64),
    Lt(i64),
    Le(i64),
    Eq(i64),
    Ne(i64),
}

/// Sub-sequence generator applied by `flat_map:*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expand {
    /// Each element `n` times.
    Repeat(usize),
    /// Decimal digits of the absolute value, most significant first.
    Digits,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// A type-preserving integer stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntStage {
    Map(MapOp),
    Filter(Predicate),
    FlatMap(Expand),
    Distinct,
    Skip(usize),
    Limit(usize),
    Sort(SortOrder),
}

/// A terminal operation producing a single value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminal {
    /// Sum. With a seed the result is `seed + sum`; without one, an empty
    /// input has no sum.
    Sum(Option<i64>),
    /// Product, seeded like [`Terminal::Sum`].
    Product(Option<i64>),
    Min,
    Max,
    Count,
    Join(String),
}

/// One parsed spec: a stage or a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageSpec {
    Stage(IntStage),
    Terminal(Terminal),
}

fn parse_int<T: FromStr>(stage: &str, value: Option<&str>) -> Result<T, SpecError> {
    let value = value.ok_or_else(|| SpecError::MissingArgument(stage.to_string()))?;
    value
        .trim()
        .parse()
        .map_err(|_| SpecError::InvalidInteger {
            stage: stage.to_string(),
            value: value.to_string(),
        })
}

fn no_argument(stage: &str, extra: Option<&str>) -> Result<(), SpecError> {
    match extra {
        Some(arg) => Err(SpecError::UnexpectedArgument {
            stage: stage.to_string(),
            arg: arg.to_string(),
        }),
        None => Ok(()),
    }
}

fn bare<T>(stage: &str, extra: Option<&str>, value: T) -> Result<T, SpecError> {
    no_argument(stage, extra).map(|()| value)
}

fn parse_repeat(stage: &str, value: Option<&str>) -> Result<usize, SpecError> {
    let times = parse_int(stage, value)?;
    if times > MAX_REPEAT {
        return Err(SpecError::OutOfRange {
            stage: stage.to_string(),
            value: times,
            max: MAX_REPEAT,
        });
    }
    Ok(times)
}

fn parse_seed(stage: &str, value: Option<&str>) -> Result<Option<i64>, SpecError> {
    value.map(|v| parse_int(stage, Some(v))).transpose()
}

impl FromStr for StageSpec {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // `join` takes everything after the first colon, colons and
        // trailing whitespace included.
        let s = s.trim_start();
        if let Some(separator) = s.strip_prefix("join:") {
            return Ok(StageSpec::Terminal(Terminal::Join(separator.to_string())));
        }

        let s = s.trim_end();
        if s.is_empty() {
            return Err(SpecError::Empty);
        }

        let mut parts = s.splitn(3, ':');
        let name = parts.next().unwrap_or_default();
        let op = parts.next();
        let arg = parts.next();
        // everything after the stage name, for stages with no operator
        let rest = s.split_once(':').map(|(_, rest)| rest);

        let spec = match name {
            "map" => {
                let op_name = op.ok_or_else(|| SpecError::MissingArgument(name.to_string()))?;
                let map_op = match op_name {
                    "add" => MapOp::Add(parse_int(s, arg)?),
                    "sub" => MapOp::Sub(parse_int(s, arg)?),
                    "mul" => MapOp::Mul(parse_int(s, arg)?),
                    "div" => MapOp::Div(parse_int(s, arg)?),
                    "neg" => bare(s, arg, MapOp::Neg)?,
                    "square" => bare(s, arg, MapOp::Square)?,
                    other => {
                        return Err(SpecError::UnknownOperator {
                            stage: "map",
                            op: other.to_string(),
                        });
                    }
                };
                StageSpec::Stage(IntStage::Map(map_op))
            }
            "filter" => {
                let op_name = op.ok_or_else(|| SpecError::MissingArgument(name.to_string()))?;
                let predicate = match op_name {
                    "odd" => bare(s, arg, Predicate::Odd)?,
                    "even" => bare(s, arg, Predicate::Even)?,
                    "gt" => Predicate::Gt(parse_int(s, arg)?),
                    "ge" => Predicate::Ge(parse_int(s, arg)?),
                    "lt" => Predicate::Lt(parse_int(s, arg)?),
                    "le" => Predicate::Le(parse_int(s, arg)?),
                    "eq" => Predicate::Eq(parse_int(s, arg)?),
                    "ne" => Predicate::Ne(parse_int(s, arg)?),
                    other => {
                        return Err(SpecError::UnknownOperator {
                            stage: "filter",
                            op: other.to_string(),
                        });
                    }
                };
                StageSpec::Stage(IntStage::Filter(predicate))
            }
            "flat_map" => {
                let op_name = op.ok_or_else(|| SpecError::MissingArgument(name.to_string()))?;
                let expand = match op_name {
                    "repeat" => Expand::Repeat(parse_repeat(s, arg)?),
                    "digits" => bare(s, arg, Expand::Digits)?,
                    other => {
                        return Err(SpecError::UnknownOperator {
                            stage: "flat_map",
                            op: other.to_string(),
                        });
                    }
                };
                StageSpec::Stage(IntStage::FlatMap(expand))
            }
            "distinct" => {
                no_argument(s, rest)?;
                StageSpec::Stage(IntStage::Distinct)
            }
            "skip" => {
                no_argument(s, arg)?;
                StageSpec::Stage(IntStage::Skip(parse_int(s, op)?))
            }
            "limit" => {
                no_argument(s, arg)?;
                StageSpec::Stage(IntStage::Limit(parse_int(s, op)?))
            }
            "sort" => {
                no_argument(s, arg)?;
                let order = match op {
                    None | Some("asc") => SortOrder::Ascending,
                    Some("desc") => SortOrder::Descending,
                    Some(other) => {
                        return Err(SpecError::UnknownOperator {
                            stage: "sort",
                            op: other.to_string(),
                        });
                    }
                };
                StageSpec::Stage(IntStage::Sort(order))
            }
            "reduce" => {
                let op_name = op.ok_or_else(|| SpecError::MissingArgument(name.to_string()))?;
                let terminal = match op_name {
                    "sum" => Terminal::Sum(parse_seed(s, arg)?),
                    "product" => Terminal::Product(parse_seed(s, arg)?),
                    "min" => bare(s, arg, Terminal::Min)?,
                    "max" => bare(s, arg, Terminal::Max)?,
                    other => {
                        return Err(SpecError::UnknownOperator {
                            stage: "reduce",
                            op: other.to_string(),
                        });
                    }
                };
                StageSpec::Terminal(terminal)
            }
            "count" => {
                no_argument(s, rest)?;
                StageSpec::Terminal(Terminal::Count)
            }
            "join" => StageSpec::Terminal(Terminal::Join(String::new())),
            other => return Err(SpecError::UnknownStage(other.to_string())),
        };

        Ok(spec)
    }
}

impl fmt::Display for MapOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapOp::Add(n) => write!(f, "add:{n}"),
            MapOp::Sub(n) => write!(f, "sub:{n}"),
            MapOp::Mul(n) => write!(f, "mul:{n}"),
            MapOp::Div(n) => write!(f, "div:{n}"),
            MapOp::Neg => write!(f, "neg"),
            MapOp::Square => write!(f, "square"),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Odd => write!(f, "odd"),
            Predicate::Even => write!(f, "even"),
            Predicate::Gt(n) => write!(f, "gt:{n}"),
            Predicate::Ge(n) => write!(f, "ge:{n}"),
            Predicate::Lt(n) => write!(f, "lt:{n}"),
            Predicate::Le(n) => write!(f, "le:{n}"),
            Predicate::Eq(n) => write!(f, "eq:{n}"),
            Predicate::Ne(n) => write!(f, "ne:{n}"),
        }
    }
}

impl fmt::Display for IntStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntStage::Map(op) => write!(f, "map:{op}"),
            IntStage::Filter(predicate) => write!(f, "filter:{predicate}"),
            IntStage::FlatMap(Expand::Repeat(n)) => write!(f, "flat_map:repeat:{n}"),
            IntStage::FlatMap(Expand::Digits) => write!(f, "flat_map:digits"),
            IntStage::Distinct => write!(f, "distinct"),
            IntStage::Skip(n) => write!(f, "skip:{n}"),
            IntStage::Limit(n) => write!(f, "limit:{n}"),
            IntStage::Sort(SortOrder::Ascending) => write!(f, "sort:asc"),
            IntStage::Sort(SortOrder::Descending) => write!(f, "sort:desc"),
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::Sum(None) => write!(f, "reduce:sum"),
            Terminal::Sum(Some(seed)) => write!(f, "reduce:sum:{seed}"),
            Terminal::Product(None) => write!(f, "reduce:product"),
            Terminal::Product(Some(seed)) => write!(f, "reduce:product:{seed}"),
            Terminal::Min => write!(f, "reduce:min"),
            Terminal::Max => write!(f, "reduce:max"),
            Terminal::Count => write!(f, "count"),
            Terminal::Join(separator) => write!(f, "join:{separator}"),
        }
    }
}

impl fmt::Display for StageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageSpec::Stage(stage) => stage.fmt(f),
            StageSpec::Terminal(terminal) => terminal.fmt(f),
        }
    }
}

/// Parses a list of spec strings, stopping at the first invalid one.
pub fn parse_specs<S: AsRef<str>>(specs: &[S]) -> Result<Vec<StageSpec>, SpecError> {
    specs.iter().map(|s| s.as_ref().parse()).collect()
}
