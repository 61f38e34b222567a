//! Error types for pipeline evaluation and stage-spec parsing.

use thiserror::Error;

/// Returned when a value is extracted from an empty [`Reduced`](crate::Reduced).
///
/// Only a reduction without an identity over an empty sequence produces an
/// empty result, so this is the one failure the evaluator itself can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no value present: reduction over an empty sequence")]
pub struct EmptyResultError;

/// Errors raised while parsing or planning textual stage specs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// The spec string was blank.
    #[error("empty stage spec")]
    Empty,

    /// The leading stage name is not recognised.
    #[error("unknown stage '{0}'")]
    UnknownStage(String),

    /// The stage is known but its operator is not.
    #[error("unknown {stage} operator '{op}'")]
    UnknownOperator {
        /// Stage the operator belongs to.
        stage: &'static str,
        /// Operator as written.
        op: String,
    },

    /// A required argument is missing.
    #[error("stage '{0}' expects an argument")]
    MissingArgument(String),

    /// An argument did not parse as an integer.
    #[error("invalid integer '{value}' in stage '{stage}'")]
    InvalidInteger {
        /// Stage the argument belongs to.
        stage: String,
        /// Argument as written.
        value: String,
    },

    /// The stage or operator takes no further argument.
    #[error("unexpected argument '{arg}' in stage '{stage}'")]
    UnexpectedArgument {
        /// Stage as written.
        stage: String,
        /// Leftover text.
        arg: String,
    },

    /// An integer argument exceeds the stage's limit.
    #[error("argument {value} in stage '{stage}' exceeds the maximum of {max}")]
    OutOfRange {
        /// Stage as written.
        stage: String,
        /// Argument as parsed.
        value: usize,
        /// Largest accepted value.
        max: usize,
    },

    /// A terminal reduction appeared before the end of the stage list.
    #[error("'{0}' is a terminal stage and must come last")]
    TerminalNotLast(String),
}

/// Errors raised by the built-in integer stages at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    /// The operation overflowed `i64`.
    #[error("integer overflow in {0}")]
    Overflow(String),

    /// Division by zero.
    #[error("division by zero in {0}")]
    DivisionByZero(String),
}
