//! Present-or-empty result of a reduction without an identity.

use crate::error::EmptyResultError;

/// The outcome of [`Pipeline::reduce`](crate::Pipeline::reduce).
///
/// A reduction without an identity has nothing to return for an empty
/// sequence. Callers check [`is_present`](Self::is_present) or consume the
/// value through [`if_present`](Self::if_present); [`get`](Self::get) on an
/// empty result is an explicit [`EmptyResultError`], never a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reduced<T> {
    /// A value was produced.
    Present(T),
    /// The input sequence was empty.
    Empty,
}

impl<T> Reduced<T> {
    /// Wraps a value.
    pub fn of(value: T) -> Self {
        Reduced::Present(value)
    }

    /// Returns the empty result.
    pub fn empty() -> Self {
        Reduced::Empty
    }

    /// Returns true if a value is present.
    pub fn is_present(&self) -> bool {
        matches!(self, Reduced::Present(_))
    }

    /// Returns true if no value is present.
    pub fn is_empty(&self) -> bool {
        matches!(self, Reduced::Empty)
    }

    /// Calls `f` with the value if one is present; does nothing otherwise.
    ///
    /// Returns what `f` returned, so a fallible consumer can be followed by
    /// `.transpose()?`.
    pub fn if_present<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        match self {
            Reduced::Present(value) => Some(f(value)),
            Reduced::Empty => None,
        }
    }

    /// Extracts the value.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyResultError`] when the result is empty.
    pub fn get(self) -> Result<T, EmptyResultError> {
        match self {
            Reduced::Present(value) => Ok(value),
            Reduced::Empty => Err(EmptyResultError),
        }
    }

    /// Returns the value, or `default` when empty.
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Reduced::Present(value) => value,
            Reduced::Empty => default,
        }
    }

    /// Borrows the contained value.
    pub fn as_ref(&self) -> Reduced<&T> {
        match self {
            Reduced::Present(value) => Reduced::Present(value),
            Reduced::Empty => Reduced::Empty,
        }
    }

    /// Transforms the contained value, keeping emptiness.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reduced<U> {
        match self {
            Reduced::Present(value) => Reduced::Present(f(value)),
            Reduced::Empty => Reduced::Empty,
        }
    }

    /// Converts into an `Option`.
    pub fn into_option(self) -> Option<T> {
        self.into()
    }
}

impl<T> Default for Reduced<T> {
    fn default() -> Self {
        Reduced::Empty
    }
}

impl<T> From<Option<T>> for Reduced<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Reduced::Present(v),
            None => Reduced::Empty,
        }
    }
}

impl<T> From<Reduced<T>> for Option<T> {
    fn from(value: Reduced<T>) -> Self {
        match value {
            Reduced::Present(v) => Some(v),
            Reduced::Empty => None,
        }
    }
}
