//! Closures as values: consumers, bi-functions, generators and optionals.

use std::io::{self, Write};

use anyhow::Result;
use pipewise::{ExecMode, Reduced};

/// A callback taking three arguments.
pub trait TriConsumer<A, B, C> {
    fn accept(&mut self, a: A, b: B, c: C) -> io::Result<()>;
}

impl<A, B, C, F> TriConsumer<A, B, C> for F
where
    F: FnMut(A, B, C) -> io::Result<()>,
{
    fn accept(&mut self, a: A, b: B, c: C) -> io::Result<()> {
        self(a, b, c)
    }
}

/// Integer bi-function chosen by name: `"add"` adds, anything else multiplies.
pub fn generator(which: &str) -> Box<dyn Fn(i32, i32) -> i32> {
    if which == "add" {
        Box::new(|a, b| a + b)
    } else {
        Box::new(|a, b| a * b)
    }
}

fn execute(out: &mut dyn Write, f: impl Fn(i32, i32) -> i32) -> io::Result<()> {
    writeln!(out, "Result of fn(1, 2) is {}", f(1, 2))
}

pub fn consumer(out: &mut dyn Write, _mode: ExecMode) -> Result<()> {
    let mut join = |a: &str, b: &str, c: &str| writeln!(out, "{a}, {b} and {c}");
    join.accept("One", "Two", "Three")?;
    join.accept("Six", "Nine", "Ten")?;
    Ok(())
}

pub fn bifunction(out: &mut dyn Write, _mode: ExecMode) -> Result<()> {
    let describe = |a: i32, b: i32| format!("The product of {a} and {b} is {}", a * b);
    writeln!(out, "{}", describe(5, 10))?;
    writeln!(out, "{}", describe(3, 5))?;
    Ok(())
}

pub fn executor(out: &mut dyn Write, _mode: ExecMode) -> Result<()> {
    let add = |a: i32, b: i32| a + b;
    let multiply = |a: i32, b: i32| a * b;
    execute(out, add)?;
    execute(out, multiply)?;
    Ok(())
}

pub fn generators(out: &mut dyn Write, _mode: ExecMode) -> Result<()> {
    let add = generator("add");
    let multiply = generator("multiply");
    writeln!(out, "1 + 2 = {}", add(1, 2))?;
    writeln!(out, "1 * 2 = {}", multiply(1, 2))?;
    Ok(())
}

pub fn optional(out: &mut dyn Write, _mode: ExecMode) -> Result<()> {
    let some_string = Reduced::from(Some("I'm here!"));
    let absent_string: Reduced<&str> = Reduced::from(None);

    some_string
        .if_present(|s| writeln!(out, "Some String: {s}"))
        .transpose()?;
    absent_string
        .if_present(|s| writeln!(out, "Some Absent String: {s}"))
        .transpose()?;

    let present = if absent_string.is_present() { "Yes" } else { "No" };
    writeln!(out, "someAbsentString present? {present}")?;
    Ok(())
}
