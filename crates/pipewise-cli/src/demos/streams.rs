//! Stream pipeline demos over small fixed inputs.

use std::fmt::Display;
use std::io::Write;

use anyhow::Result;
use pipewise::{ExecMode, Pipeline};

use super::person::Person;

/// Renders a list as `[a, b, c]` using each element's `Display`.
pub fn list<T: Display>(items: &[T]) -> String {
    let body = items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{body}]")
}

fn numbers() -> Vec<i32> {
    vec![1, 2, 3, 4, 5]
}

pub fn map(out: &mut dyn Write, _mode: ExecMode) -> Result<()> {
    let mapped = Pipeline::<i32>::from_vec(numbers()).map(|n| n * 5).to_vec();
    writeln!(out, "{}", list(&mapped))?;
    Ok(())
}

pub fn flat_map(out: &mut dyn Write, _mode: ExecMode) -> Result<()> {
    let people = vec![Person::john(), Person::mary()];

    let nested = Pipeline::<Person>::from_vec(people.clone())
        .map(|person| list(&person.addresses))
        .to_vec();
    let flattened = Pipeline::<Person>::from_vec(people)
        .flat_map(|person| person.addresses)
        .to_vec();

    writeln!(out, "{}", list(&nested))?;
    writeln!(out, "{}", list(&flattened))?;
    Ok(())
}

pub fn filter(out: &mut dyn Write, _mode: ExecMode) -> Result<()> {
    let odds = Pipeline::<i32>::from_vec(numbers())
        .filter(|n| n % 2 == 1)
        .to_vec();
    writeln!(out, "{}", list(&odds))?;
    Ok(())
}

pub fn skip(out: &mut dyn Write, _mode: ExecMode) -> Result<()> {
    let remainder = Pipeline::<i32>::from_vec(numbers()).skip(3).to_vec();
    writeln!(out, "{}", list(&remainder))?;
    Ok(())
}

pub fn limit(out: &mut dyn Write, _mode: ExecMode) -> Result<()> {
    let taken = Pipeline::<i32>::from_vec(numbers()).limit(3).to_vec();
    writeln!(out, "{}", list(&taken))?;
    Ok(())
}

pub fn distinct(out: &mut dyn Write, _mode: ExecMode) -> Result<()> {
    let distinct = Pipeline::<i32>::from_vec(vec![1, 1, 2, 3, 5])
        .distinct()
        .to_vec();
    writeln!(out, "{}", list(&distinct))?;
    Ok(())
}

pub fn sort(out: &mut dyn Write, _mode: ExecMode) -> Result<()> {
    // Person has no natural order, so the comparator is explicit
    let sorted = Pipeline::<Person>::from_vec(vec![Person::john(), Person::mary(), Person::sean()])
        .sorted_by(|p1, p2| p2.age.cmp(&p1.age))
        .to_vec();
    writeln!(out, "{}", list(&sorted))?;
    Ok(())
}

pub fn reduce(out: &mut dyn Write, mode: ExecMode) -> Result<()> {
    // 50 is not neutral for `+`: partitions fold from 0 and 50 is added once
    let sum = 50
        + Pipeline::<i32>::from_vec(numbers()).fold_with(
            0,
            |a, b| a + b,
            |a, b| a + b,
            mode,
        )?;

    let as_list = Pipeline::<i32>::from_vec(numbers()).fold_with(
        Vec::new(),
        |mut acc: Vec<i32>, n| {
            acc.push(n);
            acc
        },
        |mut left, right| {
            left.extend(right);
            left
        },
        mode,
    )?;

    writeln!(out, "{sum}")?;
    writeln!(out, "{}", list(&as_list))?;
    Ok(())
}

pub fn reduce_optional(out: &mut dyn Write, _mode: ExecMode) -> Result<()> {
    let strings = vec!["a", "b", "a"];

    writeln!(out, "Step 1. Reduce list to store it in optional.")?;
    let reduced = Pipeline::<&str>::from_vec(strings.clone())
        .sorted()
        .map(String::from)
        .reduce(|s1, s2| format!("{s1}, {s2}"))?;

    writeln!(out, "{}", reduced.is_present())?;
    writeln!(out, "{}", reduced.get()?)?;

    let joined = Pipeline::<&str>::from_vec(strings).sorted().join(",")?;
    writeln!(out, "{joined}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_rendering() {
        assert_eq!(list(&[1, 2]), "[1, 2]");
        assert_eq!(list::<i32>(&[]), "[]");
        assert_eq!(list(&["John's Home"]), "[John's Home]");
    }

    #[test]
    fn test_reduce_is_mode_independent() {
        let mut sequential = Vec::new();
        let mut parallel = Vec::new();
        reduce(&mut sequential, ExecMode::Sequential).unwrap();
        reduce(&mut parallel, ExecMode::Parallel { min_len: 1 }).unwrap();
        assert_eq!(sequential, parallel);
        let mut forced = Vec::new();
        reduce(&mut forced, ExecMode::Parallel { min_len: 0 }).unwrap();
        assert_eq!(forced, parallel);
        assert_eq!(String::from_utf8(sequential).unwrap(), "65\n[1, 2, 3, 4, 5]\n");
    }
}
