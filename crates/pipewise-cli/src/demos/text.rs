//! Word reversal.

use std::io::Write;

use anyhow::Result;
use pipewise::{ExecMode, Pipeline};

/// Splits on single spaces. Empty words between or before spaces are kept;
/// trailing empty words are dropped unless `text` contains no space at all.
fn words(text: &str) -> Vec<&str> {
    let mut words: Vec<&str> = text.split(' ').collect();
    if text.contains(' ') {
        while words.last().is_some_and(|word| word.is_empty()) {
            words.pop();
        }
    }
    words
}

/// Reverses every space-separated word by characters, keeping word order.
/// Each word is followed by a single space.
pub fn reverse_words(text: &str) -> String {
    let reversed = Pipeline::<&str>::from_vec(words(text))
        .map(|word| word.chars().rev().collect::<String>())
        .fold(String::with_capacity(text.len() + 1), |mut acc, word| {
            acc.push_str(&word);
            acc.push(' ');
            acc
        });
    match reversed {
        Ok(text) => text,
        Err(never) => match never {},
    }
}

pub fn reverse_words_demo(out: &mut dyn Write, _mode: ExecMode) -> Result<()> {
    let text = "Welcome to java's Stream and Lambda";
    writeln!(out, "Original String: {text}")?;
    writeln!(out, "Reversed String: {}", reverse_words(text))?;
    Ok(())
}
