//! Word reversal command.

use crate::demos::text::reverse_words;

pub fn run(text: &str) {
    println!("{}", reverse_words(text));
}
