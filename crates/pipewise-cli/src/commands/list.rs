//! Demo listing.

use crate::demos::DEMOS;
use crate::style::{list_table, print_hint};

pub fn run() {
    let rows: Vec<Vec<String>> = DEMOS
        .iter()
        .map(|demo| vec![demo.name.to_string(), demo.description.to_string()])
        .collect();
    println!("{}", list_table(&["Demo", "Description"], &rows));
    print_hint("Run one with", "pipewise demo <NAME>");
}
