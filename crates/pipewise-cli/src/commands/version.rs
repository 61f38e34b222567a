//! Version command implementation.

use crate::style::colors::SemanticStyle;
use crate::style::print_labeled;

/// Version information for the CLI.
const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

pub fn run() {
    println!("{}", format!("{NAME} {VERSION}").header());
    println!();
    println!("Ordered stream pipelines and functional-programming demos.");
    println!();
    println!("Build info:");
    print_labeled("Rust version", rustc_version());
    print_labeled("Target", std::env::consts::ARCH);
    print_labeled("OS", std::env::consts::OS);
}

fn rustc_version() -> &'static str {
    // Minimum supported version; the compiler version is not embedded
    "1.88+"
}
