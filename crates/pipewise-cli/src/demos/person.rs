//! Person fixture shared by the stream demos.

use std::fmt;

/// A person with a list of addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub addresses: Vec<String>,
    pub age: u32,
}

impl Person {
    pub fn new(name: &str, addresses: &[&str], age: u32) -> Self {
        Self {
            name: name.to_string(),
            addresses: addresses.iter().map(ToString::to_string).collect(),
            age,
        }
    }

    pub fn john() -> Self {
        Self::new("John", &["John's Home", "John's Office"], 26)
    }

    pub fn mary() -> Self {
        Self::new("Mary", &["Mary's Home"], 25)
    }

    pub fn sean() -> Self {
        Self::new("Sean", &["Sean's Home"], 33)
    }
}

/// Renders as `Name (age)`.
impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.age)
    }
}
