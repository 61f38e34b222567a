//! Named demos of closures, optionals and stream pipelines.
//!
//! Every demo writes fixed lines to the given writer so its output can be
//! compared literally.

use std::io::Write;

use anyhow::Result;
use pipewise::ExecMode;

pub mod lambdas;
pub mod person;
pub mod streams;
pub mod text;

/// Entry point of a demo. `mode` selects how combiner reductions run.
pub type DemoFn = fn(&mut dyn Write, ExecMode) -> Result<()>;

/// A runnable, named demo.
pub struct Demo {
    pub name: &'static str,
    pub description: &'static str,
    pub run: DemoFn,
}

/// All demos, in the order `pipewise demo` runs them.
pub const DEMOS: &[Demo] = &[
    Demo {
        name: "consumer",
        description: "Three-argument consumer closure",
        run: lambdas::consumer,
    },
    Demo {
        name: "bifunction",
        description: "Two-argument closure returning a string",
        run: lambdas::bifunction,
    },
    Demo {
        name: "executor",
        description: "Closures passed to a function",
        run: lambdas::executor,
    },
    Demo {
        name: "generator",
        description: "Closures returned from a function",
        run: lambdas::generators,
    },
    Demo {
        name: "optional",
        description: "Present and empty optional values",
        run: lambdas::optional,
    },
    Demo {
        name: "map",
        description: "Multiply every number by five",
        run: streams::map,
    },
    Demo {
        name: "flat-map",
        description: "Nested address lists versus flat_map",
        run: streams::flat_map,
    },
    Demo {
        name: "filter",
        description: "Keep odd numbers",
        run: streams::filter,
    },
    Demo {
        name: "skip",
        description: "Drop the first three numbers",
        run: streams::skip,
    },
    Demo {
        name: "limit",
        description: "Keep the first three numbers",
        run: streams::limit,
    },
    Demo {
        name: "distinct",
        description: "Drop repeated numbers",
        run: streams::distinct,
    },
    Demo {
        name: "sort",
        description: "Sort people by age, descending",
        run: streams::sort,
    },
    Demo {
        name: "reduce",
        description: "Fold with identity, accumulator and combiner",
        run: streams::reduce,
    },
    Demo {
        name: "reduce-optional",
        description: "Reduce without identity into an optional",
        run: streams::reduce_optional,
    },
    Demo {
        name: "reverse-words",
        description: "Reverse each word of a sentence",
        run: text::reverse_words_demo,
    },
];

/// Looks up a demo by name.
pub fn find(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|demo| demo.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn output(name: &str) -> String {
        let demo = find(name).unwrap();
        let mut buf = Vec::new();
        (demo.run)(&mut buf, ExecMode::Sequential).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<&str> = DEMOS.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), DEMOS.len());
    }

    #[test]
    fn test_find_unknown() {
        assert!(find("nope").is_none());
    }

    #[test]
    fn test_lambda_outputs() {
        assert_eq!(output("consumer"), "One, Two and Three\nSix, Nine and Ten\n");
        assert_eq!(
            output("bifunction"),
            "The product of 5 and 10 is 50\nThe product of 3 and 5 is 15\n"
        );
        assert_eq!(
            output("executor"),
            "Result of fn(1, 2) is 3\nResult of fn(1, 2) is 2\n"
        );
        assert_eq!(output("generator"), "1 + 2 = 3\n1 * 2 = 2\n");
        assert_eq!(
            output("optional"),
            "Some String: I'm here!\nsomeAbsentString present? No\n"
        );
    }

    #[test]
    fn test_stream_outputs() {
        assert_eq!(output("map"), "[5, 10, 15, 20, 25]\n");
        assert_eq!(
            output("flat-map"),
            "[[John's Home, John's Office], [Mary's Home]]\n\
             [John's Home, John's Office, Mary's Home]\n"
        );
        assert_eq!(output("filter"), "[1, 3, 5]\n");
        assert_eq!(output("skip"), "[4, 5]\n");
        assert_eq!(output("limit"), "[1, 2, 3]\n");
        assert_eq!(output("distinct"), "[1, 2, 3, 5]\n");
        assert_eq!(output("sort"), "[Sean (33), John (26), Mary (25)]\n");
        assert_eq!(output("reduce"), "65\n[1, 2, 3, 4, 5]\n");
        assert_eq!(
            output("reduce-optional"),
            "Step 1. Reduce list to store it in optional.\ntrue\na, a, b\na,a,b\n"
        );
        assert_eq!(
            output("reverse-words"),
            "Original String: Welcome to java's Stream and Lambda\n\
             Reversed String: emocleW ot s'avaj maertS dna adbmaL \n"
        );
    }
}
