//! Phase lookup keyed by normalized phase name.

use std::collections::HashMap;

use super::Phase;

/// Lookup of a challenge's phases by camel-cased name
/// (`"Iterative Review"` -> `iterativeReview`).
///
/// Phases sharing a name collapse to the last one encountered. That is
/// accepted lossy behavior carried over from the upstream data shape, not
/// something to correct here.
#[derive(Debug, Default)]
pub struct PhaseIndex<'a> {
    by_name: HashMap<String, &'a Phase>,
}

impl<'a> PhaseIndex<'a> {
    /// Index the challenge's phase list. An empty list yields an empty
    /// index; there is no error path.
    pub fn build(phases: &'a [Phase]) -> Self {
        let mut by_name = HashMap::with_capacity(phases.len());
        for phase in phases {
            by_name.insert(camel_case(&phase.name), phase);
        }
        Self { by_name }
    }

    pub fn get(&self, key: &str) -> Option<&'a Phase> {
        self.by_name.get(key).copied()
    }

    /// The registration phase, when the challenge has one.
    pub fn registration(&self) -> Option<&'a Phase> {
        self.get("registration")
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Camel-case a phase name: words split on non-alphanumeric characters, the
/// first word lowered, every later word capitalized.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (position, word) in name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .enumerate()
    {
        let mut chars = word.chars();
        match chars.next() {
            Some(head) if position == 0 => out.extend(head.to_lowercase()),
            Some(head) => out.extend(head.to_uppercase()),
            None => continue,
        }
        out.extend(chars.flat_map(char::to_lowercase));
    }
    out
}
