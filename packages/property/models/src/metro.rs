use std::fmt;

use serde::{Deserialize, Serialize};

/// Grouping key for a metro market, e.g. `"Atlanta, GA"`.
///
/// Built from a capitalized city and an upper-cased state so that
/// `"ATLANTA"/"ga"` and `"Atlanta"/"GA"` land in the same metro. Only the
/// first character of the city is upper-cased; the rest is lower-cased,
/// so `"NEW YORK"` becomes `"New york"`. Neither part is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetroKey(String);

impl MetroKey {
    /// Builds a key from raw city and state strings.
    ///
    /// Returns `None` if either part is empty.
    #[must_use]
    pub fn new(city: &str, state: &str) -> Option<Self> {
        if city.is_empty() || state.is_empty() {
            return None;
        }
        Some(Self(format!("{}, {}", capitalize(city), state.to_uppercase())))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MetroKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for MetroKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}
