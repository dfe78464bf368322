use serde::Deserialize;

use crosspath_base::Platform;

/// How path segments and volumes are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    IgnoreCase,
    CaseSensitive,
}

impl Comparison {
    /// Case-insensitive on Windows, case-sensitive everywhere else.
    pub fn for_platform(platform: Platform) -> Self {
        if platform.is_windows() {
            Comparison::IgnoreCase
        } else {
            Comparison::CaseSensitive
        }
    }

    pub fn equals(&self, first: &str, second: &str) -> bool {
        match self {
            Comparison::CaseSensitive => first == second,
            Comparison::IgnoreCase => first
                .chars()
                .flat_map(char::to_lowercase)
                .eq(second.chars().flat_map(char::to_lowercase)),
        }
    }

    pub fn equals_optional(&self, first: Option<&str>, second: Option<&str>) -> bool {
        match (first, second) {
            (None, None) => true,
            (Some(first), Some(second)) => self.equals(first, second),
            _ => false,
        }
    }

    /// Folds a string so that two values equal under this comparison fold to the same string.
    pub fn fold(&self, value: &str) -> String {
        match self {
            Comparison::CaseSensitive => value.to_string(),
            Comparison::IgnoreCase => value.chars().flat_map(char::to_lowercase).collect(),
        }
    }
}
