use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The set of difficulty labels a card's `level` may take.
///
/// Two label sets are in use by clients, so the accepted set is chosen at
/// startup rather than hard-coded. Matching is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LevelVocabulary {
    #[default]
    EasyMediumComplex,
    LowMediumHigh,
}

impl LevelVocabulary {
    /// Labels ordered from lowest to highest cognitive complexity.
    pub fn levels(&self) -> [&'static str; 3] {
        match self {
            LevelVocabulary::EasyMediumComplex => ["easy", "medium", "complex"],
            LevelVocabulary::LowMediumHigh => ["low", "medium", "high"],
        }
    }

    pub fn contains(&self, level: &str) -> bool {
        let level = level.to_lowercase();
        self.levels().iter().any(|l| *l == level)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LevelVocabulary::EasyMediumComplex => "easy-medium-complex",
            LevelVocabulary::LowMediumHigh => "low-medium-high",
        }
    }

    /// Human readable list used in validation messages, e.g.
    /// `'easy', 'medium', or 'complex'`.
    pub fn describe(&self) -> String {
        let [low, mid, high] = self.levels();
        format!("'{}', '{}', or '{}'", low, mid, high)
    }
}

impl fmt::Display for LevelVocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LevelVocabulary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy-medium-complex" => Ok(LevelVocabulary::EasyMediumComplex),
            "low-medium-high" => Ok(LevelVocabulary::LowMediumHigh),
            other => Err(format!(
                "unknown level vocabulary '{}', expected 'easy-medium-complex' or 'low-medium-high'",
                other
            )),
        }
    }
}
