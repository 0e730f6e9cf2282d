//! Subject, pace, difficulty, view-category and sort-direction enums.
//!
//! Every enum provides `as_str()`, `Display`, and `FromStr`. Parsing accepts the
//! serialized form as well as a lowercase, separator-free spelling so that CLI
//! arguments like `--pace on-pace` or `--subject math` work.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Lowercase and drop separators so `"On Pace"`, `"on-pace"` and `"onpace"` compare equal.
pub(crate) fn fold(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! parse_by_name {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = fold(s);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| fold(candidate.as_str()) == wanted)
                    .ok_or_else(|| CoreError::UnknownValue {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Subject
// ---------------------------------------------------------------------------

/// Subject area a practice session belongs to.
///
/// The set is open: stored data may name subjects not listed here, and those
/// deserialize as `Other`. `FromStr` stays strict so CLI typos are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, JsonSchema)]
pub enum Subject {
    Reading,
    Math,
    Writing,
    Science,
    Vocabulary,
    Grammar,
    Listening,
    Other,
}

impl Subject {
    pub const ALL: [Self; 8] = [
        Self::Reading,
        Self::Math,
        Self::Writing,
        Self::Science,
        Self::Vocabulary,
        Self::Grammar,
        Self::Listening,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reading => "Reading",
            Self::Math => "Math",
            Self::Writing => "Writing",
            Self::Science => "Science",
            Self::Vocabulary => "Vocabulary",
            Self::Grammar => "Grammar",
            Self::Listening => "Listening",
            Self::Other => "Other",
        }
    }
}

parse_by_name!(Subject, "subject");

impl Subject {
    /// Like `FromStr`, but an unlisted name becomes `Other`.
    #[must_use]
    pub fn from_name_lossy(name: &str) -> Self {
        name.parse().unwrap_or(Self::Other)
    }
}

impl<'de> Deserialize<'de> for Subject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name_lossy(&name))
    }
}

// ---------------------------------------------------------------------------
// Pace
// ---------------------------------------------------------------------------

/// How the learner's time compared to the expected time for the set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum Pace {
    Fast,
    #[serde(rename = "On Pace")]
    OnPace,
    Slow,
}

impl Pace {
    pub const ALL: [Self; 3] = [Self::Fast, Self::OnPace, Self::Slow];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fast => "Fast",
            Self::OnPace => "On Pace",
            Self::Slow => "Slow",
        }
    }
}

parse_by_name!(Pace, "pace");

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Difficulty of a set or a single question. Ordered `Easy < Medium < Hard`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Numeric rank used as a sort key.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Hard => 2,
        }
    }
}

parse_by_name!(Difficulty, "difficulty");

// ---------------------------------------------------------------------------
// ViewCategory
// ---------------------------------------------------------------------------

/// The three families of rendering strategies.
///
/// ```text
/// entry     one card/row per practice session
/// question  one row per question, flattened across sessions
/// timeline  sessions laid out chronologically
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ViewCategory {
    Entry,
    Question,
    Timeline,
}

impl ViewCategory {
    pub const ALL: [Self; 3] = [Self::Entry, Self::Question, Self::Timeline];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Question => "question",
            Self::Timeline => "timeline",
        }
    }
}

parse_by_name!(ViewCategory, "view category");

// ---------------------------------------------------------------------------
// SortDirection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub const ALL: [Self; 2] = [Self::Asc, Self::Desc];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

parse_by_name!(SortDirection, "sort direction");

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Math", Subject::Math)]
    #[case("math", Subject::Math)]
    #[case("READING", Subject::Reading)]
    fn subject_parses_case_insensitively(#[case] input: &str, #[case] expected: Subject) {
        assert_eq!(input.parse::<Subject>().unwrap(), expected);
    }

    #[rstest]
    #[case("On Pace")]
    #[case("on-pace")]
    #[case("on_pace")]
    #[case("onpace")]
    fn pace_accepts_separator_variants(#[case] input: &str) {
        assert_eq!(input.parse::<Pace>().unwrap(), Pace::OnPace);
    }

    #[rstest]
    #[case("\"History\"", Subject::Other)]
    #[case("\"Other\"", Subject::Other)]
    #[case("\"Math\"", Subject::Math)]
    #[case("\"math\"", Subject::Math)]
    fn unlisted_subjects_deserialize_as_other(#[case] json: &str, #[case] expected: Subject) {
        assert_eq!(serde_json::from_str::<Subject>(json).unwrap(), expected);
    }

    #[test]
    fn subject_rejects_non_string_json() {
        assert!(serde_json::from_str::<Subject>("7").is_err());
    }

    #[test]
    fn unknown_value_reports_kind() {
        let err = "chemistry".parse::<Subject>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown subject: 'chemistry'");
    }

    #[test]
    fn pace_serializes_with_space() {
        let json = serde_json::to_string(&Pace::OnPace).unwrap();
        assert_eq!(json, "\"On Pace\"");
    }

    #[test]
    fn difficulty_orders_by_rank() {
        assert!(Difficulty::Easy < Difficulty::Medium);
        assert!(Difficulty::Medium < Difficulty::Hard);
        assert_eq!(Difficulty::Hard.rank(), 2);
    }

    #[test]
    fn view_category_roundtrips_display() {
        for category in ViewCategory::ALL {
            assert_eq!(category.to_string().parse::<ViewCategory>().unwrap(), category);
        }
    }

    #[test]
    fn sort_direction_reverses() {
        assert_eq!(SortDirection::Asc.reversed(), SortDirection::Desc);
        assert_eq!(SortDirection::default(), SortDirection::Desc);
    }
}
