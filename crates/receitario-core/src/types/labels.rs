use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// A whole number of minutes, rendered as `"<n> min"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Minutes(pub u32);

impl Minutes {
    /// Splits a total into `(prep, cook)`.
    ///
    /// Prep gets the floor half and cook the remainder, so the two always
    /// add back up to the total.
    #[must_use]
    pub fn split_prep_cook(self) -> (Minutes, Minutes) {
        let prep = self.0 / 2;
        (Minutes(prep), Minutes(self.0 - prep))
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}

impl Serialize for Minutes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How hard a recipe is to prepare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "Fácil")]
    Easy,
    #[serde(rename = "Médio")]
    Medium,
    #[serde(rename = "Difícil")]
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "Fácil"),
            Self::Medium => write!(f, "Médio"),
            Self::Hard => write!(f, "Difícil"),
        }
    }
}
