//! Recall grades reported by the learner.
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    Again,
    Hard,
    Good,
    Easy,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy];

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::Again => "Again",
            Grade::Hard => "Hard",
            Grade::Good => "Good",
            Grade::Easy => "Easy",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Accepts the grade names in any case, or their 1-4 button numbers.
impl FromStr for Grade {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "again" | "1" => Ok(Grade::Again),
            "hard" | "2" => Ok(Grade::Hard),
            "good" | "3" => Ok(Grade::Good),
            "easy" | "4" => Ok(Grade::Easy),
            _ => Err(Error::InvalidGrade(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Grade {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Grade::Again),
            2 => Ok(Grade::Hard),
            3 => Ok(Grade::Good),
            4 => Ok(Grade::Easy),
            _ => Err(Error::InvalidGrade(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!("again".parse::<Grade>().unwrap(), Grade::Again);
        assert_eq!(" Good ".parse::<Grade>().unwrap(), Grade::Good);
        assert_eq!("EASY".parse::<Grade>().unwrap(), Grade::Easy);
        assert_eq!("2".parse::<Grade>().unwrap(), Grade::Hard);
    }

    #[test]
    fn test_unknown_label_fails() {
        let err = "medium".parse::<Grade>().unwrap_err();
        assert!(matches!(err, Error::InvalidGrade(ref s) if s == "medium"));
        assert!("".parse::<Grade>().is_err());
    }

    #[test]
    fn test_try_from_u8() {
        assert_eq!(Grade::try_from(4).unwrap(), Grade::Easy);
        assert!(matches!(Grade::try_from(0), Err(Error::InvalidGrade(_))));
        assert!(matches!(Grade::try_from(5), Err(Error::InvalidGrade(_))));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for grade in Grade::ALL {
            assert_eq!(grade.to_string().parse::<Grade>().unwrap(), grade);
        }
    }

    #[test]
    fn test_serde_uses_variant_names() {
        assert_eq!(serde_json::to_string(&Grade::Hard).unwrap(), "\"Hard\"");
        assert!(serde_json::from_str::<Grade>("\"Meh\"").is_err());
    }
}
