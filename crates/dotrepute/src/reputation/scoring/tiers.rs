use serde::{Deserialize, Serialize};
use std::fmt;

/// Percentile bucket selected by thresholding the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RankTier {
    #[serde(rename = "Unranked")]
    Unranked,
    #[serde(rename = "Top 50%")]
    Top50,
    #[serde(rename = "Top 25%")]
    Top25,
    #[serde(rename = "Top 10%")]
    Top10,
    #[serde(rename = "Top 5%")]
    Top5,
    #[serde(rename = "Top 1%")]
    Top1,
}

impl RankTier {
    pub fn for_score(total: u8) -> Self {
        match total {
            90.. => Self::Top1,
            80..=89 => Self::Top5,
            70..=79 => Self::Top10,
            60..=69 => Self::Top25,
            50..=59 => Self::Top50,
            _ => Self::Unranked,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unranked => "Unranked",
            Self::Top50 => "Top 50%",
            Self::Top25 => "Top 25%",
            Self::Top10 => "Top 10%",
            Self::Top5 => "Top 5%",
            Self::Top1 => "Top 1%",
        }
    }
}

impl fmt::Display for RankTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Named progression level selected by thresholding the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LevelTier {
    Newcomer,
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    Master,
    Legend,
}

impl LevelTier {
    pub fn for_score(total: u8) -> Self {
        match total {
            90.. => Self::Legend,
            80..=89 => Self::Master,
            70..=79 => Self::Expert,
            60..=69 => Self::Advanced,
            50..=59 => Self::Intermediate,
            40..=49 => Self::Beginner,
            _ => Self::Newcomer,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Newcomer => "Newcomer",
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
            Self::Master => "Master",
            Self::Legend => "Legend",
        }
    }
}

impl fmt::Display for LevelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
