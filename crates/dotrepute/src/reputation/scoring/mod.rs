//! Deterministic rule-based reputation rubric.
//!
//! Each signal category is bucketed independently and the buckets are summed,
//! so the total is bounded by the category maxima (25 + 30 + 25 + 20 = 100).

mod rules;
mod tiers;


pub use tiers::{LevelTier, RankTier};

use super::snapshot::OnChainSnapshot;
use serde::{Deserialize, Serialize};

/// Points awarded per signal category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryPoints {
    pub identity: u8,
    pub governance: u8,
    pub staking: u8,
    pub activity: u8,
}

impl CategoryPoints {
    pub fn total(&self) -> u8 {
        self.identity + self.governance + self.staking + self.activity
    }
}

/// Rule-based score with its category breakdown and tier placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub total_score: u8,
    pub breakdown: CategoryPoints,
    pub rank: RankTier,
    pub level: LevelTier,
}

/// Score a snapshot. Pure: identical snapshots always produce identical output.
pub fn score(snapshot: &OnChainSnapshot) -> ScoreBreakdown {
    let breakdown = CategoryPoints {
        identity: rules::identity_points(&snapshot.identity),
        governance: rules::governance_points(&snapshot.governance),
        staking: rules::staking_points(&snapshot.staking),
        activity: rules::activity_points(&snapshot.activity),
    };
    let total_score = breakdown.total();

    ScoreBreakdown {
        total_score,
        breakdown,
        rank: RankTier::for_score(total_score),
        level: LevelTier::for_score(total_score),
    }
}
