use serde::{Deserialize, Serialize};

/// Planck per DOT; `totalStaked` is reported in Planck.
pub const PLANCK_PER_DOT: f64 = 1e10;

/// Normalized, point-in-time view of an address's on-chain signals.
///
/// Field names on the wire follow the indexer-facing JSON contract
/// (`votesCount`, `judgements`, ...), which the frontend already consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnChainSnapshot {
    pub identity: IdentitySignals,
    pub governance: GovernanceSignals,
    pub staking: StakingSignals,
    pub activity: ActivitySignals,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentitySignals {
    pub has_identity: bool,
    pub is_verified: bool,
    #[serde(rename = "judgements")]
    pub judgement_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GovernanceSignals {
    #[serde(rename = "votesCount")]
    pub vote_count: u32,
    #[serde(rename = "proposalsCount")]
    pub proposal_count: u32,
    #[serde(rename = "delegations")]
    pub delegation_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StakingSignals {
    /// Decimal string in Planck.
    pub total_staked: String,
    pub is_nominator: bool,
    pub is_validator: bool,
}

impl Default for StakingSignals {
    fn default() -> Self {
        Self {
            total_staked: "0".to_string(),
            is_nominator: false,
            is_validator: false,
        }
    }
}

impl StakingSignals {
    /// Bonded amount in whole DOT. Anything that does not parse to a finite,
    /// positive number counts as nothing staked.
    pub fn staked_dot(&self) -> f64 {
        match self.total_staked.trim().parse::<f64>() {
            Ok(planck) if planck.is_finite() && planck > 0.0 => planck / PLANCK_PER_DOT,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivitySignals {
    pub transaction_count: u64,
    /// Epoch milliseconds; 0 when unknown.
    #[serde(rename = "firstSeen")]
    pub first_seen_ms: i64,
    /// Epoch milliseconds.
    #[serde(rename = "lastActive")]
    pub last_active_ms: i64,
}
