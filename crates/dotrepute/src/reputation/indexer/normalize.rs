use super::records::{AccountRecord, StakingRecord};
use crate::reputation::snapshot::{
    ActivitySignals, GovernanceSignals, IdentitySignals, OnChainSnapshot, StakingSignals,
};

fn non_empty(value: Option<&str>) -> bool {
    value.is_some_and(|text| !text.trim().is_empty())
}

fn is_zero_amount(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.trim_start_matches('0').is_empty()
}

/// Maps raw indexer records onto the typed snapshot. Absent sources
/// zero-fill the signals they would have provided.
pub fn normalize(
    account: Option<&AccountRecord>,
    staking: Option<&StakingRecord>,
    now_ms: i64,
) -> OnChainSnapshot {
    let Some(account) = account else {
        return OnChainSnapshot {
            staking: StakingSignals {
                is_nominator: staking.is_some(),
                ..StakingSignals::default()
            },
            activity: ActivitySignals {
                last_active_ms: now_ms,
                ..ActivitySignals::default()
            },
            ..OnChainSnapshot::default()
        };
    };

    let people_display = account
        .account_display
        .as_ref()
        .and_then(|display| display.people.as_ref())
        .and_then(|people| people.display.as_deref());
    let judgement_count = u32::try_from(account.judgements.len()).unwrap_or(u32::MAX);

    let bonded = account
        .bonded
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("0");

    let locked = account
        .democracy_lock
        .as_deref()
        .is_some_and(|lock| !is_zero_amount(lock));

    OnChainSnapshot {
        identity: IdentitySignals {
            has_identity: non_empty(account.display.as_deref()) || non_empty(people_display),
            is_verified: judgement_count > 0,
            judgement_count,
        },
        governance: GovernanceSignals {
            vote_count: u32::from(locked),
            proposal_count: 0,
            delegation_count: u32::from(account.is_council_member || account.is_techcomm_member),
        },
        staking: StakingSignals {
            total_staked: bonded.to_string(),
            is_nominator: staking.is_some() || !is_zero_amount(bonded),
            is_validator: account.role.as_deref() == Some("validator"),
        },
        activity: ActivitySignals {
            transaction_count: account.count_extrinsic.unwrap_or(0),
            first_seen_ms: 0,
            last_active_ms: now_ms,
        },
    }
}
