use super::super::snapshot::{
    ActivitySignals, GovernanceSignals, IdentitySignals, StakingSignals,
};

pub(crate) const IDENTITY_MAX: u8 = 25;
pub(crate) const GOVERNANCE_MAX: u8 = 30;
pub(crate) const STAKING_MAX: u8 = 25;
pub(crate) const ACTIVITY_MAX: u8 = 20;

pub(crate) fn identity_points(identity: &IdentitySignals) -> u8 {
    if identity.has_identity && identity.is_verified {
        IDENTITY_MAX
    } else if identity.has_identity {
        10
    } else {
        0
    }
}

pub(crate) fn governance_points(governance: &GovernanceSignals) -> u8 {
    match governance.vote_count {
        20.. => GOVERNANCE_MAX,
        6..=19 => 20,
        1..=5 => 10,
        0 => 0,
    }
}

pub(crate) fn staking_points(staking: &StakingSignals) -> u8 {
    let staked = staking.staked_dot();
    if staked >= 100.0 {
        STAKING_MAX
    } else if staked >= 10.0 {
        15
    } else if staked > 0.0 {
        10
    } else {
        0
    }
}

pub(crate) fn activity_points(activity: &ActivitySignals) -> u8 {
    match activity.transaction_count {
        100.. => ACTIVITY_MAX,
        51..=99 => 15,
        11..=50 => 10,
        1..=10 => 5,
        0 => 0,
    }
}
