use std::path::PathBuf;

use clap::Args;
use dotrepute::config::AppConfig;
use dotrepute::error::AppError;
use dotrepute::reputation::{score, OnChainSnapshot, ScoreBreakdown};
use serde::Serialize;

use crate::infra::build_service;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a snapshot JSON document (identity/governance/staking/activity)
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Emit JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

/// JSON document printed by `lookup --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupReport<'a> {
    address: &'a str,
    score: &'a ScoreBreakdown,
    on_chain_data: &'a OnChainSnapshot,
}

#[derive(Args, Debug)]
pub(crate) struct LookupArgs {
    /// SS58 address to look up
    pub(crate) address: String,
    /// Emit JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.snapshot)?;
    let snapshot: OnChainSnapshot = serde_json::from_str(&raw)?;
    let breakdown = score(&snapshot);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        println!("Snapshot: {}", args.snapshot.display());
        print!("{}", summary(&breakdown));
    }
    Ok(())
}

pub(crate) async fn run_lookup(args: LookupArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config);
    let (snapshot, breakdown) = service.baseline(&args.address).await;

    if args.json {
        let report = LookupReport {
            address: &args.address,
            score: &breakdown,
            on_chain_data: &snapshot,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Address: {}", args.address);
        println!(
            "  Identity: {} (verified: {}, judgements: {})",
            snapshot.identity.has_identity,
            snapshot.identity.is_verified,
            snapshot.identity.judgement_count
        );
        println!("  Staked: {} DOT", snapshot.staking.staked_dot());
        println!("  Transactions: {}", snapshot.activity.transaction_count);
        print!("{}", summary(&breakdown));
    }
    Ok(())
}

pub(crate) fn summary(breakdown: &ScoreBreakdown) -> String {
    let points = &breakdown.breakdown;
    format!(
        "Score: {}/100 ({}, {})\n  identity {:>2}/25\n  governance {:>2}/30\n  staking {:>2}/25\n  activity {:>2}/20\n",
        breakdown.total_score,
        breakdown.rank,
        breakdown.level,
        points.identity,
        points.governance,
        points.staking,
        points.activity,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotrepute::reputation::snapshot::{IdentitySignals, StakingSignals};

    #[test]
    fn summary_lists_every_category() {
        let snapshot = OnChainSnapshot {
            identity: IdentitySignals {
                has_identity: true,
                is_verified: false,
                judgement_count: 0,
            },
            staking: StakingSignals {
                total_staked: "200000000000".to_string(),
                ..StakingSignals::default()
            },
            ..OnChainSnapshot::default()
        };

        let text = summary(&score(&snapshot));

        assert!(text.starts_with("Score: 25/100 (Unranked, Newcomer)"));
        assert!(text.contains("identity 10/25"));
        assert!(text.contains("staking 15/25"));
        assert!(text.contains("activity  0/20"));
    }

    #[test]
    fn lookup_report_uses_wire_field_names() {
        let snapshot = OnChainSnapshot::default();
        let breakdown = score(&snapshot);
        let report = LookupReport {
            address: "15oF4u",
            score: &breakdown,
            on_chain_data: &snapshot,
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["address"], "15oF4u");
        assert_eq!(value["score"]["totalScore"], 0);
        assert_eq!(value["onChainData"]["staking"]["totalStaked"], "0");
    }

    #[test]
    fn score_command_rejects_malformed_snapshot() {
        let path = std::env::temp_dir().join(format!(
            "dotrepute-bad-snapshot-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{ not json").unwrap();

        let result = run_score(ScoreArgs {
            snapshot: path.clone(),
            json: true,
        });
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(AppError::Snapshot(_))));
    }

    #[test]
    fn score_command_reports_missing_file() {
        let result = run_score(ScoreArgs {
            snapshot: PathBuf::from("/nonexistent/dotrepute/snapshot.json"),
            json: false,
        });
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
