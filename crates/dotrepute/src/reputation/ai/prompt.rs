use std::fmt::Write as _;

use crate::reputation::snapshot::OnChainSnapshot;

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn signal_lines(snapshot: &OnChainSnapshot, include_validator: bool) -> String {
    let mut lines = String::new();
    let identity = &snapshot.identity;
    let governance = &snapshot.governance;
    let staking = &snapshot.staking;

    let _ = writeln!(
        lines,
        "- Identity: {}, Verified: {}, Judgements: {}",
        yes_no(identity.has_identity),
        identity.is_verified,
        identity.judgement_count
    );
    let _ = writeln!(
        lines,
        "- Governance: {} votes, {} proposals",
        governance.vote_count, governance.proposal_count
    );
    let _ = write!(
        lines,
        "- Staking: {} DOT, Nominator: {}",
        staking.staked_dot(),
        staking.is_nominator
    );
    if include_validator {
        let _ = write!(lines, ", Validator: {}", staking.is_validator);
    }
    let _ = write!(
        lines,
        "\n- Activity: {} transactions",
        snapshot.activity.transaction_count
    );
    lines
}

/// Prompt asking the model to reproduce the rubric and add narrative fields.
pub(crate) fn scoring_prompt(address: &str, snapshot: &OnChainSnapshot, language: &str) -> String {
    format!(
        r#"Polkadot reputation AI. Score based on ACTUAL data only.

Address: {address}

Data:
{signals}

Scoring (EXACT):
1. Identity (0-25): No=0, Has=10, Verified=25
2. Governance (0-30): 0=0, 1-5=10, 6-19=20, 20+=30
3. Staking (0-25): 0=0, <10=10, 10-100=15, 100+=25
4. Activity (0-20): 0=0, 1-10=5, 11-50=10, 51-99=15, 100+=20

Return JSON only:
{{
  "totalScore": <sum>,
  "breakdown": {{"identity": <n>, "governance": <n>, "staking": <n>, "activity": <n>}},
  "rank": "<90-100=Top 1%, 80-89=Top 5%, 70-79=Top 10%, 60-69=Top 25%, 50-59=Top 50%, <50=Unranked>",
  "level": "<90-100=Legend, 80-89=Master, 70-79=Expert, 60-69=Advanced, 50-59=Intermediate, 40-49=Beginner, <40=Newcomer>",
  "analysis": "<{language} analysis>",
  "strengths": ["<actual strengths>"],
  "improvements": ["<actual improvements>"],
  "insights": "<AI insights>"
}}"#,
        signals = signal_lines(snapshot, true),
    )
}

/// Prompt for a free-form answer grounded in the snapshot.
pub(crate) fn chat_prompt(
    address: &str,
    query: &str,
    snapshot: &OnChainSnapshot,
    language: &str,
) -> String {
    format!(
        r#"Polkadot reputation assistant. Answer based on ACTUAL data only.

Question: "{query}"
Address: {address}

Data:
{signals}

Answer in {language}. Be specific and factual based on real data."#,
        signals = signal_lines(snapshot, false),
    )
}

/// Removes a surrounding Markdown code fence (with or without a language tag).
pub(crate) fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}
