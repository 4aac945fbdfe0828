use serde::{Deserialize, Deserializer};

/// Subscan response envelope. `code` is 0 on success.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchData {
    #[serde(default)]
    pub account: Option<AccountRecord>,
}

/// Account fields read from `/api/v2/scan/search`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AccountRecord {
    pub display: Option<String>,
    pub account_display: Option<AccountDisplay>,
    #[serde(deserialize_with = "null_as_default")]
    pub judgements: Vec<serde_json::Value>,
    #[serde(deserialize_with = "amount")]
    pub bonded: Option<String>,
    pub role: Option<String>,
    pub count_extrinsic: Option<u64>,
    #[serde(deserialize_with = "amount")]
    pub democracy_lock: Option<String>,
    pub is_council_member: bool,
    pub is_techcomm_member: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AccountDisplay {
    pub display: Option<String>,
    pub people: Option<PeopleDisplay>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PeopleDisplay {
    pub display: Option<String>,
}

/// Nominator record from `/api/scan/staking/nominator`. Only its presence is
/// used for scoring.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StakingRecord {
    #[serde(deserialize_with = "amount")]
    pub bonded: Option<String>,
    pub status: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Planck amounts arrive as decimal strings, occasionally as bare numbers.
fn amount<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}
