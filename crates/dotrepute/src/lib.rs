//! DotRepute: reputation scoring for Polkadot accounts.

pub mod config;
pub mod error;
pub mod reputation;
pub mod telemetry;

pub use error::AppError;
