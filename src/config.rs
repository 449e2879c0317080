//! Configuration management
//! Load settings from .env file

use crate::detector::DEFAULT_DRAIN_THRESHOLD_PPM;
use crate::types::TrapConfig;
use alloy::primitives::Address;
use anyhow::{Context, Result};
use std::str::FromStr;

/// Default observation tick: one Ethereum block.
const DEFAULT_POLL_INTERVAL_MS: u64 = 12_000;

/// Default number of encoded snapshots the monitor keeps around.
/// The detector only ever reads the first two.
const DEFAULT_HISTORY_DEPTH: usize = 16;

pub fn load_config() -> Result<TrapConfig> {
    dotenv::dotenv().ok();

    let pool_a = Address::from_str(&std::env::var("POOL_A").context("POOL_A not set")?)
        .context("POOL_A is not a valid address")?;
    let pool_b = Address::from_str(&std::env::var("POOL_B").context("POOL_B not set")?)
        .context("POOL_B is not a valid address")?;

    Ok(TrapConfig {
        rpc_url: std::env::var("RPC_URL").context("RPC_URL not set")?,

        pool_a,
        pool_b,

        drain_threshold_ppm: env_or("DRAIN_THRESHOLD_PPM", DEFAULT_DRAIN_THRESHOLD_PPM)?,

        poll_interval_ms: env_or("POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS)?,
        history_depth: env_or("HISTORY_DEPTH", DEFAULT_HISTORY_DEPTH)?,

        webhook_url: std::env::var("DISCORD_WEBHOOK").ok(),
    })
}

/// Parse an env var, falling back to a default when unset.
/// A set-but-unparsable value is an error, not a silent default.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
