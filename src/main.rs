//! Trap Monitor
//!
//! Execution environment for the liquidity trap core: collects one
//! encoded snapshot per tick into a newest-first history window, runs
//! the drain detector over it, and alerts on a positive trigger.
//!
//! The core itself is stateless - all state lives in the history
//! window held here. A codec fault over our own history means the
//! stored data is corrupt, so the loop aborts instead of issuing a
//! decision over it. A failed collect is logged and retried next tick.
//!
//! Author: AI-Generated
//! Created: 2026-02-11

use alloy::primitives::Bytes;
use alloy::providers::{ProviderBuilder, WsConnect};
use anyhow::Result;
use clap::Parser;
use liquidity_trap::config::load_config;
use liquidity_trap::{
    decode_report, Collector, DrainAlerter, DrainDetector, RpcReserveSource, TrapError,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Truncate an RPC URL for logging (URLs often carry API keys past the
/// host). Counts chars, not bytes, so a multi-byte character at the
/// cutoff cannot panic the slice.
fn redact_url(url: &str) -> String {
    url.chars().take(50).collect()
}

/// Cross-DEX Liquidity Trap monitor
#[derive(Parser)]
#[command(name = "trap-monitor")]
struct Args {
    /// Drain threshold override in parts-per-million (e.g. 300000 = 30%)
    #[arg(long, env = "DRAIN_THRESHOLD_PPM")]
    threshold_ppm: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!("===========================================");
    info!("   Cross-DEX Liquidity Trap Monitor");
    info!("===========================================");

    let mut config = load_config()?;
    if let Some(threshold) = args.threshold_ppm {
        config.drain_threshold_ppm = threshold;
    }
    info!("Pool A: {:?}", config.pool_a);
    info!("Pool B: {:?}", config.pool_b);
    info!(
        "Drain threshold: {} ppm ({:.1}%)",
        config.drain_threshold_ppm,
        config.drain_threshold_ppm as f64 / 10_000.0
    );
    info!("Poll interval: {}ms", config.poll_interval_ms);

    // Connect provider (alloy WebSocket)
    let ws = WsConnect::new(&config.rpc_url);
    let provider = ProviderBuilder::new().connect_ws(ws).await?;
    let provider = Arc::new(provider);
    info!("Connected to RPC: {}", redact_url(&config.rpc_url));

    let source = RpcReserveSource::new(provider);
    let collector = Collector::new(source, config.pool_a, config.pool_b);
    let detector = DrainDetector::new(config.drain_threshold_ppm);
    let alerter = DrainAlerter::new(config.webhook_url.clone());

    // Newest-first history window, owned here - the core never stores it
    let mut history: Vec<Bytes> = Vec::new();
    let mut interval = tokio::time::interval(Duration::from_millis(config.poll_interval_ms));

    loop {
        interval.tick().await;

        match collector.collect().await {
            Ok(blob) => {
                history.insert(0, blob);
                history.truncate(config.history_depth);
            }
            Err(e @ TrapError::SourceUnavailable { .. }) => {
                warn!("Collect failed, retrying next tick: {}", e);
                continue;
            }
            Err(e) => {
                error!("Collect failed with codec fault: {}", e);
                return Err(e.into());
            }
        }

        let decision = detector.should_respond(&history)?;
        if !decision.trigger {
            debug!(
                "No drain (history depth {}, payload {} bytes)",
                history.len(),
                decision.payload.len()
            );
            continue;
        }

        let report = decode_report(&decision.payload)?;
        for drain in &report.drains {
            error!(
                "🚨 LIQUIDITY DRAIN: pool {} | reserve0 -{} ppm | reserve1 -{} ppm | window {} → {}",
                drain.slot,
                drain.drop_ratio0_ppm,
                drain.drop_ratio1_ppm,
                drain.from_observed_at,
                drain.to_observed_at,
            );
        }
        alerter.send_drain_alert(&report).await;
    }
}
