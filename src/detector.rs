//! Drain Detector
//!
//! Evaluates the two most recent snapshots in a caller-held history
//! window and decides whether a correlated liquidity drain occurred.
//! A pool is flagged only when BOTH of its reserves dropped at or above
//! the threshold in one observation interval - single-sided moves are
//! ordinary swaps/arbitrage and never trigger.
//!
//! Ratios are integer parts-per-million; no floating point anywhere in
//! the decision path. Codec faults in history propagate - they are
//! never masked as a "no trigger" result.
//!
//! Author: AI-Generated
//! Created: 2026-02-10

use crate::codec::snapshot;
use crate::error::TrapError;
use crate::types::{DecisionResult, DrainReport, PairRecord, PoolDrain, PoolSlot};
use alloy::primitives::{Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolValue;
use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};

/// Payload for the short-history case. Compatibility literal consumed
/// by downstream response logic and test suites - do not change.
pub const INSUFFICIENT_DATA: &[u8] = b"insufficient-data";

/// Ratio scale: parts-per-million.
pub const PPM: u64 = 1_000_000;

/// Default drain threshold: both reserves down >= 30% within one
/// observation interval.
pub const DEFAULT_DRAIN_THRESHOLD_PPM: u32 = 300_000;

sol! {
    struct PoolDrainWire {
        uint8 slot;
        address token0;
        address token1;
        uint32 dropRatio0Ppm;
        uint32 dropRatio1Ppm;
        uint32 fromObservedAt;
        uint32 toObservedAt;
    }

    struct DrainReportWire {
        PoolDrainWire[] drains;
    }
}

/// Stateless per-call drain decision. Threshold is fixed at
/// construction; history arrives newest-first from the caller.
pub struct DrainDetector {
    threshold_ppm: u32,
}

impl DrainDetector {
    pub fn new(threshold_ppm: u32) -> Self {
        Self { threshold_ppm }
    }

    /// Decide whether the most recent interval qualifies as a drain.
    ///
    /// - fewer than 2 history entries: `(false, "insufficient-data")`,
    ///   nothing is decoded
    /// - malformed history: the codec fault propagates
    /// - otherwise `(trigger, payload)` where a triggered payload is an
    ///   ABI-encoded [`DrainReport`] and a quiet one is empty bytes
    pub fn should_respond(&self, history: &[Bytes]) -> Result<DecisionResult, TrapError> {
        if history.len() < 2 {
            debug!(
                "history has {} entries, need 2 - not evaluating",
                history.len()
            );
            return Ok(DecisionResult {
                trigger: false,
                payload: Bytes::from_static(INSUFFICIENT_DATA),
            });
        }

        let newest = snapshot::decode(&history[0])?;
        let previous = snapshot::decode(&history[1])?;

        let mut drains = Vec::new();
        for slot in [PoolSlot::A, PoolSlot::B] {
            let prev = previous.slot(slot);
            let curr = newest.slot(slot);

            let ratio0 = drop_ratio_ppm(prev.reserve0, curr.reserve0);
            let ratio1 = drop_ratio_ppm(prev.reserve1, curr.reserve1);
            debug!(
                "pool {}: drop ratios ({} ppm, {} ppm) over [{}, {}]",
                slot, ratio0, ratio1, prev.observed_at, curr.observed_at
            );

            if pool_flagged(prev, curr, self.threshold_ppm) {
                drains.push(PoolDrain {
                    slot,
                    token0: curr.token0,
                    token1: curr.token1,
                    drop_ratio0_ppm: ratio0,
                    drop_ratio1_ppm: ratio1,
                    from_observed_at: prev.observed_at,
                    to_observed_at: curr.observed_at,
                });
            }
        }

        if drains.is_empty() {
            return Ok(DecisionResult {
                trigger: false,
                payload: Bytes::new(),
            });
        }

        info!(
            "drain detected in pool(s) {:?} (threshold {} ppm)",
            drains.iter().map(|d| d.slot).collect::<Vec<_>>(),
            self.threshold_ppm
        );

        Ok(DecisionResult {
            trigger: true,
            payload: encode_report(&DrainReport { drains }),
        })
    }
}

/// The drain predicate: both reserves must drop together to flag a
/// pool. Pure so the rule can be swapped or parameterized without
/// touching the codecs or I/O.
pub fn pool_flagged(previous: &PairRecord, newest: &PairRecord, threshold_ppm: u32) -> bool {
    drop_ratio_ppm(previous.reserve0, newest.reserve0) >= threshold_ppm
        && drop_ratio_ppm(previous.reserve1, newest.reserve1) >= threshold_ppm
}

/// Proportional drop from `previous` to `newest` in parts-per-million.
///
/// 0 when the reserve grew, held, or was already empty (no drop is
/// computable from an empty pool - never a division fault).
pub fn drop_ratio_ppm(previous: U256, newest: U256) -> u32 {
    if previous.is_zero() || newest >= previous {
        return 0;
    }
    // Reserves fit in 112 bits, so the ppm product stays well inside 256.
    let ratio = (previous - newest) * U256::from(PPM) / previous;
    ratio.to::<u64>() as u32
}

/// ABI-encode a drain report into a trigger payload.
pub fn encode_report(report: &DrainReport) -> Bytes {
    let wire = DrainReportWire {
        drains: report
            .drains
            .iter()
            .map(|d| PoolDrainWire {
                slot: d.slot.index(),
                token0: d.token0,
                token1: d.token1,
                dropRatio0Ppm: d.drop_ratio0_ppm,
                dropRatio1Ppm: d.drop_ratio1_ppm,
                fromObservedAt: d.from_observed_at,
                toObservedAt: d.to_observed_at,
            })
            .collect(),
    };
    wire.abi_encode().into()
}

/// Decode a trigger payload back into a drain report (for downstream
/// executors, alerting, and tests).
pub fn decode_report(payload: &[u8]) -> Result<DrainReport> {
    let wire =
        DrainReportWire::abi_decode_validate(payload).context("drain report payload")?;

    let drains = wire
        .drains
        .into_iter()
        .map(|d| {
            let slot = PoolSlot::from_index(d.slot)
                .ok_or_else(|| anyhow!("unknown pool slot index {}", d.slot))?;
            Ok(PoolDrain {
                slot,
                token0: d.token0,
                token1: d.token1,
                drop_ratio0_ppm: d.dropRatio0Ppm,
                drop_ratio1_ppm: d.dropRatio1Ppm,
                from_observed_at: d.fromObservedAt,
                to_observed_at: d.toObservedAt,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DrainReport { drains })
}
