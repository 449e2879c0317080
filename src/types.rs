// Core data structures for the liquidity trap.
// Everything here is a transient, call-scoped value; nothing in the
// core persists between invocations except through caller-held bytes.

use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two monitored pool slots a value refers to.
///
/// Slot order (A then B) is the wire contract between the collector and
/// the drain detector and must never be swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolSlot {
    A,
    B,
}

impl PoolSlot {
    /// Wire index for payload encoding (A = 0, B = 1)
    pub fn index(&self) -> u8 {
        match self {
            PoolSlot::A => 0,
            PoolSlot::B => 1,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(PoolSlot::A),
            1 => Some(PoolSlot::B),
            _ => None,
        }
    }
}

impl fmt::Display for PoolSlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PoolSlot::A => write!(f, "A"),
            PoolSlot::B => write!(f, "B"),
        }
    }
}

/// Observed state of a single V2 pool at one instant.
///
/// Reserves are uint112 on the wire (the V2 pair storage width) but held
/// as U256 here; the codec rejects out-of-range values instead of
/// truncating. `observed_at` is the pair's blockTimestampLast - the codec
/// does not validate its ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairRecord {
    pub reserve0: U256,
    pub reserve1: U256,
    pub token0: Address,
    pub token1: Address,
    pub observed_at: u32,
}

/// Point-in-time capture of both monitored pools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub pool_a: PairRecord,
    pub pool_b: PairRecord,
}

impl Snapshot {
    pub fn slot(&self, slot: PoolSlot) -> &PairRecord {
        match slot {
            PoolSlot::A => &self.pool_a,
            PoolSlot::B => &self.pool_b,
        }
    }
}

/// Outcome of one detector evaluation.
///
/// `payload` is either the UTF-8 literal `insufficient-data`, empty bytes
/// (evaluated, nothing flagged), or an ABI-encoded drain report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionResult {
    pub trigger: bool,
    pub payload: Bytes,
}

/// One flagged pool inside a triggered payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolDrain {
    pub slot: PoolSlot,
    pub token0: Address,
    pub token1: Address,
    /// Proportional reserve0 drop over the window, parts-per-million
    pub drop_ratio0_ppm: u32,
    /// Proportional reserve1 drop over the window, parts-per-million
    pub drop_ratio1_ppm: u32,
    pub from_observed_at: u32,
    pub to_observed_at: u32,
}

/// Decoded form of a triggered payload - everything a downstream
/// executor needs without re-decoding history itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrainReport {
    pub drains: Vec<PoolDrain>,
}

/// Trap configuration (from env)
///
/// Pool identities and the drain threshold are fixed at construction
/// time; they are never part of the core's runtime inputs.
#[derive(Debug, Clone)]
pub struct TrapConfig {
    // Network
    pub rpc_url: String,

    // Monitored pools (exactly two - slot A and slot B)
    pub pool_a: Address,
    pub pool_b: Address,

    // Detection
    pub drain_threshold_ppm: u32,

    // Monitor loop
    pub poll_interval_ms: u64,
    pub history_depth: usize,

    // Optional Discord webhook for drain alerts
    pub webhook_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_slot_index_round_trip() {
        assert_eq!(PoolSlot::from_index(PoolSlot::A.index()), Some(PoolSlot::A));
        assert_eq!(PoolSlot::from_index(PoolSlot::B.index()), Some(PoolSlot::B));
        assert_eq!(PoolSlot::from_index(2), None);
    }

    #[test]
    fn test_snapshot_slot_accessor() {
        let record_a = PairRecord {
            reserve0: U256::from(1u64),
            reserve1: U256::from(2u64),
            token0: Address::ZERO,
            token1: Address::ZERO,
            observed_at: 10,
        };
        let mut record_b = record_a.clone();
        record_b.observed_at = 20;

        let snapshot = Snapshot {
            pool_a: record_a.clone(),
            pool_b: record_b.clone(),
        };

        assert_eq!(snapshot.slot(PoolSlot::A), &record_a);
        assert_eq!(snapshot.slot(PoolSlot::B), &record_b);
    }
}
