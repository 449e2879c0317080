//! Snapshot Codec
//!
//! Composes two encoded pair records (slot A then slot B, never
//! swapped) into the outer (bytes, bytes) tuple and back. Inner record
//! faults propagate with the failing slot attached.
//!
//! Author: AI-Generated
//! Created: 2026-02-09

use crate::codec::pair;
use crate::error::MalformedSnapshot;
use crate::types::{PoolSlot, Snapshot};
use alloy::sol;
use alloy::sol_types::SolValue;

sol! {
    struct SnapshotWire {
        bytes poolA;
        bytes poolB;
    }
}

/// Encode a snapshot as (bytes encodedPoolA, bytes encodedPoolB).
pub fn encode(snapshot: &Snapshot) -> Result<Vec<u8>, MalformedSnapshot> {
    let pool_a = pair::encode(&snapshot.pool_a)
        .map_err(|source| MalformedSnapshot::Record { slot: PoolSlot::A, source })?;
    let pool_b = pair::encode(&snapshot.pool_b)
        .map_err(|source| MalformedSnapshot::Record { slot: PoolSlot::B, source })?;

    let wire = SnapshotWire {
        poolA: pool_a.into(),
        poolB: pool_b.into(),
    };
    Ok(wire.abi_encode())
}

/// Decode a snapshot, inverse of [`encode`] for all valid inputs.
pub fn decode(data: &[u8]) -> Result<Snapshot, MalformedSnapshot> {
    let wire = SnapshotWire::abi_decode_validate(data)
        .map_err(|e| MalformedSnapshot::Shape { reason: e.to_string() })?;

    let pool_a = pair::decode(wire.poolA.as_ref())
        .map_err(|source| MalformedSnapshot::Record { slot: PoolSlot::A, source })?;
    let pool_b = pair::decode(wire.poolB.as_ref())
        .map_err(|source| MalformedSnapshot::Record { slot: PoolSlot::B, source })?;

    Ok(Snapshot { pool_a, pool_b })
}
