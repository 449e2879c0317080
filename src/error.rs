//! Trap Fault Taxonomy
//!
//! Codec faults are never converted into a "no trigger" decision - they
//! surface to the caller so corrupt history cannot silently pass as a
//! quiet market. The only soft condition (short history) is not an error
//! and lives in the detector, not here.
//!
//! Author: AI-Generated
//! Created: 2026-02-09

use crate::types::PoolSlot;
use alloy::primitives::Address;
use thiserror::Error;

/// Wire bytes do not match the fixed pair-record tuple shape, or a
/// field is outside its declared bit width (e.g. a reserve that does
/// not fit uint112). Raised on both encode and decode - values are
/// never truncated or saturated.
#[derive(Debug, Error)]
#[error("malformed pair record: {reason}")]
pub struct MalformedRecord {
    pub reason: String,
}

impl MalformedRecord {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The outer snapshot tuple is not a well-formed (bytes, bytes) pair,
/// or one of the inner pair records is malformed.
#[derive(Debug, Error)]
pub enum MalformedSnapshot {
    #[error("malformed snapshot: {reason}")]
    Shape { reason: String },

    #[error("malformed snapshot: pool {slot}: {source}")]
    Record {
        slot: PoolSlot,
        #[source]
        source: MalformedRecord,
    },
}

/// Top-level fault type for the trap core.
#[derive(Debug, Error)]
pub enum TrapError {
    #[error(transparent)]
    Record(#[from] MalformedRecord),

    #[error(transparent)]
    Snapshot(#[from] MalformedSnapshot),

    /// The collector's live read dependency failed. No partial snapshot
    /// is ever produced in this case.
    #[error("reserve source unavailable for pool {pool}: {reason}")]
    SourceUnavailable { pool: Address, reason: String },
}
