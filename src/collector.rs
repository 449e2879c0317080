//! Snapshot Collector
//!
//! Runs once per observation tick: reads both monitored pools through
//! the injected reserve source and returns one encoded snapshot blob.
//! Never consults history, never triggers a response, and produces no
//! partial encoding on failure.
//!
//! Author: AI-Generated
//! Created: 2026-02-10

use crate::codec::snapshot;
use crate::error::TrapError;
use crate::source::ReserveSource;
use crate::types::Snapshot;
use alloy::primitives::{Address, Bytes};
use tracing::debug;

/// Materializes the current state of the two monitored pools into a
/// portable encoded snapshot. Pool identities are fixed at construction.
pub struct Collector<S> {
    source: S,
    pool_a: Address,
    pool_b: Address,
}

impl<S: ReserveSource> Collector<S> {
    pub fn new(source: S, pool_a: Address, pool_b: Address) -> Self {
        Self {
            source,
            pool_a,
            pool_b,
        }
    }

    /// Read both pools and encode the snapshot.
    ///
    /// Fails with `SourceUnavailable` if either read fails - the whole
    /// call aborts rather than encoding a half-observed snapshot.
    pub async fn collect(&self) -> Result<Bytes, TrapError> {
        let (pool_a, pool_b) = futures::try_join!(
            self.source.read_pair(self.pool_a),
            self.source.read_pair(self.pool_b),
        )?;

        let captured = Snapshot { pool_a, pool_b };
        let encoded = snapshot::encode(&captured)?;

        debug!(
            "collected snapshot: A=({}, {}) B=({}, {}) ts=({}, {})",
            captured.pool_a.reserve0,
            captured.pool_a.reserve1,
            captured.pool_b.reserve0,
            captured.pool_b.reserve1,
            captured.pool_a.observed_at,
            captured.pool_b.observed_at,
        );

        Ok(encoded.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PairRecord;
    use alloy::primitives::U256;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct MockSource {
        pairs: HashMap<Address, PairRecord>,
    }

    #[async_trait]
    impl ReserveSource for MockSource {
        async fn read_pair(&self, pool: Address) -> Result<PairRecord, TrapError> {
            self.pairs
                .get(&pool)
                .cloned()
                .ok_or_else(|| TrapError::SourceUnavailable {
                    pool,
                    reason: "pair not known to mock".to_string(),
                })
        }
    }

    fn test_record(reserve0: u64, reserve1: u64) -> PairRecord {
        PairRecord {
            reserve0: U256::from(reserve0),
            reserve1: U256::from(reserve1),
            token0: Address::repeat_byte(0x11),
            token1: Address::repeat_byte(0x22),
            observed_at: 1_700_000_000,
        }
    }

    #[tokio::test]
    async fn test_collect_round_trips_source_values() {
        let pool_a = Address::repeat_byte(0x0a);
        let pool_b = Address::repeat_byte(0x0b);

        let record_a = test_record(100_000, 200_000);
        let record_b = test_record(300_000, 400_000);

        let source = MockSource {
            pairs: HashMap::from([(pool_a, record_a.clone()), (pool_b, record_b.clone())]),
        };
        let collector = Collector::new(source, pool_a, pool_b);

        let blob = collector.collect().await.unwrap();
        let decoded = snapshot::decode(&blob).unwrap();

        assert_eq!(decoded.pool_a, record_a);
        assert_eq!(decoded.pool_b, record_b);
    }

    #[tokio::test]
    async fn test_collect_fails_when_source_unavailable() {
        let pool_a = Address::repeat_byte(0x0a);
        let pool_b = Address::repeat_byte(0x0b);

        // Only pool A is readable; the collect must fail outright.
        let source = MockSource {
            pairs: HashMap::from([(pool_a, test_record(1, 2))]),
        };
        let collector = Collector::new(source, pool_a, pool_b);

        let err = collector.collect().await.unwrap_err();
        assert!(matches!(err, TrapError::SourceUnavailable { pool, .. } if pool == pool_b));
    }
}
