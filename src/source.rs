//! Reserve Read Source
//!
//! The collector's injected live-read dependency. The trait keeps the
//! core testable without a node; the RPC implementation reads a V2
//! pair's reserves, tokens, and last-update timestamp via alloy.
//!
//! Consistency of the read (both pools "at the same instant") is a
//! contract the environment provides - reads here are per-pool and
//! stateless.
//!
//! Author: AI-Generated
//! Created: 2026-02-10

use crate::error::TrapError;
use crate::types::PairRecord;
use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use alloy::sol;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

sol! {
    #[sol(rpc)]
    interface IUniswapV2Pair {
        function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);
        function token0() external view returns (address);
        function token1() external view returns (address);
    }
}

/// Live reserve state for one monitored pool.
///
/// Implementations must either return a fully populated record or fail;
/// there is no partial observation.
#[async_trait]
pub trait ReserveSource: Send + Sync {
    async fn read_pair(&self, pool: Address) -> Result<PairRecord, TrapError>;
}

/// RPC-backed reserve source for Uniswap V2 style pairs.
pub struct RpcReserveSource<P> {
    provider: Arc<P>,
}

impl<P> RpcReserveSource<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P: Provider + 'static> ReserveSource for RpcReserveSource<P> {
    /// Read reserves + tokens for one pair. The pair's own
    /// blockTimestampLast serves as the observation timestamp - it comes
    /// from the same storage read as the reserves.
    async fn read_pair(&self, pool: Address) -> Result<PairRecord, TrapError> {
        let pair = IUniswapV2Pair::new(pool, self.provider.clone());

        let reserves_call = pair.getReserves();
        let token0_call = pair.token0();
        let token1_call = pair.token1();

        let (reserves, token0, token1) =
            tokio::try_join!(reserves_call.call(), token0_call.call(), token1_call.call())
                .map_err(|e| TrapError::SourceUnavailable {
                    pool,
                    reason: e.to_string(),
                })?;

        debug!(
            "read pair {:?}: reserves=({}, {}) tokens=({:?}, {:?}) ts={}",
            pool, reserves.reserve0, reserves.reserve1, token0, token1,
            reserves.blockTimestampLast
        );

        Ok(PairRecord {
            reserve0: U256::from(reserves.reserve0),
            reserve1: U256::from(reserves.reserve1),
            token0,
            token1,
            observed_at: reserves.blockTimestampLast,
        })
    }
}
