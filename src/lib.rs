//! Cross-DEX Liquidity Trap Library
//!
//! Watches two V2 liquidity pools and flags sudden, correlated reserve
//! drains between successive snapshots. The core is four pure pieces:
//! the pair-record and snapshot codecs, the collector, and the drain
//! detector. The monitor binary supplies the execution environment
//! (history window, tick loop, alerting).
//!
//! Author: AI-Generated
//! Created: 2026-02-09

pub mod alert;
pub mod codec;
pub mod collector;
pub mod config;
pub mod detector;
pub mod error;
pub mod source;
pub mod types;

// Re-export commonly used types
pub use alert::DrainAlerter;
pub use collector::Collector;
pub use config::load_config;
pub use detector::{
    decode_report, DrainDetector, DEFAULT_DRAIN_THRESHOLD_PPM, INSUFFICIENT_DATA,
};
pub use error::{MalformedRecord, MalformedSnapshot, TrapError};
pub use source::{ReserveSource, RpcReserveSource};
pub use types::{
    DecisionResult, DrainReport, PairRecord, PoolDrain, PoolSlot, Snapshot, TrapConfig,
};
