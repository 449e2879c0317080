//! Snapshot Wire Codecs
//!
//! Pure, stateless transforms between domain records and their fixed
//! ABI encodings, shared by the collector and the drain detector.
//!
//! Layouts (must match exactly for interoperability):
//! - pair record: (uint112 reserve0, uint112 reserve1, address token0, address token1, uint32 observedAt)
//! - snapshot:    (bytes encodedPoolA, bytes encodedPoolB)
//!
//! Author: AI-Generated
//! Created: 2026-02-09

pub mod pair;
pub mod snapshot;
