//! Pair Record Codec
//!
//! Fixed-layout ABI codec for a single pool observation. Decoding is
//! strict: wrong length, wrong shape, or non-canonical field padding
//! (a value wider than its declared type) all fail with MalformedRecord.
//!
//! Author: AI-Generated
//! Created: 2026-02-09

use crate::error::MalformedRecord;
use crate::types::PairRecord;
use alloy::primitives::{aliases::U112, U256};
use alloy::sol;
use alloy::sol_types::SolValue;

// On-wire tuple. abi.encode of this struct is byte-identical to
// abi.encode of the bare (uint112, uint112, address, address, uint32)
// tuple, so it interoperates with Solidity-side encoders.
sol! {
    struct PairRecordWire {
        uint112 reserve0;
        uint112 reserve1;
        address token0;
        address token1;
        uint32 observedAt;
    }
}

/// Largest value a uint112 reserve field can carry (2^112 - 1).
const MAX_RESERVE: U256 = U256::from_limbs([u64::MAX, 0x0000_ffff_ffff_ffff, 0, 0]);

/// Encode a pair record into its fixed ABI tuple layout.
///
/// Fails if either reserve exceeds the uint112 range - out-of-range
/// values are rejected, never wrapped.
pub fn encode(record: &PairRecord) -> Result<Vec<u8>, MalformedRecord> {
    let wire = PairRecordWire {
        reserve0: reserve_to_u112(record.reserve0, "reserve0")?,
        reserve1: reserve_to_u112(record.reserve1, "reserve1")?,
        token0: record.token0,
        token1: record.token1,
        observedAt: record.observed_at,
    };
    Ok(wire.abi_encode())
}

/// Decode a pair record, inverse of [`encode`] for all valid inputs.
pub fn decode(data: &[u8]) -> Result<PairRecord, MalformedRecord> {
    let wire = PairRecordWire::abi_decode_validate(data)
        .map_err(|e| MalformedRecord::new(e.to_string()))?;

    Ok(PairRecord {
        reserve0: U256::from(wire.reserve0),
        reserve1: U256::from(wire.reserve1),
        token0: wire.token0,
        token1: wire.token1,
        observed_at: wire.observedAt,
    })
}

fn reserve_to_u112(value: U256, field: &str) -> Result<U112, MalformedRecord> {
    if value > MAX_RESERVE {
        return Err(MalformedRecord::new(format!(
            "{field} value {value} exceeds uint112 range"
        )));
    }
    let limbs = value.as_limbs();
    Ok(U112::from_limbs([limbs[0], limbs[1]]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    fn test_record() -> PairRecord {
        PairRecord {
            reserve0: U256::from(123_456_789u64),
            reserve1: (U256::from(1u8) << 111) + U256::from(42u64),
            token0: Address::repeat_byte(0x11),
            token1: Address::repeat_byte(0x22),
            observed_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_round_trip() {
        let record = test_record();
        let encoded = encode(&record).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_encoded_length_is_five_words() {
        let encoded = encode(&test_record()).unwrap();
        assert_eq!(encoded.len(), 5 * 32);
    }

    #[test]
    fn test_encode_rejects_out_of_range_reserve() {
        let mut record = test_record();
        record.reserve0 = U256::from(1u8) << 112;

        let err = encode(&record).unwrap_err();
        assert!(err.reason.contains("uint112"), "unexpected reason: {}", err.reason);
    }

    #[test]
    fn test_encode_accepts_max_reserve() {
        let mut record = test_record();
        record.reserve0 = (U256::from(1u8) << 112) - U256::from(1u8);
        record.reserve1 = U256::ZERO;

        let encoded = encode(&record).unwrap();
        assert_eq!(decode(&encoded).unwrap(), record);
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let encoded = encode(&test_record()).unwrap();
        assert!(decode(&encoded[..encoded.len() - 1]).is_err());
        assert!(decode(&[]).is_err());
    }

    #[test]
    fn test_decode_rejects_oversized_reserve_word() {
        // Hand-build the 5-word tuple with a reserve0 word above uint112.
        // Strict decoding must reject it rather than mask the high bits.
        let words = (
            U256::from(1u8) << 112,
            U256::from(7u64),
            Address::repeat_byte(0x11),
            Address::repeat_byte(0x22),
            99u32,
        )
            .abi_encode();

        assert!(decode(&words).is_err());
    }

    #[test]
    fn test_decode_accepts_canonical_tuple_encoding() {
        // uint112 values in range encode to the same 32-byte words as
        // uint256, so a bare-tuple encoder on the other side must match.
        let words = (
            U256::from(5u64),
            U256::from(7u64),
            Address::repeat_byte(0x11),
            Address::repeat_byte(0x22),
            99u32,
        )
            .abi_encode();

        let decoded = decode(&words).unwrap();
        assert_eq!(decoded.reserve0, U256::from(5u64));
        assert_eq!(decoded.reserve1, U256::from(7u64));
        assert_eq!(decoded.token0, Address::repeat_byte(0x11));
        assert_eq!(decoded.observed_at, 99);
    }
}
