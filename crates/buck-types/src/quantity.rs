//! Ethereum hex quantities: integers sent over JSON-RPC as `0x`-prefixed hexadecimal strings.

use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use num_traits::ToPrimitive;

use crate::error::ConversionError;

/// Encodes `value` the way nodes expect block numbers in `params`: lowercase, no leading zeros.
pub fn encode_quantity(value: u64) -> String {
    format!("{value:#x}")
}

/// Decodes a hex quantity of arbitrary width. `field` names the payload field for error reporting.
pub fn decode_quantity(field: &'static str, quantity: &str) -> Result<BigUint, ConversionError> {
    let malformed = |reason: String| ConversionError::MalformedQuantity { field, reason };

    let digits = quantity
        .strip_prefix("0x")
        .or_else(|| quantity.strip_prefix("0X"))
        .ok_or_else(|| malformed(format!("expected 0x-prefixed hex string, got {quantity:?}")))?;

    if digits.is_empty() {
        return Err(malformed(format!("no digits after prefix in {quantity:?}")));
    }
    // BigUint parsing tolerates `_` separators and a sign, neither of which is a valid quantity
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(malformed(format!("invalid hex digits in {quantity:?}")));
    }

    BigUint::parse_bytes(digits.as_bytes(), 16)
        .ok_or_else(|| malformed(format!("invalid hex digits in {quantity:?}")))
}

/// Decodes a hex quantity that has to fit into a `u64`, e.g. a block number.
pub fn decode_quantity_u64(field: &'static str, quantity: &str) -> Result<u64, ConversionError> {
    decode_quantity(field, quantity)?
        .to_u64()
        .ok_or_else(|| ConversionError::QuantityOutOfRange { field, value: quantity.to_string() })
}

/// Decodes a hex quantity holding seconds since the Unix epoch into a UTC instant.
pub fn decode_timestamp(
    field: &'static str,
    quantity: &str,
) -> Result<DateTime<Utc>, ConversionError> {
    let out_of_range =
        || ConversionError::QuantityOutOfRange { field, value: quantity.to_string() };

    let seconds = decode_quantity_u64(field, quantity)?;
    let seconds = i64::try_from(seconds).map_err(|_| out_of_range())?;

    DateTime::from_timestamp(seconds, 0).ok_or_else(out_of_range)
}
