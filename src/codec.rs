//! Lossless text tokens for `f64` values.
//!
//! A value is written as the signed decimal form of its IEEE-754 bit pattern,
//! read big-endian as an `i64`. Decimal float parsing never enters the
//! picture, so every bit survives, NaN payloads included.

use crate::error::MalformedTokenError;
use crate::sim::units::Float;

pub(crate) fn encode(value: Float) -> String {
    i64::from_be_bytes(value.to_be_bytes()).to_string()
}

pub(crate) fn decode(token: &str) -> Result<Float, MalformedTokenError> {
    let trimmed = token.trim();
    let bits = trimmed
        .parse::<i64>()
        .map_err(|source| MalformedTokenError {
            token: trimmed.to_string(),
            source,
        })?;
    Ok(Float::from_be_bytes(bits.to_be_bytes()))
}
