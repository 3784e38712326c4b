//! Byte encoding of baskets for the key-value store.
//!
//! Baskets are stored as JSON. Decimal amounts are written as strings, so
//! `decode(encode(b)) == b` holds exactly, scale included.

use crate::domain::entities::CustomerBasket;
use thiserror::Error;

/// Codec failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The basket could not be serialized.
    #[error("Failed to encode basket: {0}")]
    Encode(String),

    /// Bytes are truncated, mistyped, or describe a basket that breaks an invariant.
    #[error("Corrupt basket payload: {0}")]
    CorruptPayload(String),
}

/// JSON codec for [`CustomerBasket`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BasketCodec;

impl BasketCodec {
    /// Creates a codec.
    pub fn new() -> Self {
        Self
    }

    /// Serializes a basket into its stored representation.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encode`] if serialization fails.
    pub fn encode(&self, basket: &CustomerBasket) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(basket).map_err(|e| CodecError::Encode(e.to_string()))
    }

    /// Parses stored bytes back into a basket.
    ///
    /// Decoded baskets are checked with [`CustomerBasket::check_invariants`]; a
    /// well-formed document holding e.g. a zero quantity is corrupt, not valid.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::CorruptPayload`] if the bytes are not a valid basket.
    pub fn decode(&self, bytes: &[u8]) -> Result<CustomerBasket, CodecError> {
        let basket: CustomerBasket = serde_json::from_slice(bytes)
            .map_err(|e| CodecError::CorruptPayload(e.to_string()))?;

        basket
            .check_invariants()
            .map_err(CodecError::CorruptPayload)?;

        Ok(basket)
    }
}
