use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::{Artist, RecommendationList, Track},
};

/// Decoding of raw store values into typed records
///
/// Every catalog store holds JSON. The record kind is chosen by the caller
/// through the target type, since a store only ever holds one kind.
pub trait Decode: Sized {
    fn decode(bytes: &[u8]) -> AppResult<Self>;
}

fn decode_json<T: DeserializeOwned>(kind: &str, bytes: &[u8]) -> AppResult<T> {
    serde_json::from_slice(bytes)
        .map_err(|e| AppError::Decode(format!("malformed {} record: {}", kind, e)))
}

impl Decode for Track {
    fn decode(bytes: &[u8]) -> AppResult<Self> {
        decode_json("track", bytes)
    }
}

impl Decode for Artist {
    fn decode(bytes: &[u8]) -> AppResult<Self> {
        decode_json("artist", bytes)
    }
}

impl Decode for RecommendationList {
    fn decode(bytes: &[u8]) -> AppResult<Self> {
        decode_json("recommendation list", bytes)
    }
}

/// Encodes a record the way catalog stores hold it
pub fn encode<T: serde::Serialize>(value: &T) -> AppResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| AppError::Internal(format!("Encode error: {}", e)))
}
