//! Storage abstractions for service layer
//!
//! Contains the file-backed document store used to persist small
//! collections as pretty-printed JSON.

pub mod json_file_store;

use serde::de::DeserializeOwned;

/// Parse JSON into `T`. A key repeated within one object keeps its last value
/// instead of failing with a duplicate-field error.
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
    serde_json::from_slice::<serde_json::Value>(bytes).and_then(serde_json::from_value)
}
