//! Request envelope around the batch decoder: size ceiling, empty-body check
//! and the choice between a flat list and a grouped response.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::decode_batch::{decode_batch, decode_flat};
use crate::types::{BatchResult, Record, RequestError};

/// Default body ceiling (100 KB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 100 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestLimits {
    /// Largest accepted body in bytes, `0` for no limit
    pub max_body_bytes: usize,
}

impl Default for RequestLimits {
    fn default() -> Self {
        RequestLimits {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseMode {
    /// Array of records
    Flat,
    /// `{ "imei": ..., "pacotes": [...] }`
    #[default]
    Grouped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DecodeResponse {
    Flat(Vec<Record>),
    Grouped(BatchResult),
}

impl DecodeResponse {
    pub fn records(&self) -> &[Record] {
        match self {
            DecodeResponse::Flat(records) => records,
            DecodeResponse::Grouped(batch) => &batch.records,
        }
    }
}

/// Checks a request body against the limits and decodes it in the requested shape.
pub fn handle_request(
    body: &str,
    mode: ResponseMode,
    limits: &RequestLimits,
) -> Result<DecodeResponse, RequestError> {
    if body.trim().is_empty() {
        return Err(RequestError::EmptyBody);
    }
    if limits.max_body_bytes != 0 && body.len() > limits.max_body_bytes {
        return Err(RequestError::PayloadTooLarge {
            size: body.len(),
            limit: limits.max_body_bytes,
        });
    }

    debug!("decoding {} byte body as {:?}", body.len(), mode);
    Ok(match mode {
        ResponseMode::Flat => DecodeResponse::Flat(decode_flat(body)),
        ResponseMode::Grouped => DecodeResponse::Grouped(decode_batch(body)),
    })
}
