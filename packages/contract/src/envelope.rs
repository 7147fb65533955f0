//! Versioned envelope shared by every contract document

use crate::error::ContractResult;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub schema: String,
    pub version: String,
    pub generated_at: String,
    /// SHA-256 of the serialized payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// An envelope with its payload flattened beside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract<P> {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(flatten)]
    pub payload: P,
}

impl<P: Serialize> Contract<P> {
    pub fn seal(
        schema: &str,
        version: &str,
        generated_at: &str,
        payload: P,
        with_hash: bool,
    ) -> ContractResult<Self> {
        let hash = if with_hash {
            Some(payload_hash(&payload)?)
        } else {
            None
        };

        Ok(Self {
            envelope: Envelope {
                schema: schema.to_string(),
                version: version.to_string(),
                generated_at: generated_at.to_string(),
                hash,
            },
            payload,
        })
    }

    pub fn to_json_pretty(&self) -> ContractResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Hex SHA-256 of a payload's compact JSON form. The payload never includes
/// the timestamp, so the hash is stable across runs.
pub fn payload_hash<P: Serialize>(payload: &P) -> ContractResult<String> {
    let bytes = serde_json::to_vec(payload)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// RFC 3339 timestamp for the `generatedAt` field
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
