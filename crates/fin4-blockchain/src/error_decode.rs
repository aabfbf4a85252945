use std::sync::Arc;

use alloy::{
    hex,
    primitives::Bytes,
    sol_types::{Panic, Revert, SolError, decode_revert_reason},
};

use crate::{ProviderError, RevertDecoderKind};

/// Text preceding the JSON body in the error envelope of injected providers.
pub const OBJECT_ENVELOPE_PREFIX: &str = "Error: [object Object]";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeShapeError {
    #[error("error text does not start with 'Error: [object Object]'")]
    MissingPrefix,

    #[error("error body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("error body has no string at '{path}'")]
    MissingField { path: String },

    #[error("provider error carries no revert data")]
    MissingRevertData,

    #[error("revert data {data} is not a standard revert")]
    UndecodableRevertData { data: String },
}

/// Extracts the human-readable revert reason from a failed read-only call.
pub trait RevertReasonDecoder: Send + Sync {
    fn decode(&self, error: &ProviderError) -> Result<String, DecodeShapeError>;
}

/// Decodes `"Error: [object Object]" + {"data": {"<tx>": {"reason": ...}}}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectEnvelopeDecoder;

impl RevertReasonDecoder for ObjectEnvelopeDecoder {
    fn decode(&self, error: &ProviderError) -> Result<String, DecodeShapeError> {
        let body = error
            .message()
            .strip_prefix(OBJECT_ENVELOPE_PREFIX)
            .ok_or(DecodeShapeError::MissingPrefix)?;

        let parsed: serde_json::Value = serde_json::from_str(body.trim())
            .map_err(|e| DecodeShapeError::InvalidJson(e.to_string()))?;

        let data = parsed
            .get("data")
            .and_then(serde_json::Value::as_object)
            .ok_or_else(|| DecodeShapeError::MissingField {
                path: "data".to_string(),
            })?;

        // Entry order is the document order, so "first key" is well defined.
        let (key, entry) = data.iter().next().ok_or_else(|| DecodeShapeError::MissingField {
            path: "data.<first key>".to_string(),
        })?;

        entry
            .get("reason")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| DecodeShapeError::MissingField {
                path: format!("data.{key}.reason"),
            })
    }
}

/// Decodes standard `Error(string)` / `Panic(uint256)` revert data attached
/// to a JSON-RPC error.
#[derive(Debug, Clone, Copy, Default)]
pub struct RevertDataDecoder;

impl RevertReasonDecoder for RevertDataDecoder {
    fn decode(&self, error: &ProviderError) -> Result<String, DecodeShapeError> {
        let data = error
            .revert_data()
            .cloned()
            .or_else(|| spelunk_revert_data(error.message()))
            .ok_or(DecodeShapeError::MissingRevertData)?;

        if let Ok(revert) = Revert::abi_decode(&data) {
            return Ok(revert.reason);
        }
        if let Ok(panic) = Panic::abi_decode(&data) {
            return Ok(panic.to_string());
        }
        decode_revert_reason(&data).ok_or_else(|| DecodeShapeError::UndecodableRevertData {
            data: hex::encode_prefixed(&data),
        })
    }
}

/// Some providers only render revert data inside the message text.
fn spelunk_revert_data(message: &str) -> Option<Bytes> {
    fn spelunk(value: &serde_json::Value) -> Option<Bytes> {
        match value {
            serde_json::Value::String(s) if s.starts_with("0x") => s.parse().ok(),
            serde_json::Value::Object(o) => o.values().find_map(spelunk),
            _ => None,
        }
    }

    let start = message.find('{')?;
    let value: serde_json::Value = serde_json::from_str(&message[start..]).ok()?;
    spelunk(&value)
}

pub fn revert_decoder(kind: RevertDecoderKind) -> Arc<dyn RevertReasonDecoder> {
    match kind {
        RevertDecoderKind::ObjectEnvelope => Arc::new(ObjectEnvelopeDecoder),
        RevertDecoderKind::RevertData => Arc::new(RevertDataDecoder),
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::U256;

    use super::*;

    fn envelope(body: &str) -> ProviderError {
        ProviderError::new(format!("{OBJECT_ENVELOPE_PREFIX}{body}"))
    }

    #[test]
    fn extracts_reason_under_first_data_key() {
        let err = envelope(r#"{"data":{"0xabc":{"reason":"R"}}}"#);
        assert_eq!(ObjectEnvelopeDecoder.decode(&err).unwrap(), "R");

        let err = envelope(
            r#" {"message":"VM Exception","data":{"0x9f":{"error":"revert","reason":"Not enough REP"},"stack":"..."}}"#,
        );
        assert_eq!(ObjectEnvelopeDecoder.decode(&err).unwrap(), "Not enough REP");
    }

    #[test]
    fn envelope_shape_mismatches_are_errors() {
        assert_eq!(
            ObjectEnvelopeDecoder.decode(&ProviderError::new("execution reverted")),
            Err(DecodeShapeError::MissingPrefix)
        );
        assert!(matches!(
            ObjectEnvelopeDecoder.decode(&envelope("{not json")),
            Err(DecodeShapeError::InvalidJson(_))
        ));
        assert_eq!(
            ObjectEnvelopeDecoder.decode(&envelope(r#"{"data":{}}"#)),
            Err(DecodeShapeError::MissingField {
                path: "data.<first key>".to_string()
            })
        );
        assert_eq!(
            ObjectEnvelopeDecoder.decode(&envelope(r#"{"data":{"0xabc":{"reason":7}}}"#)),
            Err(DecodeShapeError::MissingField {
                path: "data.0xabc.reason".to_string()
            })
        );
    }

    #[test]
    fn decodes_error_string_revert_data() {
        let data = Revert::from("Claim already approved".to_string()).abi_encode();
        let err = ProviderError::new("execution reverted").with_revert_data(data.into());

        assert_eq!(RevertDataDecoder.decode(&err).unwrap(), "Claim already approved");
    }

    #[test]
    fn decodes_panic_and_embedded_revert_data() {
        let panic = Panic {
            code: U256::from(0x11),
        };
        let err = ProviderError::new("execution reverted").with_revert_data(panic.abi_encode().into());
        assert!(RevertDataDecoder.decode(&err).unwrap().contains("panic"));

        let data = hex::encode_prefixed(Revert::from("Only creator".to_string()).abi_encode());
        let err = ProviderError::new(format!(r#"server returned an error: {{"data":"{data}"}}"#));
        assert_eq!(RevertDataDecoder.decode(&err).unwrap(), "Only creator");
    }

    #[test]
    fn missing_or_unknown_revert_data_is_an_error() {
        assert_eq!(
            RevertDataDecoder.decode(&ProviderError::new("timeout")),
            Err(DecodeShapeError::MissingRevertData)
        );

        let err = ProviderError::new("execution reverted")
            .with_revert_data(Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]));
        assert!(matches!(
            RevertDataDecoder.decode(&err),
            Err(DecodeShapeError::UndecodableRevertData { .. })
        ));
    }
}
