//! Codec trait and implementations for request and response bodies.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! The HTTP handlers don't care HOW bodies are serialized; they hold
//! something that implements [`Codec`]. Today that's always [`JsonCodec`].
//!
//! Handlers decode request bodies through the codec instead of using a
//! framework JSON extractor. That keeps the old clients working: they send
//! JSON without a `Content-Type` header, and a malformed body must come back
//! as a plain 400 rather than a 415 or 422.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// - `Send + Sync` → one codec instance is shared by every request task.
/// - `'static` → it lives as long as the server.
pub trait Codec: Send + Sync + 'static {
    /// MIME type written to the `Content-Type` header of encoded responses.
    const CONTENT_TYPE: &'static str;

    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or don't
    /// match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use signupless_protocol::{AddSessionRequest, Codec, JsonCodec};
///
/// let codec = JsonCodec;
/// let req: AddSessionRequest = codec.decode(br#"{"id": "1234567890"}"#).unwrap();
/// assert_eq!(req.id.as_str(), "1234567890");
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    const CONTENT_TYPE: &'static str = "application/json";

    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use std::collections::BTreeMap;

    use signupless_token::derive;

    use super::*;
    use crate::{AddSessionRequest, Identity, SessionResponse};

    #[test]
    fn test_decode_add_request_ignores_unknown_fields() {
        let req: AddSessionRequest = JsonCodec
            .decode(br#"{"id": "alice", "extra": true}"#)
            .expect("unknown fields are ignored");
        assert_eq!(req.id, Identity::new("alice"));
    }

    #[test]
    fn test_decode_malformed_json_returns_decode_error() {
        let result: Result<AddSessionRequest, _> = JsonCodec.decode(b"{\"id\": ");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_missing_id_returns_decode_error() {
        let result: Result<AddSessionRequest, _> = JsonCodec.decode(b"{}");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_non_string_id_returns_decode_error() {
        let result: Result<AddSessionRequest, _> = JsonCodec.decode(br#"{"id": 12}"#);
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_empty_body_returns_decode_error() {
        let result: Result<AddSessionRequest, _> = JsonCodec.decode(b"");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_encode_session_response_shape() {
        let token = derive("salt", 1);
        let resp = SessionResponse {
            id: Identity::new("alice"),
            token: token.clone(),
        };

        let bytes = JsonCodec.encode(&resp).expect("encode");
        let value: BTreeMap<String, String> =
            serde_json::from_slice(&bytes).expect("valid json object");

        assert_eq!(value.len(), 2);
        assert_eq!(value["id"], "alice");
        assert_eq!(value["token"], token.as_str());
    }

    #[test]
    fn test_encode_non_string_map_key_returns_encode_error() {
        // JSON object keys must be strings.
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], "x");
        let result = JsonCodec.encode(&map);
        assert!(matches!(result, Err(ProtocolError::Encode(_))));
    }
}
