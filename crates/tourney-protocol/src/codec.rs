//! Codec trait and implementation for response and request bodies.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! The access layer doesn't care HOW bodies are serialized, it just needs
//! something that implements [`Codec`]. The remote API speaks JSON, so
//! [`JsonCodec`] is the only implementation; tests can swap in their own.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// ## Trait bounds explained
///
/// - `Send + Sync` → the client holding the codec is shared across tasks.
/// - `'static` → the codec owns everything it needs.
///
/// `DeserializeOwned` (vs plain `Deserialize`) means the result doesn't
/// borrow from the input bytes. Response buffers are dropped right after
/// decoding, so borrowing from them would not compile.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// An empty body decodes as JSON `null`, so endpoints that answer
/// `204 No Content` can still be decoded into `()` or an `Option`.
///
/// ## Example
///
/// ```rust
/// use tourney_protocol::{Codec, JsonCodec, TournamentList};
///
/// let codec = JsonCodec;
/// let list: TournamentList = codec
///     .decode(br#"{"Tournois":[{"id":1,"name":"Cup","rules":"","nb_players":4,"creator_id":2}]}"#)
///     .unwrap();
/// assert_eq!(list.tournaments[0].name, "Cup");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return serde_json::from_slice(b"null").map_err(ProtocolError::Decode);
        }
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
