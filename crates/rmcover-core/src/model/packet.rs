// ── Recorded command payloads ──

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;

use crate::error::CoreError;

/// An opaque, pre-recorded IR/RF command as learned by the transmitter.
///
/// Cheap to clone; the bytes are shared.
#[derive(Clone, PartialEq, Eq)]
pub struct CommandPacket(Bytes);

impl CommandPacket {
    /// Decode a packet from its base64 text form.
    ///
    /// Whitespace is ignored so codes pasted across several lines still
    /// decode. Blank input means "no command configured" and yields `None`.
    pub fn from_base64(encoded: &str) -> Result<Option<Self>, CoreError> {
        let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Ok(None);
        }

        STANDARD
            .decode(compact.as_bytes())
            .map(|raw| Some(Self(Bytes::from(raw))))
            .map_err(|e| CoreError::InvalidPacket {
                reason: e.to_string(),
            })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

}

impl From<Vec<u8>> for CommandPacket {
    fn from(raw: Vec<u8>) -> Self {
        Self(Bytes::from(raw))
    }
}

impl From<&'static [u8]> for CommandPacket {
    fn from(raw: &'static [u8]) -> Self {
        Self(Bytes::from_static(raw))
    }
}

// Recorded codes run to hundreds of bytes; keep logs readable.
impl fmt::Debug for CommandPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommandPacket({} bytes)", self.0.len())
    }
}
