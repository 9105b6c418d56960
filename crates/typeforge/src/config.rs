//! Registry configuration.

use serde::{Deserialize, Serialize};
use typeforge_codec::{WireCodec, WireFormat};
use typeforge_wire::DEFAULT_MAX_FRAME_LEN;

/// Configuration for a [`Registry`](crate::Registry).
///
/// Fixed at construction. Every codec the registry builds is bound to
/// these settings, so all entries agree on the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Codec that serializers and deserializers are bound to.
    pub wire_format: WireFormat,

    /// Largest payload a single serialized value may occupy.
    pub max_frame_len: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            wire_format: WireFormat::Binary,
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
        }
    }
}

impl RegistryConfig {
    /// Sets the wire format.
    pub fn with_wire_format(mut self, format: WireFormat) -> Self {
        self.wire_format = format;
        self
    }

    /// Sets the frame limit.
    pub fn with_max_frame_len(mut self, max_frame_len: usize) -> Self {
        self.max_frame_len = max_frame_len;
        self
    }

    /// Returns the codec selected by [`wire_format`](Self::wire_format).
    pub fn codec(&self) -> WireCodec {
        self.wire_format.codec()
    }
}
