//! Versioned wrapper around every save file

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// A type stored in its own save file
pub trait SaveFile: Serialize + DeserializeOwned {
    /// Tag written into the envelope; loading a file with another tag fails
    const KIND: &'static str;
    /// Current schema version
    const VERSION: u32;
}

/// On-disk layout: `{ "kind": ..., "version": ..., "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub kind: String,
    pub version: u32,
    pub data: T,
}

/// Serialize `value` inside its envelope
pub fn encode<T: SaveFile>(value: &T) -> Result<String, PersistenceError> {
    let envelope = Envelope {
        kind: T::KIND.to_string(),
        version: T::VERSION,
        data: value,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Parse an envelope and check its kind and version before decoding the payload
pub fn decode<T: SaveFile>(json: &str) -> Result<T, PersistenceError> {
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(json)?;
    if envelope.kind != T::KIND {
        return Err(PersistenceError::Kind {
            expected: T::KIND.to_string(),
            found: envelope.kind,
        });
    }
    if envelope.version != T::VERSION {
        return Err(PersistenceError::Version {
            kind: envelope.kind,
            found: envelope.version,
            expected: T::VERSION,
        });
    }
    Ok(serde_json::from_value(envelope.data)?)
}
