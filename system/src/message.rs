use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coordinator::RelayPolicy;
use crate::types::Stroke;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Client -> coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum SessionCommand {
    Draw(Stroke),
    Clear,
}

/// Coordinator -> client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum SessionEvent {
    Init(Vec<Stroke>),
    Draw(Stroke),
    Clear,
}

impl SessionCommand {
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Draw is already on the sender's canvas; Clear is not until it comes back.
    pub fn relay_policy(&self) -> RelayPolicy {
        match self {
            Self::Draw(_) => RelayPolicy::AllExceptSender,
            Self::Clear => RelayPolicy::All,
        }
    }
}

impl SessionEvent {
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}
