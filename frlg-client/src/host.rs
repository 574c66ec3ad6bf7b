use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

/// An item the host has sent to this slot, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceivedItem {
    pub item: u32,
    pub player: u32,
    pub flags: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum ClientStatus {
    Goal = 30,
}

impl From<ClientStatus> for u8 {
    fn from(status: ClientStatus) -> u8 {
        status as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SetOperation {
    Or,
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataStorageOperation {
    pub operation: SetOperation,
    pub value: u64,
}

/// Outbound message, serialized with the host protocol's `cmd` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "cmd")]
pub enum ClientMessage {
    LocationChecks {
        locations: Vec<u32>,
    },
    StatusUpdate {
        status: ClientStatus,
    },
    Set {
        key: String,
        default: u64,
        want_reply: bool,
        operations: Vec<DataStorageOperation>,
    },
}

impl ClientMessage {
    pub(crate) fn set(key: String, operation: SetOperation, value: u64) -> Self {
        ClientMessage::Set {
            key,
            default: 0,
            want_reply: false,
            operations: vec![DataStorageOperation { operation, value }],
        }
    }
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Host connection closed")]
    Closed,
    #[error("Host rejected message: {0}")]
    Rejected(String),
}

/// The multiworld server connection as seen by the reconciler.
#[async_trait]
pub trait HostSession: Send + Sync {
    async fn send_msgs(&self, msgs: Vec<ClientMessage>) -> Result<(), HostError>;

    /// Hands the ROM's auth token to the server connection.
    async fn authenticate(&self, auth: String) -> Result<(), HostError>;

    /// Connected with slot data available.
    fn is_ready(&self) -> bool;
    fn items_received(&self) -> Vec<ReceivedItem>;
    fn server_locations(&self) -> BTreeSet<u32>;
    fn slot(&self) -> Option<u32>;
    fn team(&self) -> u32;
    fn finished_game(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn messages_use_the_wire_shape() {
        let goal = ClientMessage::StatusUpdate { status: ClientStatus::Goal };
        assert_eq!(serde_json::to_value(&goal).unwrap(), json!({"cmd": "StatusUpdate", "status": 30}));

        let set = ClientMessage::set("pokemon_frlg_pokedex_0_1".to_string(), SetOperation::Replace, 12);
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            json!({
                "cmd": "Set",
                "key": "pokemon_frlg_pokedex_0_1",
                "default": 0,
                "want_reply": false,
                "operations": [{"operation": "replace", "value": 12}],
            })
        );
    }
}
