use crate::connection::ConnectionEvent;
use crate::error::ServerError;
use std::collections::HashMap;
use system::ConnectionId;

pub type ConnectionTx = tokio::sync::mpsc::UnboundedSender<ConnectionEvent>;

pub struct ConnectionTxStorage {
    connection_txs: HashMap<ConnectionId, ConnectionTx>,
}

impl ConnectionTxStorage {
    pub fn new() -> Self {
        Self {
            connection_txs: HashMap::new(),
        }
    }

    pub fn insert(&mut self, connection_id: ConnectionId, tx: ConnectionTx) {
        self.connection_txs.insert(connection_id, tx);
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.connection_txs.contains_key(connection_id)
    }

    /// Never waits on the receiving connection.
    pub fn send(&self, to: &ConnectionId, message: ConnectionEvent) -> Result<(), ServerError> {
        self.connection_txs
            .get(to)
            .ok_or(ServerError::StaleConnection(*to))?
            .send(message)
            .map_err(|_| ServerError::StaleConnection(*to))
    }

    pub fn remove(&mut self, connection_id: &ConnectionId) -> Option<ConnectionTx> {
        self.connection_txs.remove(connection_id)
    }
}
