use system::ConnectionId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("connection {0} is gone")]
    StaleConnection(ConnectionId),
    #[error("server task is not running")]
    ServerUnavailable,
}
