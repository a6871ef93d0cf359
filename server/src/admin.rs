use system::SessionStatus;
use tokio::sync::oneshot::Sender;

#[derive(Debug)]
pub enum AdminCommand {
    GetSessionStatus { tx: Sender<SessionStatus> },
}
