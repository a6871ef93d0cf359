use std::num::Wrapping;

use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use system::{ConnectionId, Delivery, SessionCoordinator};

use super::connection::{ConnectionCommand, ConnectionEvent};
use crate::admin::AdminCommand;
use crate::connection_tx_storage::ConnectionTxStorage;
use crate::error::ServerError;

pub type ServerTx = UnboundedSender<ServerCommand>;

#[derive(Debug)]
pub enum ServerCommand {
    Connection(ConnectionCommand),
    Admin(AdminCommand),
}

struct Server {
    coordinator: SessionCoordinator,
    connections: ConnectionTxStorage,
    connection_id_source: Wrapping<ConnectionId>,
}

impl Server {
    fn new() -> Self {
        Self {
            coordinator: SessionCoordinator::new(),
            connections: ConnectionTxStorage::new(),
            connection_id_source: Wrapping(0),
        }
    }

    fn handle_server_command(&mut self, command: ServerCommand) {
        match command {
            ServerCommand::Connection(command) => self.handle_connection_command(command),
            ServerCommand::Admin(command) => self.handle_admin_command(command),
        }
    }

    fn handle_connection_command(&mut self, command: ConnectionCommand) {
        match command {
            ConnectionCommand::Connect { tx } => {
                let connection_id = self.new_connection_id();
                self.connections.insert(connection_id, tx);
                if let Err(e) = self
                    .connections
                    .send(&connection_id, ConnectionEvent::Connected { connection_id })
                {
                    // socket closed before it learned its id
                    log::debug!("{}", e);
                    self.connections.remove(&connection_id);
                    return;
                }
                let deliveries = self.coordinator.on_connect(connection_id);
                self.deliver(deliveries);
            }
            ConnectionCommand::Disconnect { from } => self.drop_connection(from),
            ConnectionCommand::SessionCommand { from, command } => {
                let deliveries = self.coordinator.on_command(from, command);
                self.deliver(deliveries);
            }
        }
    }

    fn handle_admin_command(&mut self, command: AdminCommand) {
        match command {
            AdminCommand::GetSessionStatus { tx } => {
                if tx.send(self.coordinator.status()).is_err() {
                    log::debug!("Session status requester went away");
                }
            }
        }
    }

    fn deliver(&mut self, deliveries: Vec<Delivery>) {
        for Delivery { to, event } in deliveries {
            // the client may have closed before its disconnect reached us
            if let Err(ServerError::StaleConnection(id)) =
                self.connections.send(&to, ConnectionEvent::SessionEvent(event))
            {
                log::debug!("Dropped relay to closed connection {}", id);
                self.drop_connection(id);
            }
        }
    }

    fn drop_connection(&mut self, connection_id: ConnectionId) {
        self.coordinator.on_disconnect(connection_id);
        self.connections.remove(&connection_id);
    }

    fn new_connection_id(&mut self) -> ConnectionId {
        loop {
            self.connection_id_source += Wrapping(1);
            let candidate = self.connection_id_source.0;
            if !self.connections.contains(&candidate) {
                break candidate;
            }
        }
    }
}

pub fn spawn_server() -> ServerTx {
    let (srv_tx, mut srv_rx) = unbounded_channel::<ServerCommand>();

    tokio::spawn(async move {
        let mut server = Box::new(Server::new());

        while let Some(command) = srv_rx.recv().await {
            server.handle_server_command(command);
        }
        log::info!("server task terminated");
    });

    srv_tx
}
