use serde::Serialize;

use crate::message::{SessionCommand, SessionEvent};
use crate::types::{ConnectionId, Stroke};

/// Which connections receive a relayed event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RelayPolicy {
    AllExceptSender,
    All,
}

impl RelayPolicy {
    pub fn recipients(&self, connections: &[ConnectionId], sender: ConnectionId) -> Vec<ConnectionId> {
        connections
            .iter()
            .filter(|c| match self {
                Self::AllExceptSender => **c != sender,
                Self::All => true,
            })
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub to: ConnectionId,
    pub event: SessionEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub connections: usize,
    pub strokes: usize,
}

/// Owns the stroke history of the session and decides who hears about what.
///
/// Nothing is sent from here; every operation returns the deliveries its
/// caller has to perform, in order.
pub struct SessionCoordinator {
    connections: Vec<ConnectionId>,
    history: Vec<Stroke>,
}

impl SessionCoordinator {
    pub fn new() -> Self {
        Self {
            connections: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn on_connect(&mut self, connection_id: ConnectionId) -> Vec<Delivery> {
        if self.connections.contains(&connection_id) {
            log::warn!("Connection {} is already registered", connection_id);
        } else {
            self.connections.push(connection_id);
        }
        log::info!(
            "Connection {} established, {} clients connected",
            connection_id,
            self.connections.len()
        );
        vec![Delivery {
            to: connection_id,
            event: SessionEvent::Init(self.history.clone()),
        }]
    }

    pub fn on_command(&mut self, from: ConnectionId, command: SessionCommand) -> Vec<Delivery> {
        if !self.connections.contains(&from) {
            log::warn!("Dropping command from unknown connection {}", from);
            return Vec::new();
        }

        let policy = command.relay_policy();
        // history is mutated before relaying so that a later Init never misses a relayed stroke
        let event = match command {
            SessionCommand::Draw(stroke) => {
                log::debug!("Connection {} drew {} points", from, stroke.len());
                self.history.push(stroke.clone());
                SessionEvent::Draw(stroke)
            }
            SessionCommand::Clear => {
                log::info!("Connection {} cleared {} strokes", from, self.history.len());
                self.history.clear();
                SessionEvent::Clear
            }
        };

        policy
            .recipients(&self.connections, from)
            .into_iter()
            .map(|to| Delivery {
                to,
                event: event.clone(),
            })
            .collect()
    }

    pub fn on_disconnect(&mut self, connection_id: ConnectionId) -> bool {
        let before = self.connections.len();
        self.connections.retain(|c| *c != connection_id);
        let removed = self.connections.len() != before;
        if removed {
            log::info!(
                "Connection {} closed, {} clients connected",
                connection_id,
                self.connections.len()
            );
        }
        removed
    }

    pub fn history(&self) -> &[Stroke] {
        &self.history
    }

    pub fn connections(&self) -> &[ConnectionId] {
        &self.connections
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            connections: self.connections.len(),
            strokes: self.history.len(),
        }
    }
}

impl Default for SessionCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
