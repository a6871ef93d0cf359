use actix::{Actor, ActorContext, AsyncContext, Handler, Message, Running, StreamHandler};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;

use system::{ConnectionId, SessionCommand, SessionEvent};

use crate::connection_tx_storage::ConnectionTx;
use crate::error::ServerError;
use crate::server::{ServerCommand, ServerTx};

#[derive(Debug)]
pub enum ConnectionCommand {
    Connect {
        tx: ConnectionTx,
    },
    Disconnect {
        from: ConnectionId,
    },
    SessionCommand {
        from: ConnectionId,
        command: SessionCommand,
    },
}

#[derive(Debug, PartialEq)]
pub enum ConnectionEvent {
    Connected { connection_id: ConnectionId },
    SessionEvent(SessionEvent),
}

#[derive(Message)]
#[rtype(result = "()")]
struct ConnectionActorMessage(ConnectionEvent);

/// What the actor does with one incoming frame.
#[derive(Debug)]
enum Ingress {
    Forward(Vec<ConnectionCommand>),
    Pong(web::Bytes),
    Close(Option<ws::CloseReason>),
    Ignore,
}

enum ConnectionState {
    /// Commands arriving before the server assigned an id are held here.
    Idle { pending: Vec<SessionCommand> },
    Connected(ConnectionId),
}

impl ConnectionState {
    fn new() -> Self {
        Self::Idle {
            pending: Vec::new(),
        }
    }

    fn submit(&mut self, command: SessionCommand) -> Vec<ConnectionCommand> {
        match self {
            Self::Connected(from) => vec![ConnectionCommand::SessionCommand {
                from: *from,
                command,
            }],
            Self::Idle { pending } => {
                pending.push(command);
                Vec::new()
            }
        }
    }

    /// Releases everything held while Idle, in arrival order.
    fn connected(&mut self, connection_id: ConnectionId) -> Vec<ConnectionCommand> {
        match std::mem::replace(self, Self::Connected(connection_id)) {
            Self::Idle { pending } => pending
                .into_iter()
                .map(|command| ConnectionCommand::SessionCommand {
                    from: connection_id,
                    command,
                })
                .collect(),
            Self::Connected(previous) => {
                log::warn!("Connection {} was reassigned to {}", previous, connection_id);
                Vec::new()
            }
        }
    }

    fn disconnect(&self) -> Option<ConnectionCommand> {
        match self {
            Self::Connected(from) => Some(ConnectionCommand::Disconnect { from: *from }),
            Self::Idle { .. } => None,
        }
    }

    fn ingress(&mut self, frame: ws::Message) -> Ingress {
        match frame {
            ws::Message::Ping(msg) => Ingress::Pong(msg),
            ws::Message::Text(text) => match SessionCommand::from_json(&text) {
                Ok(command) => {
                    log::debug!("Ingress {:?}", command);
                    Ingress::Forward(self.submit(command))
                }
                Err(e) => {
                    log::warn!("Ignoring frame: {}", e);
                    Ingress::Ignore
                }
            },
            ws::Message::Binary(bin) => {
                log::warn!("Ignoring binary frame of {} bytes", bin.len());
                Ingress::Ignore
            }
            ws::Message::Close(reason) => Ingress::Close(reason),
            _ => Ingress::Ignore,
        }
    }
}

struct ConnectionActor {
    state: ConnectionState,
    srv_tx: ServerTx,
}

impl ConnectionActor {
    fn new(srv_tx: ServerTx) -> Self {
        Self {
            state: ConnectionState::new(),
            srv_tx,
        }
    }

    fn send_to_server(&self, commands: Vec<ConnectionCommand>) -> Result<(), ServerError> {
        for command in commands {
            self.srv_tx
                .send(ServerCommand::Connection(command))
                .map_err(|_| ServerError::ServerUnavailable)?;
        }
        Ok(())
    }
}

impl Actor for ConnectionActor {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<ConnectionEvent>();

        if let Err(e) = self.send_to_server(vec![ConnectionCommand::Connect { tx }]) {
            log::error!("{}", e);
            ctx.stop();
            return;
        }

        let addr = ctx.address().recipient();
        let srv_tx = self.srv_tx.clone();

        tokio::spawn(async move {
            log::debug!("connection green thread - started");
            let mut connection_id = None;
            while let Some(msg) = rx.recv().await {
                if let ConnectionEvent::Connected { connection_id: id } = &msg {
                    connection_id = Some(*id);
                }
                if addr.do_send(ConnectionActorMessage(msg)).is_err() {
                    // the actor stopped before it could report its own id
                    if let Some(from) = connection_id {
                        let _ = srv_tx.send(ServerCommand::Connection(
                            ConnectionCommand::Disconnect { from },
                        ));
                    }
                    break;
                }
            }
            log::debug!("connection green thread - terminated");
        });
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        if let Some(command) = self.state.disconnect() {
            if let Err(e) = self.send_to_server(vec![command]) {
                log::error!("{}", e);
            }
        }

        Running::Stop
    }
}

/// Ingress
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ConnectionActor {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        let frame = match msg {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("WebSocket protocol error: {}", e);
                ctx.stop();
                return;
            }
        };
        match self.state.ingress(frame) {
            Ingress::Forward(commands) => {
                if let Err(e) = self.send_to_server(commands) {
                    log::error!("{}", e);
                    ctx.stop();
                }
            }
            Ingress::Pong(msg) => ctx.pong(&msg),
            Ingress::Close(reason) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ingress::Ignore => (),
        }
    }
}

/// Egress
impl Handler<ConnectionActorMessage> for ConnectionActor {
    type Result = ();

    fn handle(
        &mut self,
        msg: ConnectionActorMessage,
        ctx: &mut ws::WebsocketContext<Self>,
    ) -> Self::Result {
        match msg.0 {
            ConnectionEvent::Connected { connection_id } => {
                let released = self.state.connected(connection_id);
                if let Err(e) = self.send_to_server(released) {
                    log::error!("{}", e);
                    ctx.stop();
                }
            }
            ConnectionEvent::SessionEvent(event) => match event.to_json() {
                Ok(json) => ctx.text(json),
                Err(e) => log::error!("Cannot encode {:?}: {}", event, e),
            },
        }
    }
}

pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    srv_tx: web::Data<ServerTx>,
) -> Result<HttpResponse, Error> {
    ws::start(ConnectionActor::new(srv_tx.get_ref().clone()), &req, stream)
}
