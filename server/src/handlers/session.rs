use crate::admin::AdminCommand;
use crate::server::{ServerCommand, ServerTx};
use actix_web::{error, web, HttpResponse};
use system::SessionStatus;

pub fn configure_session_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/session").route(web::get().to(get)));
}

async fn get(srv_tx: web::Data<ServerTx>) -> Result<HttpResponse, actix_web::error::Error> {
    let (tx, rx) = tokio::sync::oneshot::channel::<SessionStatus>();

    srv_tx
        .get_ref()
        .send(ServerCommand::Admin(AdminCommand::GetSessionStatus { tx }))
        .map_err(|_| error::ErrorInternalServerError("Internal Server Error"))?;

    let status = rx
        .await
        .map_err(|_| error::ErrorInternalServerError("Receiver await error"))?;

    Ok(HttpResponse::Ok().json(status))
}
