use super::Lobby;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;

/// Liveness probe. There is no backing store to check: the engine is
/// in-memory, so a responsive process is a healthy one.
pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

/// Upgrades the request to a WebSocket and hands the socket to the
/// lobby's bridge task.
pub async fn enter(
    lobby: web::Data<Lobby>,
    body: web::Payload,
    req: HttpRequest,
) -> impl Responder {
    match actix_ws::handle(&req, body) {
        Ok((response, session, stream)) => {
            lobby.into_inner().bridge(session, stream).await;
            response.map_into_left_body()
        }
        Err(e) => HttpResponse::InternalServerError()
            .body(e.to_string())
            .map_into_right_body(),
    }
}
