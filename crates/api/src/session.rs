//! Per-connection session loop.
//!
//! One tokio task owns each accepted connection. Within a task, hyper's
//! http1 driver reads one complete request at a time and the service writes
//! exactly one response before the next read, so requests on a connection
//! are processed strictly in arrival order with no pipelining. Request
//! buffers are owned per-request; nothing leaks between messages.

use std::convert::Infallible;
use std::net::SocketAddr;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error};

use crate::response::Outcome;
use crate::{AppState, handlers, router};

/// Accepts connections forever, spawning one session task per connection.
///
/// A fault on an individual accept is logged and does not take down the
/// listener.
pub async fn serve(listener: TcpListener, state: AppState) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                let state = state.clone();
                tokio::spawn(run_session(stream, peer, state));
            }
            Err(err) => error!(error = %err, "Failed to accept connection"),
        }
    }
}

/// Drives one connection until the peer closes it or a transport fault ends
/// it. A clean end-of-stream between requests terminates quietly; any other
/// read or write failure is logged. Either way the stream drops here, which
/// closes the socket.
async fn run_session(stream: TcpStream, peer: SocketAddr, state: AppState) {
    debug!(%peer, "Connection opened");
    let io = TokioIo::new(stream);
    let service = service_fn(move |request| {
        let state = state.clone();
        async move { Ok::<_, Infallible>(handle_request(request, &state).await) }
    });
    match http1::Builder::new().serve_connection(io, service).await {
        Ok(()) => debug!(%peer, "Connection closed"),
        Err(err) => error!(%peer, error = %err, "Connection failed"),
    }
}

/// Reads one request to completion, routes it, and dispatches the operation.
async fn handle_request(request: Request<Incoming>, state: &AppState) -> Response<Full<Bytes>> {
    let method = request.method().clone();
    let target = request
        .uri()
        .path_and_query()
        .map_or_else(|| "/".to_string(), ToString::to_string);
    debug!(method = %method, target = %target, "Request received");

    let body = match request.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            error!(error = %err, "Failed to read request body");
            return Outcome::ServerError(err.to_string()).into_response();
        }
    };

    let outcome = match router::route(&method, &target) {
        Ok(operation) => handlers::dispatch(state, operation, &target, &body).await,
        Err(err) => Outcome::BadRequest(err.to_string()),
    };
    outcome.into_response()
}
