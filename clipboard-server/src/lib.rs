//! # Clipboard Server
//!
//! HTTP facade over [`clipboard_core`]: `POST /?id=<id>&value=<value>`
//! records a clip, `GET /?id=<id>` reads it back until it expires. All
//! responses are JSON envelopes.
//!
//! The library surface exists so integration tests can run the accept loop
//! against an ephemeral port; the binary in `main.rs` is the production
//! entry point.

pub mod http;
pub mod service;

use anyhow::Result;
use clipboard_core::Store;
use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};

use crate::http::{Response, Status};
use crate::service::ClipboardService;

/// Accepts connections forever, spawning one task per connection
pub async fn serve(listener: TcpListener, store: Store) -> Result<()> {
    let service = ClipboardService::new(store);
    loop {
        let (stream, peer) = listener.accept().await?;
        let service = service.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, service).await {
                tracing::debug!(error = %e, %peer, "connection closed with error");
            }
        });
    }
}

/// Serves requests on one connection until the client goes away
async fn handle_connection(stream: TcpStream, service: ClipboardService) -> Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    loop {
        let request = match http::read_request(&mut reader).await {
            Ok(Some(request)) => request,
            Ok(None) => break, // clean end of stream
            Err(e) => {
                // Best-effort 400, then drop the connection
                let response = Response::message(Status::BadRequest, "malformed request");
                let _ = response.write_to(&mut write_half, true).await;
                return Err(e);
            }
        };

        let keep_alive = request.keep_alive;
        let response = service.handle(&request);
        response.write_to(&mut write_half, !keep_alive).await?;

        if !keep_alive {
            break;
        }
    }

    Ok(())
}
