//! Example: Serve a handler behind the signature validation middleware.
//!
//! Reads `GLOBITEX_CLIENT_*` configuration for the expected credentials.
//!
//! Run with: cargo run --example validating_server

use std::convert::Infallible;
use std::net::SocketAddr;

use bytes::Bytes;
use globitex_api_client::config::Config;
use globitex_api_client::server::{ValidatedBody, ValidationLayer, Validator};
use http::{Request, Response};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing_subscriber::EnvFilter;

async fn handle(
    req: Request<ValidatedBody<Incoming>>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    tracing::info!(method = %req.method(), path = %req.uri().path(), "accepted request");
    Ok(Response::new(Full::new(Bytes::from_static(
        br#"{"status":"ok"}"#,
    ))))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env_with_prefix("GLOBITEX_CLIENT")?;
    let layer = ValidationLayer::new(Validator::from_config(&config));

    let addr = SocketAddr::from(([127, 0, 0, 1], 8080));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    loop {
        let (stream, peer) = listener.accept().await?;
        let service = ServiceBuilder::new()
            .layer(layer.clone())
            .service_fn(handle);
        let service = TowerToHyperService::new(service);

        tokio::spawn(async move {
            if let Err(error) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                tracing::warn!(%peer, %error, "connection error");
            }
        });
    }
}
