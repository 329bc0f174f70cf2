//! Round-trip tests through the high-level client binding.

use std::net::SocketAddr;
use std::time::Duration;

use clipboard_client::{ClipboardClient, ClipboardClientOptions, Error};
use clipboard_core::{Store, StoreConfig};
use clipboard_server::serve;
use tokio::net::TcpListener;

async fn spawn_server(config: StoreConfig) -> SocketAddr {
    let store = Store::with_config(config);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = serve(listener, store).await;
    });

    addr
}

fn client_for(addr: SocketAddr) -> ClipboardClient {
    let options = ClipboardClientOptions::new(format!("http://{}", addr))
        .with_timeout(Duration::from_secs(5));
    ClipboardClient::with_options(options).unwrap()
}

fn test_config() -> StoreConfig {
    StoreConfig::default()
        .with_ttl(Duration::from_secs(60))
        .with_sweep_interval(Duration::from_secs(3600))
}

#[tokio::test(flavor = "multi_thread")]
async fn test_set_then_get() {
    let addr = spawn_server(test_config()).await;
    let client = client_for(addr);

    client.set("note1", "hello").await.unwrap();
    assert_eq!(client.get("note1").await.unwrap(), Some("hello".to_string()));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_unknown_id_is_none() {
    let addr = spawn_server(test_config()).await;
    let client = client_for(addr);

    assert_eq!(client.get("missing").await.unwrap(), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_set_with_empty_value_is_rejected() {
    let addr = spawn_server(test_config()).await;
    let client = client_for(addr);

    let err = client.set("note1", "").await.unwrap_err();
    assert!(err.is_invalid_request(), "unexpected error: {err}");
    match err {
        Error::InvalidRequest(message) => assert_eq!(message, "Sorry something went wrong"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_value_with_spaces_and_symbols() {
    let addr = spawn_server(test_config()).await;
    let client = client_for(addr);

    let value = "hello world & more: 100%";
    client.set("note1", value).await.unwrap();
    assert_eq!(client.get("note1").await.unwrap(), Some(value.to_string()));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_expired_clip_reads_as_none() {
    let config = test_config().with_ttl(Duration::from_millis(500));
    let addr = spawn_server(config).await;
    let client = client_for(addr);

    client.set("note1", "hello").await.unwrap();
    assert!(client.get("note1").await.unwrap().is_some());

    tokio::time::sleep(Duration::from_millis(700)).await;

    assert_eq!(client.get("note1").await.unwrap(), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_overwrite_wins() {
    let addr = spawn_server(test_config()).await;
    let client = client_for(addr);

    client.set("note1", "v1").await.unwrap();
    client.set("note1", "v2").await.unwrap();
    assert_eq!(client.get("note1").await.unwrap(), Some("v2".to_string()));
}
