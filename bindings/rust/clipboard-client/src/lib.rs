//! # Clipboard Client
//!
//! A high-level Rust client for the clipboard HTTP API.
//!
//! This crate wraps the two endpoints (`POST /?id&value`, `GET /?id`) in a
//! typed async API and maps the server's JSON envelopes onto Rust results.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clipboard_client::ClipboardClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), clipboard_client::Error> {
//!     let client = ClipboardClient::new("http://localhost:8080")?;
//!
//!     // Record a clip
//!     client.set("note1", "hello").await?;
//!
//!     // Read it back; None means never set or expired
//!     if let Some(value) = client.get("note1").await? {
//!         println!("Got: {}", value);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod error;
mod options;

pub use error::Error;
pub use options::ClipboardClientOptions;

use serde::Deserialize;

#[derive(Deserialize)]
struct ClipResponse {
    value: String,
}

#[derive(Deserialize)]
struct MessageResponse {
    message: String,
}

/// A client for one clipboard server.
///
/// Cheap to clone; the underlying `reqwest::Client` pools connections.
#[derive(Clone)]
pub struct ClipboardClient {
    http: reqwest::Client,
    base_url: String,
}

impl ClipboardClient {
    /// Create a client for the server at the given URL.
    pub fn new(url: impl Into<String>) -> Result<Self, Error> {
        Self::with_options(ClipboardClientOptions::new(url))
    }

    /// Create a client with custom options.
    ///
    /// # Example
    /// ```rust,no_run
    /// # use clipboard_client::{ClipboardClient, ClipboardClientOptions};
    /// # use std::time::Duration;
    /// # fn example() -> Result<(), clipboard_client::Error> {
    /// let options = ClipboardClientOptions::new("http://localhost:8080")
    ///     .with_timeout(Duration::from_secs(5));
    /// let client = ClipboardClient::with_options(options)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_options(options: ClipboardClientOptions) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: options.url.trim_end_matches('/').to_string(),
        })
    }

    /// Record a clip under the given identifier.
    ///
    /// Overwrites any previous clip for the same identifier and resets its
    /// expiration clock.
    pub async fn set(&self, id: &str, value: &str) -> Result<(), Error> {
        let response = self
            .http
            .post(format!("{}/", self.base_url))
            .query(&[("id", id), ("value", value)])
            .send()
            .await?;

        match response.status().as_u16() {
            200 => Ok(()),
            400 => Err(Error::InvalidRequest(extract_message(response).await)),
            status => Err(Error::UnexpectedStatus {
                status,
                message: extract_message(response).await,
            }),
        }
    }

    /// Read a clip by identifier.
    ///
    /// Returns `None` when the identifier was never set or its clip has
    /// expired (the server does not distinguish the two).
    pub async fn get(&self, id: &str) -> Result<Option<String>, Error> {
        let response = self
            .http
            .get(format!("{}/", self.base_url))
            .query(&[("id", id)])
            .send()
            .await?;

        match response.status().as_u16() {
            200 => {
                let clip: ClipResponse = response.json().await?;
                Ok(Some(clip.value))
            }
            404 => Ok(None),
            400 => Err(Error::InvalidRequest(extract_message(response).await)),
            status => Err(Error::UnexpectedStatus {
                status,
                message: extract_message(response).await,
            }),
        }
    }
}

/// Pulls the `message` field out of an error envelope, best effort.
async fn extract_message(response: reqwest::Response) -> String {
    match response.json::<MessageResponse>().await {
        Ok(body) => body.message,
        Err(_) => String::new(),
    }
}
