//! Client configuration options.

use std::time::Duration;

/// Options for configuring the clipboard client.
///
/// # Example
///
/// ```rust
/// use clipboard_client::ClipboardClientOptions;
/// use std::time::Duration;
///
/// let options = ClipboardClientOptions::new("http://localhost:8080")
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Clone, Debug)]
pub struct ClipboardClientOptions {
    /// The server URL (e.g., "http://localhost:8080")
    pub url: String,

    /// Optional per-request timeout
    pub timeout: Option<Duration>,
}

impl ClipboardClientOptions {
    /// Create new options with the given server URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
        }
    }

    /// Set a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Create options from environment variables.
    ///
    /// Reads `CLIPBOARD_SERVER_URL` (defaults to "http://127.0.0.1:8080").
    pub fn from_env() -> Self {
        let url = std::env::var("CLIPBOARD_SERVER_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());

        Self { url, timeout: None }
    }
}

impl Default for ClipboardClientOptions {
    fn default() -> Self {
        Self::new("http://127.0.0.1:8080")
    }
}
