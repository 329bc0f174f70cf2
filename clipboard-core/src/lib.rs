//! # Clipboard Core
//!
//! An ephemeral in-memory key-value store used as a shared clipboard.
//!
//! Every entry expires a fixed duration (the store-wide TTL) after it was
//! recorded. Reading an entry never extends its life; overwriting it resets
//! its age to zero.
//!
//! ## Features
//!
//! - Thread-safe storage using `DashMap` (sharded concurrent access)
//! - Expiration checked at the moment of read (lazy removal)
//! - Background sweep task reclaiming expired entries independent of reads
//! - All data stored as strings
//!
//! ## Example
//!
//! ```rust,no_run
//! use clipboard_core::{Store, StoreConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     // Create store with default config (24h TTL, hourly sweep)
//!     let store = Store::new();
//!
//!     // Or with a custom TTL and sweep interval
//!     let config = StoreConfig::default()
//!         .with_ttl(Duration::from_secs(600))
//!         .with_sweep_interval(Duration::from_secs(30));
//!     let store = Store::with_config(config);
//!
//!     store.set("note1", "hello");
//!
//!     if let Some(value) = store.get("note1") {
//!         println!("Clip: {}", value);
//!     }
//! }
//! ```

mod config;
mod entry;
mod store;

pub use config::StoreConfig;
pub use entry::Entry;
pub use store::Store;
