//! # Globitex API Client
//!
//! An async Rust client and request-validation middleware for the Globitex
//! EUR wallet API.
//!
//! ## Features
//!
//! - Signed REST calls for account status, deposits, payment history and payments
//! - HMAC-SHA512 header and transaction signatures over ordered parameters
//! - Tower middleware that validates the same signatures on the server side
//! - Explicit configuration from environment variables
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use globitex_api_client::config::Config;
//! use globitex_api_client::rest::EurowalletClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EurowalletClient::new(Config::from_env()?)?;
//!     let status = client.get_account_status().await?;
//!     println!("Account status: {}", status.body);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod rest;
pub mod server;

// Re-export commonly used types at crate root
pub use auth::{Credentials, Param, Params};
pub use config::Config;
pub use error::GlobitexError;

/// Result type alias using GlobitexError
pub type Result<T> = std::result::Result<T, GlobitexError>;
