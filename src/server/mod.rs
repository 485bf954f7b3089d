//! Server-side validation of signed Globitex requests.
//!
//! [`Validator`] recomputes the header and transaction signatures of an
//! inbound request with the same canonicalization the client uses.
//! [`ValidationLayer`] applies it as tower middleware in front of a handler.
//!
//! ```rust,no_run
//! use globitex_api_client::auth::Credentials;
//! use globitex_api_client::server::{ValidationLayer, Validator};
//!
//! let credentials = Credentials::new("api_key", "message_secret", "transaction_secret");
//! let layer = ValidationLayer::new(Validator::new(credentials));
//! # let _ = layer;
//! ```

mod layer;
mod rejection;
mod validator;

pub use layer::{ValidatedBody, ValidationBody, ValidationLayer, ValidationService};
pub use rejection::Rejection;
pub use validator::Validator;
