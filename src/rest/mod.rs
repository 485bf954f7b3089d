//! Globitex EUR wallet REST API client.
//!
//! Every request is signed with an `X-Signature` header; payment creation
//! additionally carries a `transactionSignature` body parameter.

mod client;
mod endpoints;
mod operations;
mod traits;
mod types;

pub use client::{EurowalletClient, EurowalletClientBuilder};
pub use endpoints::*;
pub use traits::EurowalletApi;
pub use types::{ApiResponse, NewPayment, PaymentReceipt, PaymentStatusRequest};
