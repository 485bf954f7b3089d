//! Trait definition for the EUR wallet API.
//!
//! [`EurowalletApi`] abstracts the six EUR wallet operations so callers can
//! swap in mock implementations for testing.

use std::future::Future;

use crate::auth::Params;
use crate::error::GlobitexError;
use crate::rest::types::ApiResponse;

/// Trait defining the EUR wallet REST operations.
pub trait EurowalletApi: Send + Sync {
    /// Get the account status.
    fn get_account_status(&self) -> impl Future<Output = Result<ApiResponse, GlobitexError>> + Send;

    /// Get deposit details.
    fn get_deposit_details(
        &self,
    ) -> impl Future<Output = Result<ApiResponse, GlobitexError>> + Send;

    /// Get the payment history.
    fn get_payment_history(
        &self,
    ) -> impl Future<Output = Result<ApiResponse, GlobitexError>> + Send;

    /// Get the commission for a prospective payment.
    fn get_payment_commission(
        &self,
        params: &Params,
    ) -> impl Future<Output = Result<ApiResponse, GlobitexError>> + Send;

    /// Get the status of a payment.
    fn get_payment_status(
        &self,
        params: &Params,
    ) -> impl Future<Output = Result<ApiResponse, GlobitexError>> + Send;

    /// Create a new payment.
    fn create_payment(
        &self,
        params: &Params,
    ) -> impl Future<Output = Result<ApiResponse, GlobitexError>> + Send;
}
