//! EUR wallet endpoint operations.

use crate::auth::Params;
use crate::error::GlobitexError;
use crate::rest::EurowalletClient;
use crate::rest::endpoints::eurowallet;
use crate::rest::types::{ApiResponse, NewPayment, PaymentReceipt, PaymentStatusRequest};

impl EurowalletClient {
    /// Get account status.
    pub async fn get_account_status(&self) -> Result<ApiResponse, GlobitexError> {
        self.signed_get(eurowallet::STATUS, &Params::new()).await
    }

    /// Get deposit details.
    pub async fn get_deposit_details(&self) -> Result<ApiResponse, GlobitexError> {
        self.signed_get(eurowallet::DEPOSIT_DETAILS, &Params::new()).await
    }

    /// Get payment history.
    pub async fn get_payment_history(&self) -> Result<ApiResponse, GlobitexError> {
        self.signed_get(eurowallet::PAYMENT_HISTORY, &Params::new()).await
    }

    /// Get the commission amount for a prospective payment.
    pub async fn get_payment_commission(
        &self,
        params: &Params,
    ) -> Result<ApiResponse, GlobitexError> {
        self.signed_get(eurowallet::PAYMENT_COMMISSION, params).await
    }

    /// Get the status of a payment.
    pub async fn get_payment_status(&self, params: &Params) -> Result<ApiResponse, GlobitexError> {
        self.signed_get(eurowallet::PAYMENT_STATUS, params).await
    }

    /// Get the status of a payment by its id.
    pub async fn get_payment_status_for(
        &self,
        request: &PaymentStatusRequest,
    ) -> Result<ApiResponse, GlobitexError> {
        self.get_payment_status(&request.to_params()).await
    }

    /// Create a new payment from raw parameters.
    ///
    /// A `transactionSignature` parameter is computed and appended; any
    /// `transactionSignature` already in `params` is replaced.
    pub async fn create_payment(&self, params: &Params) -> Result<ApiResponse, GlobitexError> {
        self.signed_post(eurowallet::PAYMENTS, params).await
    }

    /// Create a new payment and decode the receipt.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use globitex_api_client::config::Config;
    /// use globitex_api_client::rest::{EurowalletClient, NewPayment};
    /// use rust_decimal::Decimal;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = EurowalletClient::new(Config::from_env()?)?;
    ///     let payment = NewPayment::new(
    ///         "EUR-ACCOUNT",
    ///         Decimal::new(1000, 2),
    ///         "Some beneficiary name",
    ///         "LV00HABA0000000000000",
    ///         "Some reference text",
    ///     );
    ///     let receipt = client.create_new_payment(&payment).await?;
    ///     println!("{}: {}", receipt.payment_id, receipt.status);
    ///     Ok(())
    /// }
    /// ```
    pub async fn create_new_payment(
        &self,
        payment: &NewPayment,
    ) -> Result<PaymentReceipt, GlobitexError> {
        let params = payment.to_params(self.next_nonce());
        self.create_payment(&params).await?.json()
    }
}
