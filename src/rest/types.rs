//! Request and response types for the EUR wallet endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::auth::Params;
use crate::error::GlobitexError;

/// A successful (2xx) API response.
///
/// The body is kept raw; use [`ApiResponse::json`] to decode it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl ApiResponse {
    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, GlobitexError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Request to create a new EUR payment.
///
/// Parameters are signed in a fixed order: `requestTime`, `account`,
/// `amount`, `beneficiaryName`, `beneficiaryAccount`, `beneficiaryReference`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    /// Request time in milliseconds; the client fills in a fresh nonce when unset
    pub request_time: Option<u64>,
    /// Source account
    pub account: String,
    /// Amount in EUR
    pub amount: Decimal,
    /// Beneficiary name
    pub beneficiary_name: String,
    /// Beneficiary account (IBAN)
    pub beneficiary_account: String,
    /// Free-text payment reference
    pub beneficiary_reference: String,
}

impl NewPayment {
    /// Create a new payment request.
    pub fn new(
        account: impl Into<String>,
        amount: Decimal,
        beneficiary_name: impl Into<String>,
        beneficiary_account: impl Into<String>,
        beneficiary_reference: impl Into<String>,
    ) -> Self {
        Self {
            request_time: None,
            account: account.into(),
            amount,
            beneficiary_name: beneficiary_name.into(),
            beneficiary_account: beneficiary_account.into(),
            beneficiary_reference: beneficiary_reference.into(),
        }
    }

    /// Set an explicit request time.
    pub fn request_time(mut self, millis: u64) -> Self {
        self.request_time = Some(millis);
        self
    }

    /// Render as ordered parameters, using `default_request_time` if no
    /// request time was set.
    pub fn to_params(&self, default_request_time: u64) -> Params {
        Params::new()
            .with(
                "requestTime",
                self.request_time.unwrap_or(default_request_time).to_string(),
            )
            .with("account", self.account.as_str())
            .with("amount", self.amount.to_string())
            .with("beneficiaryName", self.beneficiary_name.as_str())
            .with("beneficiaryAccount", self.beneficiary_account.as_str())
            .with("beneficiaryReference", self.beneficiary_reference.as_str())
    }
}

/// Request for the status of a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentStatusRequest {
    /// Payment id returned by payment creation
    pub client_payment_id: String,
}

impl PaymentStatusRequest {
    /// Create a new status request.
    pub fn new(client_payment_id: impl Into<String>) -> Self {
        Self {
            client_payment_id: client_payment_id.into(),
        }
    }

    /// Render as ordered parameters.
    pub fn to_params(&self) -> Params {
        Params::new().with("clientPaymentId", self.client_payment_id.as_str())
    }
}

/// Response to payment creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    /// Payment id, used for later status queries
    pub payment_id: String,
    /// Payment status
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::stringify;

    #[test]
    fn test_new_payment_param_order() {
        let payment = NewPayment::new(
            "EUR-1",
            Decimal::new(1050, 2),
            "Some beneficiary name",
            "LV00HABA0000000000000",
            "Some reference text",
        );
        assert_eq!(
            stringify(&payment.to_params(1700000000000), false),
            "requestTime=1700000000000&account=EUR-1&amount=10.50\
             &beneficiaryName=Some beneficiary name&beneficiaryAccount=LV00HABA0000000000000\
             &beneficiaryReference=Some reference text"
        );
    }

    #[test]
    fn test_explicit_request_time_wins() {
        let payment = NewPayment::new("A", Decimal::ONE, "N", "B", "R").request_time(42);
        assert_eq!(payment.to_params(1).get("requestTime"), Some("42"));
    }

    #[test]
    fn test_payment_receipt_decoding() {
        let response = ApiResponse {
            status: 200,
            body: r#"{"paymentId":"P-77","status":"PENDING"}"#.to_string(),
        };
        let receipt: PaymentReceipt = response.json().unwrap();
        assert_eq!(receipt.payment_id, "P-77");
        assert_eq!(receipt.status, "PENDING");
    }

    #[test]
    fn test_json_error_on_bad_body() {
        let response = ApiResponse {
            status: 200,
            body: "not json".to_string(),
        };
        assert!(matches!(
            response.json::<PaymentReceipt>(),
            Err(GlobitexError::Json(_))
        ));
    }
}
