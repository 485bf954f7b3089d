//! Globitex REST API endpoint constants.

/// Base URL for the Globitex REST API.
pub const GLOBITEX_BASE_URL: &str = "https://api.globitex.com";

/// EUR wallet endpoints (all signed).
pub mod eurowallet {
    /// Get account status.
    pub const STATUS: &str = "/api/1/eurowallet/status";
    /// Get deposit details.
    pub const DEPOSIT_DETAILS: &str = "/api/1/eurowallet/deposit-details";
    /// Get payment history.
    pub const PAYMENT_HISTORY: &str = "/api/1/eurowallet/payments/history";
    /// Get payment commission amount.
    pub const PAYMENT_COMMISSION: &str = "/api/1/eurowallet/payments/commission";
    /// Get payment status.
    pub const PAYMENT_STATUS: &str = "/api/1/eurowallet/payments/status";
    /// Create a new payment (POST).
    pub const PAYMENTS: &str = "/api/1/eurowallet/payments";

    /// Every EUR wallet path, in the order listed above.
    pub const ALL: [&str; 6] = [
        STATUS,
        DEPOSIT_DETAILS,
        PAYMENT_HISTORY,
        PAYMENT_COMMISSION,
        PAYMENT_STATUS,
        PAYMENTS,
    ];
}

// Header names are kept in canonical lowercase form.

/// Header carrying the API key (`X-API-Key`).
pub const API_KEY_HEADER: &str = "x-api-key";
/// Header carrying the request nonce (`X-Nonce`).
pub const NONCE_HEADER: &str = "x-nonce";
/// Header carrying the header signature (`X-Signature`).
pub const SIGNATURE_HEADER: &str = "x-signature";
