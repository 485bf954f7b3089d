//! Credential management for Globitex API authentication.

use secrecy::{ExposeSecret, SecretString};

/// API credentials: the public key and the two signing secrets.
///
/// The message secret signs the `X-Signature` header, the transaction secret
/// signs the body of state-changing requests.
#[derive(Clone)]
pub struct Credentials {
    /// The API key (public identifier)
    pub api_key: String,
    message_secret: SecretString,
    transaction_secret: SecretString,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(
        api_key: impl Into<String>,
        message_secret: impl Into<String>,
        transaction_secret: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            message_secret: SecretString::from(message_secret.into()),
            transaction_secret: SecretString::from(transaction_secret.into()),
        }
    }

    /// Get the secret used for header signatures.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_message_secret(&self) -> &str {
        self.message_secret.expose_secret()
    }

    /// Get the secret used for transaction signatures.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_transaction_secret(&self) -> &str {
        self.transaction_secret.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("message_secret", &"[REDACTED]")
            .field("transaction_secret", &"[REDACTED]")
            .finish()
    }
}
