//! HMAC-SHA512 signatures for Globitex API authentication.
//!
//! Two independent signatures are used:
//! ```text
//! X-Signature:          HMAC-SHA512(apiKey + "&" + nonce + path [+ "?" + params], messageSecret)
//! transactionSignature: HMAC-SHA512(params without transactionSignature, transactionSecret)
//! ```
//!
//! `params` is the unescaped canonical string from [`stringify`]. Both
//! digests are lowercase hex.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;

use crate::auth::params::{Params, stringify};

type HmacSha512 = Hmac<Sha512>;

/// Name of the body parameter carrying the transaction signature.
pub const TRANSACTION_SIGNATURE_PARAM: &str = "transactionSignature";

/// Compute the `X-Signature` header value for a request.
///
/// `path` must be the API path without any deployment URL prefix.
///
/// # Example
///
/// ```rust
/// use globitex_api_client::auth::{Params, header_signature};
///
/// let signature = header_signature(
///     "api_key",
///     "message_secret",
///     "/api/1/eurowallet/status",
///     "1700000000000",
///     &Params::new(),
/// );
/// assert_eq!(signature.len(), 128);
/// ```
pub fn header_signature(
    api_key: &str,
    message_secret: &str,
    path: &str,
    nonce: &str,
    params: &Params,
) -> String {
    let mut message = format!("{api_key}&{nonce}{path}");
    if !params.is_empty() {
        message.push('?');
        message.push_str(&stringify(params, false));
    }
    tracing::debug!(%message, "computing header signature");
    hmac_sha512_hex(message_secret, &message)
}

/// Compute the `transactionSignature` parameter for a state-changing request.
///
/// Any `transactionSignature` already present in `params` is ignored, so the
/// result is the same whether it is computed before the parameter is appended
/// (outbound) or over the received set (inbound).
pub fn transaction_signature(transaction_secret: &str, params: &Params) -> String {
    let message = stringify(&params.without(TRANSACTION_SIGNATURE_PARAM), false);
    hmac_sha512_hex(transaction_secret, &message)
}

/// Compare a supplied signature against an expected one in constant time.
pub fn signatures_match(supplied: &str, expected: &str) -> bool {
    supplied.as_bytes().ct_eq(expected.as_bytes()).into()
}

fn hmac_sha512_hex(secret: &str, message: &str) -> String {
    let mut mac =
        HmacSha512::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS_PATH: &str = "/api/1/eurowallet/status";
    const NONCE: &str = "1700000000000";

    #[test]
    fn test_transaction_signature_vector() {
        let params = Params::new().with("a", "1").with("b", "2");
        assert_eq!(
            transaction_signature("s", &params),
            "416685f8021827fdf41f84fe5627b575ee5d03453c60670f3e16a5c3292cdfc2\
             4658f2be374da3ceebcf9218d028362836ff27df4ba03de149e8b4fb83c566b1"
        );
    }

    #[test]
    fn test_header_signature_vector_without_params() {
        assert_eq!(
            header_signature("key", "msecret", STATUS_PATH, NONCE, &Params::new()),
            "07fed630b88a24f88cda6c050d528c366a7d1912f30aa67ebddc49014018aaf9\
             8ccc7285fa74795aa98af2772657b0b8904797f9dd7b1ce329d938825f53c8e4"
        );
    }

    #[test]
    fn test_header_signature_vector_with_params() {
        let params = Params::new().with("clientPaymentId", "P-1");
        assert_eq!(
            header_signature(
                "key",
                "msecret",
                "/api/1/eurowallet/payments/status",
                NONCE,
                &params
            ),
            "bc97450dfc550cc788075803f903bcf84441c2a1e702e47e972282865595fcb4\
             cd209d504fd2e345cbee2b84d2ffdfb40a7f3de5d55cd5e5ab7b19d9b6d8bf54"
        );
    }

    #[test]
    fn test_header_signature_consistency() {
        let params = Params::new().with("a", "1");
        let sig1 = header_signature("key", "secret", STATUS_PATH, NONCE, &params);
        let sig2 = header_signature("key", "secret", STATUS_PATH, NONCE, &params);
        assert_eq!(sig1, sig2);
        assert_eq!(sig1, sig1.to_lowercase());
    }

    #[test]
    fn test_header_signature_changes_with_each_input() {
        let params = Params::new().with("a", "1").with("b", "2");
        let base = header_signature("key", "secret", STATUS_PATH, NONCE, &params);

        let variants = [
            header_signature("key2", "secret", STATUS_PATH, NONCE, &params),
            header_signature("key", "secret2", STATUS_PATH, NONCE, &params),
            header_signature("key", "secret", "/api/1/eurowallet/payments", NONCE, &params),
            header_signature("key", "secret", STATUS_PATH, "1700000000001", &params),
            header_signature(
                "key",
                "secret",
                STATUS_PATH,
                NONCE,
                &Params::new().with("b", "2").with("a", "1"),
            ),
            header_signature(
                "key",
                "secret",
                STATUS_PATH,
                NONCE,
                &Params::new().with("a", "1").with("b", "3"),
            ),
            header_signature("key", "secret", STATUS_PATH, NONCE, &Params::new()),
        ];

        for variant in variants {
            assert_ne!(variant, base);
        }
    }

    #[test]
    fn test_transaction_signature_ignores_existing_signature_param() {
        let clean = Params::new().with("a", "1").with("b", "2");
        let signed = clean.clone().with(TRANSACTION_SIGNATURE_PARAM, "stale");
        assert_eq!(
            transaction_signature("s", &clean),
            transaction_signature("s", &signed)
        );
    }

    #[test]
    fn test_signatures_match() {
        assert!(signatures_match("abc", "abc"));
        assert!(!signatures_match("abc", "abd"));
        assert!(!signatures_match("abc", "abcd"));
        assert!(!signatures_match("", "abc"));
    }
}
