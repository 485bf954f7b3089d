//! Inbound request validation.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. `X-Signature` present
//! 2. `X-API-Key` present
//! 3. `X-Nonce` present
//! 4. `X-API-Key` matches the configured key
//! 5. `X-Nonce` is an integer
//! 6. query string (GET) or body (POST) parses into parameters
//! 7. recomputed header signature matches `X-Signature`
//! 8. POST only: `transactionSignature` present and matching
//!
//! The nonce is not tracked, so a captured request can be replayed verbatim.

use std::collections::HashSet;

use http::{HeaderMap, Method};

use crate::auth::{
    Credentials, Params, TRANSACTION_SIGNATURE_PARAM, header_signature, parse_params,
    signatures_match, transaction_signature,
};
use crate::config::Config;
use crate::rest::{API_KEY_HEADER, NONCE_HEADER, SIGNATURE_HEADER, eurowallet};
use crate::server::Rejection;

/// Stateless validator for signed Globitex requests.
#[derive(Debug, Clone)]
pub struct Validator {
    credentials: Credentials,
    routes: HashSet<String>,
    url_prefix: String,
}

impl Validator {
    /// Create a validator protecting the EUR wallet routes.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            routes: eurowallet::ALL.iter().map(|r| r.to_string()).collect(),
            url_prefix: String::new(),
        }
    }

    /// Create a validator from the shared configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.credentials.clone()).with_url_prefix(config.url_prefix.as_str())
    }

    /// Replace the set of protected routes.
    pub fn with_routes<I, S>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.routes = routes.into_iter().map(Into::into).collect();
        self
    }

    /// Strip `prefix` from request paths before route matching and signing.
    pub fn with_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = prefix.into();
        self
    }

    /// The request path with the URL prefix removed.
    pub fn api_path<'a>(&self, path: &'a str) -> &'a str {
        if self.url_prefix.is_empty() {
            return path;
        }
        match path.strip_prefix(self.url_prefix.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => path,
        }
    }

    /// Whether requests to `path` must be validated.
    pub fn is_protected(&self, path: &str) -> bool {
        self.routes.contains(self.api_path(path))
    }

    /// Validate one request.
    ///
    /// `query` is the raw query string and `body` the raw request body; POST
    /// requests take their parameters from the body, everything else from the
    /// query string.
    pub fn validate(
        &self,
        method: &Method,
        path: &str,
        query: Option<&str>,
        headers: &HeaderMap,
        body: &[u8],
    ) -> Result<(), Rejection> {
        let result = self.check(method, path, query, headers, body);
        if let Err(rejection) = result {
            tracing::warn!(
                %method,
                %path,
                code = rejection.code(),
                status = rejection.status().as_u16(),
                %rejection,
                "rejecting signed request"
            );
        }
        result
    }

    fn check(
        &self,
        method: &Method,
        path: &str,
        query: Option<&str>,
        headers: &HeaderMap,
        body: &[u8],
    ) -> Result<(), Rejection> {
        let signature = header(headers, SIGNATURE_HEADER).ok_or(Rejection::MissingSignature)?;
        let api_key = header(headers, API_KEY_HEADER).ok_or(Rejection::MissingApiKey)?;
        let nonce = header(headers, NONCE_HEADER).ok_or(Rejection::MissingNonce)?;

        if api_key != self.credentials.api_key {
            return Err(Rejection::InvalidApiKey);
        }
        if nonce.parse::<i64>().is_err() {
            return Err(Rejection::InvalidNonce);
        }

        let is_write = *method == Method::POST;
        let params = request_params(is_write, query, body)?;

        let expected = header_signature(
            &self.credentials.api_key,
            self.credentials.expose_message_secret(),
            self.api_path(path),
            nonce,
            &params,
        );
        if !signatures_match(signature, &expected) {
            return Err(Rejection::WrongSignature);
        }

        if is_write {
            let supplied = params
                .get(TRANSACTION_SIGNATURE_PARAM)
                .ok_or(Rejection::MissingTransactionSignature)?;
            let expected =
                transaction_signature(self.credentials.expose_transaction_secret(), &params);
            if !signatures_match(supplied, &expected) {
                return Err(Rejection::InvalidTransactionSignature);
            }
        }

        Ok(())
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

fn request_params(is_write: bool, query: Option<&str>, body: &[u8]) -> Result<Params, Rejection> {
    let raw = if is_write {
        std::str::from_utf8(body).map_err(|error| {
            tracing::debug!(%error, "request body is not UTF-8");
            Rejection::MalformedParameters
        })?
    } else {
        query.unwrap_or_default()
    };

    parse_params(raw).map_err(|error| {
        tracing::debug!(%error, "failed to parse request parameters");
        Rejection::MalformedParameters
    })
}
