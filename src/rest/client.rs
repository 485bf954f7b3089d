//! Globitex EUR wallet REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::auth::{
    Credentials, MillisecondNonce, NonceProvider, Params, TRANSACTION_SIGNATURE_PARAM,
    header_signature, stringify, transaction_signature,
};
use crate::config::{Config, DEFAULT_TIMEOUT_MS};
use crate::error::GlobitexError;
use crate::rest::endpoints::{API_KEY_HEADER, GLOBITEX_BASE_URL, NONCE_HEADER, SIGNATURE_HEADER};
use crate::rest::traits::EurowalletApi;
use crate::rest::types::ApiResponse;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// The Globitex EUR wallet REST API client.
///
/// Every call signs one request, sends it, and waits for the full response.
/// There are no retries; non-2xx answers come back as
/// [`GlobitexError::Status`] with the raw body.
///
/// # Example
///
/// ```rust,no_run
/// use globitex_api_client::rest::EurowalletClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = EurowalletClient::from_env()?;
///     let status = client.get_account_status().await?;
///     println!("Account status: {}", status.body);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct EurowalletClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    url_prefix: String,
    credentials: Credentials,
    nonce_provider: Arc<dyn NonceProvider>,
}

impl EurowalletClient {
    /// Create a client from a [`Config`].
    pub fn new(config: Config) -> Result<Self, GlobitexError> {
        Self::builder(config.credentials)
            .base_url(config.host)
            .timeout(config.timeout)
            .url_prefix(config.url_prefix)
            .build()
    }

    /// Create a client from `GLOBITEX_*` environment variables.
    pub fn from_env() -> Result<Self, GlobitexError> {
        Self::new(Config::from_env()?)
    }

    /// Create a client from `{prefix}_*` environment variables.
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self, GlobitexError> {
        Self::new(Config::from_env_with_prefix(prefix)?)
    }

    /// Create a new client builder.
    pub fn builder(credentials: Credentials) -> EurowalletClientBuilder {
        EurowalletClientBuilder::new(credentials)
    }

    /// Next nonce from the client's provider.
    pub fn next_nonce(&self) -> u64 {
        self.nonce_provider.next_nonce()
    }

    /// Make a signed GET request with the parameters in the query string.
    pub(crate) async fn signed_get(
        &self,
        path: &str,
        params: &Params,
    ) -> Result<ApiResponse, GlobitexError> {
        let nonce = self.next_nonce().to_string();
        let signature = self.sign(path, &nonce, params);

        let mut url = self.url_for(path);
        let query = stringify(params, true);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        tracing::debug!(method = "GET", %path, %nonce, "sending signed request");
        let response = self
            .http_client
            .get(&url)
            .header(API_KEY_HEADER, &self.credentials.api_key)
            .header(NONCE_HEADER, &nonce)
            .header(SIGNATURE_HEADER, signature)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .send()
            .await?;

        Self::into_api_response(response).await
    }

    /// Make a signed POST request carrying a transaction signature.
    ///
    /// The transaction signature is computed over `params` without any
    /// `transactionSignature` entry and then appended; the header signature
    /// covers the final body parameters including it.
    pub(crate) async fn signed_post(
        &self,
        path: &str,
        params: &Params,
    ) -> Result<ApiResponse, GlobitexError> {
        let mut params = params.without(TRANSACTION_SIGNATURE_PARAM);
        let tx_signature =
            transaction_signature(self.credentials.expose_transaction_secret(), &params);
        params.push(TRANSACTION_SIGNATURE_PARAM, tx_signature);

        let nonce = self.next_nonce().to_string();
        let signature = self.sign(path, &nonce, &params);
        let body = stringify(&params, true);

        tracing::debug!(method = "POST", %path, %nonce, "sending signed request");
        let response = self
            .http_client
            .post(self.url_for(path))
            .header(API_KEY_HEADER, &self.credentials.api_key)
            .header(NONCE_HEADER, &nonce)
            .header(SIGNATURE_HEADER, signature)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        Self::into_api_response(response).await
    }

    fn sign(&self, path: &str, nonce: &str, params: &Params) -> String {
        header_signature(
            &self.credentials.api_key,
            self.credentials.expose_message_secret(),
            path,
            nonce,
            params,
        )
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.url_prefix, path)
    }

    async fn into_api_response(response: reqwest::Response) -> Result<ApiResponse, GlobitexError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), %body, "request failed");
            return Err(GlobitexError::from_status(status.as_u16(), body));
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}

impl std::fmt::Debug for EurowalletClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EurowalletClient")
            .field("base_url", &self.base_url)
            .field("url_prefix", &self.url_prefix)
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Builder for [`EurowalletClient`].
pub struct EurowalletClientBuilder {
    base_url: String,
    url_prefix: String,
    credentials: Credentials,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    user_agent: Option<String>,
    timeout: Duration,
}

impl EurowalletClientBuilder {
    /// Create a new builder with default settings.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: GLOBITEX_BASE_URL.to_string(),
            url_prefix: String::new(),
            credentials,
            nonce_provider: None,
            user_agent: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set a path prefix that is added to request URLs but not signed.
    pub fn url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = prefix.into();
        self
    }

    /// Set a custom nonce provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the connect and overall request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<EurowalletClient, GlobitexError> {
        url::Url::parse(&self.base_url)?;

        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("globitex-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("globitex-api-client"));
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .build()?;

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(MillisecondNonce::new()));

        Ok(EurowalletClient {
            http_client: client,
            base_url: self.base_url,
            url_prefix: self.url_prefix,
            credentials: self.credentials,
            nonce_provider,
        })
    }
}

// EurowalletApi trait implementation.

impl EurowalletApi for EurowalletClient {
    async fn get_account_status(&self) -> Result<ApiResponse, GlobitexError> {
        EurowalletClient::get_account_status(self).await
    }

    async fn get_deposit_details(&self) -> Result<ApiResponse, GlobitexError> {
        EurowalletClient::get_deposit_details(self).await
    }

    async fn get_payment_history(&self) -> Result<ApiResponse, GlobitexError> {
        EurowalletClient::get_payment_history(self).await
    }

    async fn get_payment_commission(&self, params: &Params) -> Result<ApiResponse, GlobitexError> {
        EurowalletClient::get_payment_commission(self, params).await
    }

    async fn get_payment_status(&self, params: &Params) -> Result<ApiResponse, GlobitexError> {
        EurowalletClient::get_payment_status(self, params).await
    }

    async fn create_payment(&self, params: &Params) -> Result<ApiResponse, GlobitexError> {
        EurowalletClient::create_payment(self, params).await
    }
}
