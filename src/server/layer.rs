//! Tower middleware that validates signed requests before they reach a handler.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use http::{Request, Response};
use http_body::Body;
use http_body_util::{BodyExt, Either, Full};
use tower_layer::Layer;
use tower_service::Service;

use crate::server::{Rejection, Validator};

/// Request body handed to the inner service: the original body for
/// unprotected routes, the buffered and validated body otherwise.
pub type ValidatedBody<B> = Either<B, Full<Bytes>>;

/// Response body of [`ValidationService`]: the handler's body, or a rejection.
pub type ValidationBody<B> = Either<B, Full<Bytes>>;

/// Layer that wraps a service in [`ValidationService`].
#[derive(Debug, Clone)]
pub struct ValidationLayer {
    validator: Arc<Validator>,
}

impl ValidationLayer {
    /// Create a new layer.
    pub fn new(validator: Validator) -> Self {
        Self {
            validator: Arc::new(validator),
        }
    }
}

impl<S> Layer<S> for ValidationLayer {
    type Service = ValidationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ValidationService {
            inner,
            validator: Arc::clone(&self.validator),
        }
    }
}

/// Validates requests to protected routes and answers failures with a JSON
/// error envelope.
///
/// Requests to other routes reach the inner service untouched, body stream
/// included. Protected requests are buffered so POST parameters can be
/// checked, and the inner service receives the same bytes as a [`Full`]
/// body. A protected body that cannot be read is rejected as malformed.
#[derive(Debug, Clone)]
pub struct ValidationService<S> {
    inner: S,
    validator: Arc<Validator>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for ValidationService<S>
where
    S: Service<Request<ValidatedBody<ReqBody>>, Response = Response<ResBody>>
        + Clone
        + Send
        + 'static,
    S::Future: Send + 'static,
    ReqBody: Body + Send + 'static,
    ReqBody::Data: Send,
    ReqBody::Error: std::fmt::Display,
    ResBody: 'static,
{
    type Response = Response<ValidationBody<ResBody>>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        // The service that was polled ready handles this request.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let validator = Arc::clone(&self.validator);

        Box::pin(async move {
            if !validator.is_protected(req.uri().path()) {
                return forward(&mut inner, req.map(Either::Left)).await;
            }

            let (parts, body) = req.into_parts();
            tracing::debug!(method = %parts.method, uri = %parts.uri, "validating request");

            let body = match body.collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(error) => {
                    tracing::warn!(%error, "failed to read request body");
                    return Ok(reject(Rejection::MalformedParameters));
                }
            };

            if let Err(rejection) = validator.validate(
                &parts.method,
                parts.uri.path(),
                parts.uri.query(),
                &parts.headers,
                &body,
            ) {
                return Ok(reject(rejection));
            }

            let req = Request::from_parts(parts, Either::Right(Full::new(body)));
            forward(&mut inner, req).await
        })
    }
}

async fn forward<S, ReqBody, ResBody>(
    inner: &mut S,
    req: Request<ValidatedBody<ReqBody>>,
) -> Result<Response<ValidationBody<ResBody>>, S::Error>
where
    S: Service<Request<ValidatedBody<ReqBody>>, Response = Response<ResBody>>,
{
    inner
        .call(req)
        .await
        .map(|response| response.map(Either::Left))
}

fn reject<B>(rejection: Rejection) -> Response<ValidationBody<B>> {
    rejection.into_response().map(Either::Right)
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::io;

    use http::{Method, StatusCode};
    use http_body::Frame;
    use tower::{ServiceExt, service_fn};

    use super::*;
    use crate::auth::{
        Credentials, Params, TRANSACTION_SIGNATURE_PARAM, header_signature, stringify,
        transaction_signature,
    };
    use crate::rest::{API_KEY_HEADER, NONCE_HEADER, SIGNATURE_HEADER, eurowallet};

    const NONCE: &str = "1700000000000";

    /// Body whose first read fails, like a connection reset mid-upload.
    struct BrokenBody;

    impl Body for BrokenBody {
        type Data = Bytes;
        type Error = io::Error;

        fn poll_frame(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
        ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
            Poll::Ready(Some(Err(io::Error::other("client reset"))))
        }
    }

    async fn call<B>(req: Request<B>) -> Response<ValidationBody<Full<Bytes>>>
    where
        B: Body<Data = Bytes> + Send + 'static,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>> + std::fmt::Display,
    {
        let handler = service_fn(|req: Request<ValidatedBody<B>>| async move {
            let echoed = match req.into_body().collect().await {
                Ok(collected) => {
                    let mut echoed = b"handled:".to_vec();
                    echoed.extend_from_slice(&collected.to_bytes());
                    echoed
                }
                Err(error) => format!("handled error:{error}").into_bytes(),
            };
            Ok::<_, Infallible>(Response::new(Full::new(Bytes::from(echoed))))
        });
        let validator = Validator::new(Credentials::new("key", "msecret", "tsecret"));
        ValidationLayer::new(validator)
            .layer(handler)
            .oneshot(req)
            .await
            .unwrap()
    }

    fn signed(method: Method, path: &str, params: &Params) -> http::request::Builder {
        let signature = header_signature("key", "msecret", path, NONCE, params);
        Request::builder()
            .method(method)
            .header(API_KEY_HEADER, "key")
            .header(NONCE_HEADER, NONCE)
            .header(SIGNATURE_HEADER, signature)
    }

    async fn body_string(response: Response<ValidationBody<Full<Bytes>>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_passes_unprotected_route_through() {
        let req = Request::builder()
            .uri("/health")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let response = call(req).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "handled:");
    }

    #[tokio::test]
    async fn test_unprotected_route_receives_body_errors_itself() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/upload")
            .body(BrokenBody)
            .unwrap();
        let response = call(req).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "handled error:client reset");
    }

    #[tokio::test]
    async fn test_rejects_unreadable_protected_body() {
        let req = signed(Method::POST, eurowallet::PAYMENTS, &Params::new())
            .uri(eurowallet::PAYMENTS)
            .body(BrokenBody)
            .unwrap();
        let response = call(req).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_string(response).await,
            r#"{"errors":[{"code":90,"message":"Malformed request parameters"}]}"#
        );
    }

    #[tokio::test]
    async fn test_accepts_signed_get() {
        let req = signed(Method::GET, eurowallet::STATUS, &Params::new())
            .uri(eurowallet::STATUS)
            .body(Full::new(Bytes::new()))
            .unwrap();
        let response = call(req).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejects_unsigned_request_with_envelope() {
        let req = Request::builder()
            .uri(eurowallet::STATUS)
            .body(Full::new(Bytes::new()))
            .unwrap();
        let response = call(req).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_string(response).await,
            r#"{"errors":[{"code":30,"message":"Missing signature"}]}"#
        );
    }

    #[tokio::test]
    async fn test_forwards_signed_post_body_unchanged() {
        let mut params = Params::new().with("amount", "10.00");
        let tx = transaction_signature("tsecret", &params);
        params.push(TRANSACTION_SIGNATURE_PARAM, tx);
        let body = stringify(&params, true);

        let req = signed(Method::POST, eurowallet::PAYMENTS, &params)
            .uri(eurowallet::PAYMENTS)
            .body(Full::new(Bytes::from(body.clone())))
            .unwrap();
        let response = call(req).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, format!("handled:{body}"));
    }

    #[tokio::test]
    async fn test_rejects_post_without_transaction_signature() {
        let params = Params::new().with("amount", "10.00");
        let req = signed(Method::POST, eurowallet::PAYMENTS, &params)
            .uri(eurowallet::PAYMENTS)
            .body(Full::new(Bytes::from(stringify(&params, true))))
            .unwrap();
        let response = call(req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_string(response).await,
            r#"{"errors":[{"code":200,"message":"Mandatory parameter missing"}]}"#
        );
    }
}
