//! HTTP transport seam under the dataset fetcher.
//!
//! Production uses [`ReqwestHttpClient`]; tests and offline runs plug in
//! [`StaticHttpClient`] with canned responses.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// A GET request with its per-request timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport-level failure: connect, timeout, body read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HttpError {}

pub type HttpFuture<'a> =
    Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>>;

/// Async GET transport.
pub trait HttpClient: Send + Sync {
    fn get(&self, request: HttpRequest) -> HttpFuture<'_>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Arc<reqwest::Client>,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: Arc::new(
                reqwest::Client::builder()
                    .user_agent(concat!("brentview/", env!("CARGO_PKG_VERSION")))
                    .build()
                    .unwrap_or_else(|_| reqwest::Client::new()),
            ),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestHttpClient {
    fn get(&self, request: HttpRequest) -> HttpFuture<'_> {
        Box::pin(async move {
            let response = self
                .client
                .get(&request.url)
                .timeout(request.timeout)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        HttpError::new(format!("request timeout: {e}"))
                    } else if e.is_connect() {
                        HttpError::new(format!("connection failed: {e}"))
                    } else {
                        HttpError::new(format!("request failed: {e}"))
                    }
                })?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| HttpError::new(format!("failed to read response body: {e}")))?;

            Ok(HttpResponse { status, body })
        })
    }
}

/// A canned reply for [`StaticHttpClient`].
#[derive(Debug, Clone)]
enum Reply {
    Response(HttpResponse),
    Error(HttpError),
}

#[derive(Debug, Clone)]
struct Route {
    pattern: String,
    delay: Duration,
    reply: Reply,
}

/// Deterministic offline transport.
///
/// A request is answered by the first route whose pattern occurs in its URL;
/// unmatched URLs get a 404.
#[derive(Debug, Clone, Default)]
pub struct StaticHttpClient {
    routes: Vec<Route>,
}

impl StaticHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `200` with `body`.
    pub fn json(self, pattern: impl Into<String>, body: impl Into<String>) -> Self {
        self.respond(pattern, Duration::ZERO, HttpResponse::ok_json(body))
    }

    /// Answer `200` with `body` after `delay`.
    pub fn json_delayed(
        self,
        pattern: impl Into<String>,
        delay: Duration,
        body: impl Into<String>,
    ) -> Self {
        self.respond(pattern, delay, HttpResponse::ok_json(body))
    }

    /// Answer with a bare status code and empty body.
    pub fn status(self, pattern: impl Into<String>, status: u16) -> Self {
        self.respond(
            pattern,
            Duration::ZERO,
            HttpResponse {
                status,
                body: String::new(),
            },
        )
    }

    /// Fail at the transport level.
    pub fn fail(mut self, pattern: impl Into<String>, message: impl Into<String>) -> Self {
        self.routes.push(Route {
            pattern: pattern.into(),
            delay: Duration::ZERO,
            reply: Reply::Error(HttpError::new(message)),
        });
        self
    }

    fn respond(
        mut self,
        pattern: impl Into<String>,
        delay: Duration,
        response: HttpResponse,
    ) -> Self {
        self.routes.push(Route {
            pattern: pattern.into(),
            delay,
            reply: Reply::Response(response),
        });
        self
    }
}

impl HttpClient for StaticHttpClient {
    fn get(&self, request: HttpRequest) -> HttpFuture<'_> {
        let route = self
            .routes
            .iter()
            .find(|r| request.url.contains(&r.pattern))
            .cloned();
        Box::pin(async move {
            let Some(route) = route else {
                return Ok(HttpResponse {
                    status: 404,
                    body: String::new(),
                });
            };
            if !route.delay.is_zero() {
                tokio::time::sleep(route.delay).await;
            }
            match route.reply {
                Reply::Response(r) => Ok(r),
                Reply::Error(e) => Err(e),
            }
        })
    }
}
