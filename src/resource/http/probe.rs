//! HTTP endpoint readiness probe.
//!
//! Issues one plain GET against the target URL and classifies the response
//! status: anything in `[200, 400)` is ready.

use std::sync::OnceLock;

use reqwest::{Client, Response, StatusCode, redirect};
use url::Url;

use crate::context::Context;
use crate::resource::{Resource, ResourceConfig, ResourceError};

/// Scheme for plain HTTP targets.
pub const SCHEME: &str = "http";

/// Scheme for TLS-secured HTTP targets.
pub const SCHEME_TLS: &str = "https";

const SCHEMES: &[&str] = &[SCHEME, SCHEME_TLS];

/// Lowest status code considered ready (inclusive).
const READY_MIN: u16 = 200;

/// First status code considered not ready again.
const READY_END: u16 = 400;

/// Body bytes read after the status before giving up on connection reuse.
const DRAIN_LIMIT: usize = 64 * 1024;

/// Process-wide client; its connection pool is shared by every probe.
static CLIENT: OnceLock<Client> = OnceLock::new();

fn shared_client() -> Result<&'static Client, ResourceError> {
    if let Some(client) = CLIENT.get() {
        return Ok(client);
    }

    let client = Client::builder()
        .redirect(redirect::Policy::none())
        .build()
        .map_err(ResourceError::request)?;
    Ok(CLIENT.get_or_init(|| client))
}

/// Outcome of classifying a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// 2xx or 3xx.
    Ready,
    /// Informational, client error or server error.
    NotReady,
}

/// Classify a response status.
///
/// Redirects count as ready and are never followed.
pub fn classify(status: StatusCode) -> Readiness {
    if (READY_MIN..READY_END).contains(&status.as_u16()) {
        Readiness::Ready
    } else {
        Readiness::NotReady
    }
}

/// Status line for a response, e.g. `404 Not Found`.
///
/// `reason` is the phrase the server sent, if any. Without one the canonical
/// reason is used, and codes without a canonical reason render as the bare
/// number.
pub fn status_line(status: StatusCode, reason: Option<&str>) -> String {
    match reason
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .or(status.canonical_reason())
    {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Reason phrase as sent by the server.
///
/// hyper only records it when it differs from the canonical one.
fn reason_phrase(response: &Response) -> Option<String> {
    response
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned())
}

/// Read and discard up to [`DRAIN_LIMIT`] body bytes.
///
/// A fully read body lets the connection return to the pool; anything larger
/// or failing is dropped, which closes the connection.
async fn drain(mut response: Response) {
    let mut read = 0;
    while read <= DRAIN_LIMIT {
        match response.chunk().await {
            Ok(Some(chunk)) => read += chunk.len(),
            Ok(None) | Err(_) => return,
        }
    }
}

/// Registration descriptor for the `http` and `https` schemes.
pub fn use_config() -> ResourceConfig {
    ResourceConfig {
        scheme: SCHEMES,
        factory: new,
    }
}

/// Build a probe for `url`.
///
/// Only the presence of the URL is checked; no network activity happens here.
///
/// # Errors
/// Returns `ResourceError::InvalidArgument("url")` if `url` is `None`.
pub fn new(url: Option<Url>) -> Result<Box<dyn Resource>, ResourceError> {
    let url = url.ok_or(ResourceError::InvalidArgument("url"))?;
    Ok(Box::new(HttpResource::new(url)))
}

/// HTTP readiness probe bound to one URL.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpResource {
    url: Url,
}

impl std::fmt::Debug for HttpResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResource")
            .field("url", &self.url.as_str())
            .finish()
    }
}

impl HttpResource {
    /// Create a probe for the given URL.
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    /// Target URL.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait::async_trait]
impl Resource for HttpResource {
    async fn test(&self, ctx: &Context) -> Result<(), ResourceError> {
        let client = shared_client()?;

        let request = client
            .get(self.url.clone())
            .build()
            .map_err(ResourceError::request)?;

        tracing::debug!(url = %self.url, "HTTP probe requesting");

        let response = ctx
            .run(client.execute(request))
            .await?
            .map_err(ResourceError::transport)?;

        let status = response.status();
        let reason = reason_phrase(&response);
        // The status is already known; an interrupted drain only costs the connection.
        let _ = ctx.run(drain(response)).await;

        let readiness = classify(status);
        tracing::debug!(
            url = %self.url,
            status = status.as_u16(),
            ready = readiness == Readiness::Ready,
            "HTTP probe response"
        );

        match readiness {
            Readiness::Ready => Ok(()),
            Readiness::NotReady => Err(ResourceError::Unready(status_line(
                status,
                reason.as_deref(),
            ))),
        }
    }
}
