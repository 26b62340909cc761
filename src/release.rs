//! Latest-release lookup with bounded retries
//!
//! The update check asks the release endpoint for the newest tag. Server
//! flakiness (5xx, timeouts) is retried with a capped linear backoff; a
//! malformed request (any other non-success status) aborts immediately.
//! An exhausted retry budget is reported as absence, not as an error -
//! the caller decides what a missing answer means.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Minimal HTTP capability: GET a URL, optionally with a bearer token,
/// and hand back status and body.
pub trait HttpFetch {
    fn get(&self, url: &str, bearer: Option<&str>) -> Result<(u16, String)>;
}

/// Real transport over a blocking reqwest client
pub struct BlockingHttp {
    client: reqwest::blocking::Client,
}

impl BlockingHttp {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("wasend/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }
}

impl HttpFetch for BlockingHttp {
    fn get(&self, url: &str, bearer: Option<&str>) -> Result<(u16, String)> {
        let mut request = self.client.get(url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok((status, body))
    }
}

/// Fetches latest-release metadata and extracts the version tag
pub struct ReleaseResolver<H: HttpFetch> {
    http: H,
    url: String,
    token: Option<String>,
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl<H: HttpFetch> ReleaseResolver<H> {
    /// The token is injected here rather than read from the environment,
    /// so callers and tests control its presence.
    pub fn new(http: H, url: &str, token: Option<String>) -> Self {
        Self {
            http,
            url: url.to_string(),
            token,
            max_attempts: 4,
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(10),
        }
    }

    pub fn with_retry_policy(
        mut self,
        max_attempts: u32,
        base_delay: Duration,
        max_delay: Duration,
    ) -> Self {
        self.max_attempts = max_attempts;
        self.base_delay = base_delay;
        self.max_delay = max_delay;
        self
    }

    /// Fetch the latest release tag.
    ///
    /// `Ok(None)` means the retry budget ran out on transient failures.
    pub fn fetch_latest(&self) -> Result<Option<String>> {
        for attempt in 1..=self.max_attempts {
            match self.http.get(&self.url, self.token.as_deref()) {
                Ok((status, body)) if (200..300).contains(&status) => {
                    return parse_release_tag(&body).map(Some);
                }
                Ok((status, _)) if (500..600).contains(&status) => {
                    warn!("Release endpoint returned {} (attempt {})", status, attempt);
                }
                Ok((status, _)) => {
                    // Client error: retrying cannot help
                    return Err(Error::ReleaseFetch(status));
                }
                Err(err) if is_transient(&err) => {
                    warn!("Transient fetch failure (attempt {}): {}", attempt, err);
                }
                Err(err) => return Err(err),
            }

            if attempt < self.max_attempts {
                let delay = self.backoff_delay(attempt);
                debug!("Retrying release fetch in {:?}", delay);
                std::thread::sleep(delay);
            }
        }

        Ok(None)
    }

    /// Linearly increasing delay, capped
    fn backoff_delay(&self, attempt: u32) -> Duration {
        (self.base_delay * attempt).min(self.max_delay)
    }
}

/// Release metadata payload; only the tag matters here
#[derive(Debug, Deserialize)]
struct ReleasePayload {
    tag_name: Option<String>,
}

/// Extract the `tag_name` field from a release payload
fn parse_release_tag(body: &str) -> Result<String> {
    let payload: ReleasePayload = serde_json::from_str(body)
        .map_err(|e| Error::MalformedRelease(e.to_string()))?;

    payload
        .tag_name
        .ok_or_else(|| Error::MalformedRelease("missing tag_name field".to_string()))
}

fn is_transient(err: &Error) -> bool {
    match err {
        Error::Http(e) => e.is_timeout() || e.is_connect(),
        _ => false,
    }
}
