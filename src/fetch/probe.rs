// src/fetch/probe.rs

use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use tracing::debug;

pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of a HEAD request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Found,
    /// The server answered with something other than 200.
    Absent(StatusCode),
    /// No answer at all: timeout, DNS, refused, reset.
    Unreachable(String),
}

impl Probe {
    pub fn is_found(&self) -> bool {
        matches!(self, Probe::Found)
    }
}

/// Client for HEAD requests. Redirects are reported as their 3xx status
/// rather than followed, so a redirect to an error page is not a hit.
pub fn client() -> reqwest::Result<Client> {
    Client::builder().redirect(Policy::none()).build()
}

/// HEAD `url` without transferring a body.
pub async fn probe(client: &Client, url: &str) -> Probe {
    match client.head(url).timeout(PROBE_TIMEOUT).send().await {
        Ok(resp) if resp.status() == StatusCode::OK => Probe::Found,
        Ok(resp) => {
            debug!(%url, status = %resp.status(), "absent");
            Probe::Absent(resp.status())
        }
        Err(e) => {
            debug!(%url, error = %e, "unreachable");
            Probe::Unreachable(e.to_string())
        }
    }
}

/// True iff the server answers HEAD with 200. Transport errors count as absent.
pub async fn exists(client: &Client, url: &str) -> bool {
    probe(client, url).await.is_found()
}
