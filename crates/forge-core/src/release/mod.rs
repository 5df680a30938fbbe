//! Latest-release lookup against the hosting API.
//!
//! Uses the curl crate (libcurl) to fetch the release metadata for the
//! configured repository and extract the archive URL from its JSON body.
//! One attempt, short timeout; the caller decides whether to re-run.

mod parse;

use anyhow::{Context, Result};
use std::time::Duration;

use crate::config::ForgeConfig;
use crate::error::ScaffoldError;

/// Sent on every request; the hosting API rejects agent-less clients.
pub(crate) const USER_AGENT: &str = concat!("forge/", env!("CARGO_PKG_VERSION"));

/// Resolves the archive URL of the latest release of the configured
/// repository. A fixed-version setup is the degenerate case of this call:
/// an endpoint whose answer never changes.
pub fn resolve_latest(cfg: &ForgeConfig) -> Result<String, ScaffoldError> {
    let endpoint = format!(
        "{}/repos/{}/releases/latest",
        cfg.api_base.trim_end_matches('/'),
        cfg.repository
    );
    url::Url::parse(&endpoint)
        .with_context(|| format!("invalid release endpoint `{}`", endpoint))
        .map_err(ScaffoldError::Resolution)?;

    tracing::debug!("looking up latest release at {}", endpoint);
    let body = get_body(&endpoint, Duration::from_secs(cfg.resolve_timeout_secs))
        .map_err(ScaffoldError::Resolution)?;

    parse::archive_url(&body, &cfg.archive_url_field).map_err(ScaffoldError::Resolution)
}

/// Performs a GET and returns the full response body.
fn get_body(url: &str, timeout: Duration) -> Result<Vec<u8>> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.useragent(USER_AGENT)?;
    easy.follow_location(true)?;
    easy.connect_timeout(timeout)?;
    easy.timeout(timeout)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform().context("release lookup request failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    if code < 200 || code >= 300 {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }

    Ok(body)
}
