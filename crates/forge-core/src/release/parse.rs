//! Extract the archive URL from a release-metadata JSON body.

use anyhow::{anyhow, Context, Result};

/// Pulls `field` (e.g. `zipball_url`) out of the release body and validates
/// that its value is a well-formed URL.
pub(crate) fn archive_url(body: &[u8], field: &str) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_slice(body).context("release body is not valid JSON")?;

    let raw = value
        .get(field)
        .ok_or_else(|| anyhow!("release body has no `{}` field", field))?
        .as_str()
        .ok_or_else(|| anyhow!("release field `{}` is not a string", field))?;

    url::Url::parse(raw)
        .with_context(|| format!("release field `{}` is not a valid URL", field))?;

    Ok(raw.to_string())
}
