//! Streaming archive download.
//!
//! Single GET, body written sequentially to the destination file as it
//! arrives. No retries; a partial file left behind by a failed transfer is
//! removed by the workspace cleanup in the orchestrator.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use crate::error::ScaffoldError;
use crate::release::USER_AGENT;

/// Downloads `url` to `dest`, overwriting any existing file.
pub fn fetch(url: &str, dest: &Path) -> Result<(), ScaffoldError> {
    fetch_inner(url, dest).map_err(ScaffoldError::Download)
}

fn fetch_inner(url: &str, dest: &Path) -> Result<()> {
    let file = File::create(dest)
        .with_context(|| format!("cannot create {}", dest.display()))?;
    let mut out = BufWriter::new(file);

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.useragent(USER_AGENT)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(30))?;
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            match out.write_all(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    tracing::warn!("archive write failed: {}", e);
                    Ok(0) // abort transfer
                }
            }
        })?;
        transfer.perform().context("archive download failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    if code < 200 || code >= 300 {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }

    out.flush().context("flushing archive to disk")?;
    Ok(())
}
