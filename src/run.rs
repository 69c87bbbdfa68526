// src/run.rs

use anyhow::{Context, Result};
use reqwest::Client;
use std::{fmt, path::PathBuf};
use tracing::{error, info, warn};
use url::Url;

use crate::{
    fetch::{self, Remote, Variant},
    month::{months_between, Month},
    store,
};

/// Stop once this many months in a row have nothing published.
pub const MAX_CONSECUTIVE_MISSES: u32 = 3;

#[derive(Debug, Clone)]
pub struct Settings {
    pub out_dir: PathBuf,
    pub start: Month,
    pub end: Month,
    pub base_url: Url,
    pub max_consecutive_misses: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub missing: usize,
    pub stopped_early: bool,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} downloaded, {} skipped", self.downloaded, self.skipped)?;
        if self.failed > 0 {
            write!(f, ", {} failed", self.failed)?;
        }
        if self.missing > 0 {
            write!(f, ", {} not found", self.missing)?;
        }
        Ok(())
    }
}

/// Walk the months in order, fetching whatever is published and not yet on
/// disk. `client` is used for downloads; existence checks go through a
/// separate client that does not follow redirects. Only directory errors
/// and broken decoder invariants are returned as `Err`; every per-month
/// problem is logged and counted.
pub async fn run(client: &Client, settings: &Settings) -> Result<Summary> {
    store::prepare(&settings.out_dir)?;
    let prober = fetch::probe::client().context("building probe client")?;
    info!("Target directory: {}", settings.out_dir.display());
    info!("Starting from: {}-{:02}", settings.start.year(), settings.start.month());

    let existing = store::existing_stems(&settings.out_dir)?;
    let mut summary = Summary::default();
    let mut consecutive_misses = 0u32;

    for month in months_between(settings.start, settings.end) {
        let stem = fetch::urls::file_stem(month);
        if existing.contains(&stem) {
            info!(%month, "Skipping {}.csv (already exists)", stem);
            summary.skipped += 1;
            continue;
        }

        match find_published(&prober, &settings.base_url, month).await {
            Some(remote) => {
                consecutive_misses = 0;
                match fetch::fetch(client, &remote, &settings.out_dir).await {
                    Ok(saved) => {
                        info!(
                            %month,
                            bytes = saved.bytes_written,
                            "Saved {} (converted from {} to UTF-8)",
                            remote.entry_name(),
                            saved.encoding
                        );
                        summary.downloaded += 1;
                    }
                    Err(e) if e.is_fatal() => return Err(e.into()),
                    Err(e) => {
                        error!(%month, url = %remote.url, "Failed to process {}: {}", remote.file_name(), e);
                        summary.failed += 1;
                    }
                }
            }
            None => {
                consecutive_misses += 1;
                summary.missing += 1;
                warn!(%month, "{} not found (tried .zip and .csv)", stem);
                if consecutive_misses >= settings.max_consecutive_misses {
                    info!(
                        "Stopping after {} consecutive missing files.",
                        consecutive_misses
                    );
                    summary.stopped_early = true;
                    break;
                }
            }
        }
    }

    info!("Summary: {}", summary);
    Ok(summary)
}

/// The first variant the server reports for `month`, archive before bare.
async fn find_published(prober: &Client, base: &Url, month: Month) -> Option<Remote> {
    for variant in Variant::ALL {
        let remote = Remote::new(base, month, variant);
        if fetch::exists(prober, &remote.url).await {
            return Some(remote);
        }
    }
    None
}
