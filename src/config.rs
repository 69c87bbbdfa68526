// src/config.rs

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use url::Url;

use crate::{
    fetch::BASE_URL,
    month::Month,
    run::{Settings, MAX_CONSECUTIVE_MISSES},
};

pub const DEFAULT_START: &str = "2020-01";

#[derive(Parser, Debug)]
#[command(version, about = "Download Wisconsin sales CSV files", long_about = None)]
pub struct Args {
    /// Directory to save CSV files (default: ~/data/wi-sales/)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Start date in YYYY-MM format
    #[arg(long = "start-date", default_value = DEFAULT_START)]
    pub start_date: Month,

    /// Alternative origin serving the same file layout
    #[arg(long = "base-url", default_value = BASE_URL, hide = true)]
    pub base_url: Url,
}

/// `~/data/wi-sales`
pub fn default_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine home directory; pass --path")?;
    Ok(home.join("data").join("wi-sales"))
}

impl Args {
    /// Resolve defaults into run settings that end at `now`.
    pub fn into_settings(self, now: Month) -> Result<Settings> {
        if self.base_url.cannot_be_a_base() {
            bail!("--base-url {} is not a hierarchical URL", self.base_url);
        }
        let out_dir = match self.path {
            Some(p) => p,
            None => default_path()?,
        };
        Ok(Settings {
            out_dir,
            start: self.start_date,
            end: now,
            base_url: self.base_url,
            max_consecutive_misses: MAX_CONSECUTIVE_MISSES,
        })
    }
}
