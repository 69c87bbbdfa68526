// src/fetch/urls.rs

use std::fmt;
use url::Url;

use crate::month::Month;

/// Where the Department of Revenue publishes the monthly sales files.
pub const BASE_URL: &str = "https://www.revenue.wi.gov/SLFReportsHistSales";

/// How a month's CSV is packaged on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// `<YYYYMM>CSV.zip` wrapping `<YYYYMM>CSV.csv`
    Archive,
    /// `<YYYYMM>CSV.csv` served as is
    Bare,
}

impl Variant {
    /// Probe order.
    pub const ALL: [Variant; 2] = [Variant::Archive, Variant::Bare];

    pub fn extension(&self) -> &'static str {
        match self {
            Variant::Archive => "zip",
            Variant::Bare => "csv",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// `<YYYYMM>CSV`, the stem shared by remote files and local output.
pub fn file_stem(month: Month) -> String {
    format!("{}CSV", month)
}

/// `<YYYYMM>CSV.csv`
pub fn csv_name(month: Month) -> String {
    format!("{}.csv", file_stem(month))
}

/// One candidate resource for a month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub month: Month,
    pub variant: Variant,
    pub url: String,
}

impl Remote {
    pub fn new(base: &Url, month: Month, variant: Variant) -> Self {
        let url = format!(
            "{}/{}.{}",
            base.as_str().trim_end_matches('/'),
            file_stem(month),
            variant.extension()
        );
        Self {
            month,
            variant,
            url,
        }
    }

    /// Last path segment of the URL, e.g. `202001CSV.zip`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", file_stem(self.month), self.variant.extension())
    }

    /// Name of the CSV inside the archive, which is also the local file name.
    pub fn entry_name(&self) -> String {
        csv_name(self.month)
    }
}
