// src/fetch/mod.rs

//! Remote side: URL construction, existence probes and downloads.

pub mod download;
pub mod probe;
pub mod urls;

pub use download::{fetch, FetchError, Saved};
pub use probe::{exists, probe, Probe};
pub use urls::{Remote, Variant, BASE_URL};
