//! Downloader for the Wisconsin Department of Revenue monthly sales CSVs.

pub mod config;
pub mod decode;
pub mod fetch;
pub mod logging;
pub mod month;
pub mod run;
pub mod store;
