// src/fetch/download.rs

use reqwest::Client;
use std::{
    io::{Cursor, Read},
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use tracing::{debug, info, instrument};
use zip::{result::ZipError, ZipArchive};

use super::urls::{Remote, Variant};
use crate::decode::{self, Codec, DecodeExhausted};
use crate::store;

pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("download failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("invalid ZIP file: {0}")]
    BadArchive(#[source] ZipError),
    #[error("archive has no entry named {entry}")]
    MissingEntry { entry: String },
    #[error("writing output: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Decode(#[from] DecodeExhausted),
}

impl FetchError {
    /// Errors that point at a defect in this program rather than at the
    /// data or the network.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FetchError::Decode(_))
    }
}

/// A month successfully written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    pub path: PathBuf,
    pub encoding: Codec,
    pub bytes_written: usize,
}

/// Download `remote`, unpack it if archived, re-encode as UTF-8 and write
/// `<YYYYMM>CSV.csv` into `out_dir`.
#[instrument(level = "debug", skip(client, out_dir), fields(url = %remote.url))]
pub async fn fetch(client: &Client, remote: &Remote, out_dir: &Path) -> Result<Saved, FetchError> {
    info!("Downloading {}...", remote.file_name());
    let body = client
        .get(&remote.url)
        .timeout(DOWNLOAD_TIMEOUT)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    debug!(bytes = body.len(), "received");

    let raw = match remote.variant {
        Variant::Archive => read_entry(&body, &remote.entry_name())?,
        Variant::Bare => body.to_vec(),
    };

    let decoded = decode::decode(&raw)?;
    let path = out_dir.join(remote.entry_name());
    store::write_utf8(&path, &decoded.text)?;

    Ok(Saved {
        path,
        encoding: decoded.codec,
        bytes_written: decoded.text.len(),
    })
}

/// Pull the named entry out of an in-memory ZIP.
pub fn read_entry(zip_bytes: &[u8], entry: &str) -> Result<Vec<u8>, FetchError> {
    let mut archive = ZipArchive::new(Cursor::new(zip_bytes)).map_err(FetchError::BadArchive)?;
    let mut file = match archive.by_name(entry) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => {
            return Err(FetchError::MissingEntry {
                entry: entry.to_string(),
            })
        }
        Err(e) => return Err(FetchError::BadArchive(e)),
    };
    let mut buf = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn zip_with(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, bytes) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(bytes).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_read_named_entry() {
        let bytes = zip_with(&[
            ("readme.txt", b"ignore me"),
            ("202001CSV.csv", b"a,b\n1,2\n"),
        ]);
        let out = read_entry(&bytes, "202001CSV.csv").unwrap();
        assert_eq!(out, b"a,b\n1,2\n");
    }

    #[test]
    fn test_missing_entry() {
        let bytes = zip_with(&[("other.csv", b"x")]);
        let err = read_entry(&bytes, "202001CSV.csv").unwrap_err();
        assert!(matches!(err, FetchError::MissingEntry { ref entry } if entry == "202001CSV.csv"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_garbage_is_bad_archive() {
        let err = read_entry(b"<html>Not Found</html>", "202001CSV.csv").unwrap_err();
        assert!(matches!(err, FetchError::BadArchive(_)));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_only_decode_errors_are_fatal() {
        let err = FetchError::Decode(DecodeExhausted {
            codec: Codec::Latin1,
            len: 3,
        });
        assert!(err.is_fatal());
    }
}
