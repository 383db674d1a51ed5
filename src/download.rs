//! Archive download.

use std::path::Path;
use std::time::Duration;

use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{PrepError, Result};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP downloader for toolchain archives.
pub struct Downloader {
    client: Client,
}

impl Downloader {
    /// Create a downloader with the default connection timeout.
    pub fn new() -> Result<Self> {
        let client = Client::builder().connect_timeout(CONNECT_TIMEOUT).build()?;
        Ok(Self { client })
    }

    /// Download `url` to `target`, streaming to disk.
    pub async fn fetch(&self, url: &str, target: &Path) -> Result<()> {
        info!("Downloading {} to {:?}", url, target);

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PrepError::Status(status));
        }

        let bar = match response.content_length() {
            Some(len) => {
                let bar = ProgressBar::new(len);
                bar.set_style(
                    ProgressStyle::with_template("{bytes}/{total_bytes} [{bar:40}] {bytes_per_sec}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar()),
                );
                bar
            }
            None => ProgressBar::new_spinner(),
        };

        let mut file = tokio::fs::File::create(target).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            bar.inc(chunk.len() as u64);
        }
        file.flush().await?;
        bar.finish_and_clear();

        info!("Download complete: {:?}", target);
        Ok(())
    }

    /// Compare the SHA-256 of `path` against `expected` (hex digits).
    pub async fn verify_sha256(path: &Path, expected: &str) -> Result<()> {
        debug!("Verifying checksum for {:?}", path);

        let data = tokio::fs::read(path).await?;
        let mut hasher = Sha256::new();
        hasher.update(&data);
        let actual = hex::encode(hasher.finalize());

        if actual.eq_ignore_ascii_case(expected) {
            Ok(())
        } else {
            Err(PrepError::ChecksumMismatch {
                path: path.to_path_buf(),
                expected: expected.to_string(),
                actual,
            })
        }
    }
}
