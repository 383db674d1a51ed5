//! Android NDK fetch and extraction.
//!
//! The native library pins a single NDK revision. The fetcher places the
//! archive in the libadblockplus third_party directory, unpacks it with
//! permissions intact, and removes the archive afterwards. A failed
//! download or extraction is fatal; there are no retries.

use std::io;
use std::path::PathBuf;

use tracing::info;

use crate::archive;
use crate::config::NdkConfig;
use crate::download::Downloader;
use crate::error::Result;
use crate::fsops;
use crate::layout::Checkout;

/// Orchestrates the NDK download into a checkout.
pub struct NdkFetcher {
    checkout: Checkout,
    config: NdkConfig,
}

impl NdkFetcher {
    /// Create a fetcher for `checkout` using the given pins.
    pub fn new(checkout: Checkout, config: NdkConfig) -> Self {
        Self { checkout, config }
    }

    /// File name of the archive, taken from the URL's last segment.
    fn archive_name(&self) -> &str {
        self.config
            .url
            .rsplit('/')
            .next()
            .unwrap_or(&self.config.url)
    }

    /// Remove stale artifacts, download, verify, extract, and delete the
    /// archive.
    pub async fn fetch(&self) -> Result<()> {
        let third_party = self.checkout.adblock_third_party();
        let archive_path = third_party.join(self.archive_name());

        match tokio::fs::remove_file(&archive_path).await {
            Ok(()) => info!("Deleted stale {:?}", archive_path),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        let downloader = Downloader::new()?;
        downloader.fetch(&self.config.url, &archive_path).await?;

        if let Some(expected) = &self.config.sha256 {
            if let Err(err) = Downloader::verify_sha256(&archive_path, expected).await {
                tokio::fs::remove_file(&archive_path).await.ok();
                return Err(err);
            }
        }

        let ndk_dir = third_party.join(extracted_dir_name(self.archive_name()));
        let stale = ndk_dir.clone();
        tokio::task::spawn_blocking(move || fsops::remove_dir_if_exists(&stale)).await??;

        archive::extract_zip(&archive_path, &third_party).await?;

        tokio::fs::remove_file(&archive_path).await?;

        info!("NDK ready in {:?}", ndk_dir);
        Ok(())
    }
}

/// Name of the directory the archive unpacks to. Google's NDK archives are
/// named `<dir>-<os>-<arch>.zip`; the top-level directory inside drops the
/// platform suffix (`android-ndk-r12b-linux-x86_64.zip` unpacks to
/// `android-ndk-r12b`).
fn extracted_dir_name(archive_name: &str) -> PathBuf {
    let stem = archive_name.strip_suffix(".zip").unwrap_or(archive_name);
    let mut parts: Vec<&str> = stem.split('-').collect();
    if parts.len() > 2 {
        parts.truncate(parts.len() - 2);
    }
    PathBuf::from(parts.join("-"))
}
