//! Version pins and their optional override file.
//!
//! The defaults below are the revisions the native library is known to
//! build against. An `abp-prep.toml` at the checkout root overrides them;
//! nothing is ever written back.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::Result;
use crate::sdk::SdkPackage;

/// Archive of the pinned NDK revision.
const DEFAULT_NDK_URL: &str =
    "https://dl.google.com/android/repository/android-ndk-r12b-linux-x86_64.zip";

/// File name of the optional override file at the checkout root.
pub const CONFIG_FILE: &str = "abp-prep.toml";

/// Tool configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrepConfig {
    /// NDK download settings.
    pub ndk: NdkConfig,
    /// SDK package installation settings.
    pub sdk: SdkConfig,
}

/// NDK download settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NdkConfig {
    /// Archive to download.
    pub url: String,
    /// Expected SHA-256 of the archive; verified only when set.
    pub sha256: Option<String>,
}

impl Default for NdkConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_NDK_URL.to_string(),
            sha256: None,
        }
    }
}

/// SDK package installation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SdkConfig {
    /// Packages installed into the private SDK copy, in order.
    pub packages: Vec<SdkPackage>,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            packages: vec![
                SdkPackage::new("build-tools", "25.0.0"),
                SdkPackage::new("platforms", "android-16"),
                SdkPackage::new("platforms", "android-21"),
            ],
        }
    }
}

impl PrepConfig {
    /// Load the override file under `root` if present, defaults otherwise.
    pub async fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if path.exists() {
            info!("Loading configuration from {:?}", path);
            let content = tokio::fs::read_to_string(&path).await?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }
}
