//! Android SDK duplication and package installation.

use std::io;
use std::path::PathBuf;
use std::process::Stdio;

use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{error, info};

use crate::error::Result;
use crate::fsops;
use crate::layout::Checkout;
use crate::process;

/// A `package;version` selector understood by `sdkmanager`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SdkPackage {
    /// Package path, e.g. `build-tools` or `platforms`.
    pub package: String,
    /// Package version, e.g. `25.0.0` or `android-16`.
    pub version: String,
}

impl SdkPackage {
    /// Create a selector from its two halves.
    pub fn new(package: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            version: version.into(),
        }
    }

    /// The selector string passed to `sdkmanager`.
    pub fn selector(&self) -> String {
        format!("{};{}", self.package, self.version)
    }
}

/// Installs SDK packages into the private SDK copy of a checkout.
pub struct SdkInstaller {
    checkout: Checkout,
}

impl SdkInstaller {
    /// Create an installer for `checkout`.
    pub fn new(checkout: Checkout) -> Self {
        Self { checkout }
    }

    /// Copy the vendored SDK into the wrapper library's tree, replacing any
    /// previous copy.
    pub async fn duplicate_sdk(&self) -> Result<()> {
        let src = self.checkout.android_sdk_src();
        let dst = self.checkout.android_sdk_dst();
        info!("Copying Android SDK from {:?} to {:?}", src, dst);
        tokio::task::spawn_blocking(move || fsops::duplicate(&src, &dst, false)).await??;
        Ok(())
    }

    fn sdkmanager_path(&self) -> PathBuf {
        self.checkout
            .android_sdk_dst()
            .join("tools")
            .join("bin")
            .join("sdkmanager")
    }

    /// Install one package, answering the license prompt. Returns the
    /// `sdkmanager` exit code.
    pub async fn install(&self, package: &SdkPackage) -> Result<i32> {
        let selector = package.selector();
        info!("Installing {} ...", selector);

        let sdk_root = self.checkout.android_sdk_dst();
        let mut child = Command::new(self.sdkmanager_path())
            .arg(format!("--sdk_root={}", sdk_root.display()))
            .arg(&selector)
            .arg("--verbose")
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()?;

        // Agree to the license prompt, then close stdin. The install may
        // finish without ever reading the answer.
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(err) = stdin.write_all(b"y\n").await {
                if err.kind() != io::ErrorKind::BrokenPipe {
                    return Err(err.into());
                }
            }
        }

        let status = child.wait().await?;
        let code = process::exit_code(&status);
        if code != 0 {
            error!("Installing {} failed with exit code {}", selector, code);
        }
        Ok(code)
    }

    /// Duplicate the SDK, then install `packages` in order, stopping at the
    /// first failure. Returns the exit code of the first failing install,
    /// or 0 when everything succeeds.
    pub async fn run(&self, packages: &[SdkPackage]) -> Result<i32> {
        self.duplicate_sdk().await?;

        for package in packages {
            let code = self.install(package).await?;
            if code != 0 {
                return Ok(code);
            }
        }
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_selector_format() {
        assert_eq!(
            SdkPackage::new("build-tools", "25.0.0").selector(),
            "build-tools;25.0.0"
        );
        assert_eq!(
            SdkPackage::new("platforms", "android-16").selector(),
            "platforms;android-16"
        );
    }

    /// Seed a fake vendored SDK whose `sdkmanager` appends its selector
    /// argument to `log` and exits with `code`.
    fn seed_sdk(checkout: &Checkout, log: &std::path::Path, code: i32) {
        let bin = checkout.android_sdk_src().join("tools").join("bin");
        fs::create_dir_all(&bin).unwrap();

        let script = format!("#!/bin/sh\necho \"$2\" >> {}\nexit {}\n", log.display(), code);
        let sdkmanager = bin.join("sdkmanager");
        fs::write(&sdkmanager, script).unwrap();
        fs::set_permissions(&sdkmanager, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[tokio::test]
    async fn test_installs_packages_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let checkout = Checkout::new(dir.path());
        let log = dir.path().join("calls.log");
        seed_sdk(&checkout, &log, 0);

        let packages = [
            SdkPackage::new("build-tools", "25.0.0"),
            SdkPackage::new("platforms", "android-16"),
        ];
        let code = SdkInstaller::new(checkout).run(&packages).await.unwrap();
        assert_eq!(code, 0);

        let calls = fs::read_to_string(&log).unwrap();
        let lines: Vec<&str> = calls.lines().collect();
        assert_eq!(lines, ["build-tools;25.0.0", "platforms;android-16"]);
    }

    #[tokio::test]
    async fn test_first_failure_short_circuits() {
        let dir = tempfile::tempdir().unwrap();
        let checkout = Checkout::new(dir.path());
        let log = dir.path().join("calls.log");
        seed_sdk(&checkout, &log, 3);

        let packages = [
            SdkPackage::new("build-tools", "25.0.0"),
            SdkPackage::new("platforms", "android-16"),
            SdkPackage::new("platforms", "android-21"),
        ];
        let code = SdkInstaller::new(checkout).run(&packages).await.unwrap();
        assert_eq!(code, 3);

        let calls = fs::read_to_string(&log).unwrap();
        assert_eq!(calls.lines().count(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_sdk_replaces_previous_copy() {
        let dir = tempfile::tempdir().unwrap();
        let checkout = Checkout::new(dir.path());
        let log = dir.path().join("calls.log");
        seed_sdk(&checkout, &log, 0);

        let stale = checkout.android_sdk_dst().join("stale.txt");
        fs::create_dir_all(checkout.android_sdk_dst()).unwrap();
        fs::write(&stale, "old").unwrap();

        let installer = SdkInstaller::new(checkout.clone());
        installer.duplicate_sdk().await.unwrap();

        assert!(!stale.exists());
        assert!(checkout
            .android_sdk_dst()
            .join("tools")
            .join("bin")
            .join("sdkmanager")
            .exists());
    }
}
