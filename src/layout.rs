//! Checkout layout conventions.
//!
//! Every tool derives its paths from the checkout root it is invoked in.
//! The `src/third_party/...` nesting below is the contract with the build
//! tooling that consumes the prepared trees; nothing validates it beyond
//! existence checks at the point of use.

use std::path::{Path, PathBuf};

/// Path helper for the conventional checkout layout.
#[derive(Debug, Clone)]
pub struct Checkout {
    root: PathBuf,
}

impl Checkout {
    /// Create a layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a layout rooted at the current working directory.
    pub fn from_cwd() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// The checkout root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory the legacy libadblockplus build resolves its
    /// dependencies from.
    pub fn adblock_third_party(&self) -> PathBuf {
        self.root
            .join("src")
            .join("third_party")
            .join("libadblockplus")
            .join("src")
            .join("third_party")
    }

    /// The V8 tree checked out by the parent project.
    pub fn v8_src(&self) -> PathBuf {
        self.root.join("src").join("v8")
    }

    /// Where libadblockplus expects its own V8 copy.
    pub fn v8_dst(&self) -> PathBuf {
        self.adblock_third_party().join("v8")
    }

    /// The vendored Android SDK owned by the parent project.
    pub fn android_sdk_src(&self) -> PathBuf {
        self.root
            .join("src")
            .join("third_party")
            .join("android_tools")
            .join("sdk")
    }

    /// The private SDK copy the Android wrapper build installs into.
    pub fn android_sdk_dst(&self) -> PathBuf {
        self.root
            .join("src")
            .join("third_party")
            .join("libadblockplus_android")
            .join("src")
            .join("third_party")
            .join("android_sdk")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_follow_checkout_convention() {
        let checkout = Checkout::new("/checkout");
        assert_eq!(
            checkout.adblock_third_party(),
            Path::new("/checkout/src/third_party/libadblockplus/src/third_party")
        );
        assert_eq!(
            checkout.v8_dst(),
            Path::new("/checkout/src/third_party/libadblockplus/src/third_party/v8")
        );
        assert_eq!(checkout.v8_src(), Path::new("/checkout/src/v8"));
        assert_eq!(
            checkout.android_sdk_src(),
            Path::new("/checkout/src/third_party/android_tools/sdk")
        );
        assert_eq!(
            checkout.android_sdk_dst(),
            Path::new("/checkout/src/third_party/libadblockplus_android/src/third_party/android_sdk")
        );
    }
}
