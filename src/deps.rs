//! Source-tree duplication into the libadblockplus layout.
//!
//! The legacy gyp build resolves V8's dependencies from the library's own
//! third_party directory instead of the parent checkout, so the shared
//! trees are copied in wholesale.

use tracing::info;

use crate::error::Result;
use crate::fsops::{self, MovedAside};
use crate::layout::Checkout;

/// V8 subtrees owned by the parent checkout; copied into the duplicated V8
/// tree after the main copy.
const V8_SUBTREES: &[&[&str]] = &[
    &["base", "trace_event", "common"],
    &["build"],
    &["tools", "gyp"],
    &["tools", "clang"],
    &["third_party", "icu"],
    &["third_party", "jinja2"],
    &["third_party", "markupsafe"],
];

/// Duplicate every tree libadblockplus expects to find under its own
/// `third_party/v8`.
pub async fn prepare(checkout: &Checkout) -> Result<()> {
    let checkout = checkout.clone();
    tokio::task::spawn_blocking(move || prepare_sync(&checkout)).await?
}

fn prepare_sync(checkout: &Checkout) -> Result<()> {
    let third_party = checkout.adblock_third_party();

    // The V8 copy below wipes the destination tree, but the gtest checkout
    // under it has no counterpart in the parent checkout and must survive.
    // Park it next to the tree for the duration of the copy; the guard
    // moves it back on every exit path. This is a one-off workaround for
    // the copy being destructive, not a pattern to extend.
    let gtest = third_party.join("v8").join("testing").join("gtest");
    let parked = MovedAside::new(gtest, third_party.join("gtest.bak"))?;

    fsops::duplicate(&checkout.v8_src(), &checkout.v8_dst(), false)?;

    parked.restore()?;

    for subtree in V8_SUBTREES {
        let mut src = checkout.root().join("src");
        let mut dst = checkout.v8_dst();
        for part in *subtree {
            src.push(part);
            dst.push(part);
        }
        fsops::duplicate(&src, &dst, false)?;
    }

    info!("Dependencies prepared in {:?}", third_party);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn seed_checkout(root: &Path) {
        let v8_src = root.join("src").join("v8");
        fs::create_dir_all(v8_src.join("include")).unwrap();
        fs::write(v8_src.join("include").join("v8.h"), "// v8").unwrap();

        for subtree in V8_SUBTREES {
            let mut path = root.join("src");
            for part in *subtree {
                path.push(part);
            }
            fs::create_dir_all(&path).unwrap();
            fs::write(path.join("marker.txt"), "m").unwrap();
        }

        let gtest = root
            .join("src")
            .join("third_party")
            .join("libadblockplus")
            .join("src")
            .join("third_party")
            .join("v8")
            .join("testing")
            .join("gtest");
        fs::create_dir_all(&gtest).unwrap();
        fs::write(gtest.join("gtest.h"), "// gtest").unwrap();
    }

    #[tokio::test]
    async fn test_prepare_duplicates_trees_and_keeps_gtest() {
        let dir = tempfile::tempdir().unwrap();
        seed_checkout(dir.path());
        let checkout = Checkout::new(dir.path());

        prepare(&checkout).await.unwrap();

        let tp = checkout.adblock_third_party();
        assert!(tp.join("v8").join("include").join("v8.h").exists());
        assert_eq!(
            fs::read_to_string(
                tp.join("v8").join("testing").join("gtest").join("gtest.h")
            )
            .unwrap(),
            "// gtest"
        );
        assert!(!tp.join("gtest.bak").exists());
        assert!(tp.join("v8").join("build").join("marker.txt").exists());
        assert!(tp
            .join("v8")
            .join("third_party")
            .join("icu")
            .join("marker.txt")
            .exists());
    }

    #[tokio::test]
    async fn test_failed_copy_still_restores_gtest() {
        let dir = tempfile::tempdir().unwrap();
        seed_checkout(dir.path());
        fs::remove_dir_all(dir.path().join("src").join("v8")).unwrap();
        let checkout = Checkout::new(dir.path());

        assert!(prepare(&checkout).await.is_err());

        let tp = checkout.adblock_third_party();
        assert!(tp
            .join("v8")
            .join("testing")
            .join("gtest")
            .join("gtest.h")
            .exists());
        assert!(!tp.join("gtest.bak").exists());
    }
}
