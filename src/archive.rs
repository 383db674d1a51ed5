//! Zip extraction with permission restoration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;
use zip::ZipArchive;

use crate::error::{PrepError, Result};

/// Extract `archive` into `target_dir`, restoring the Unix permission bits
/// recorded in each entry's external attributes. Entries whose names would
/// escape `target_dir` are rejected.
pub async fn extract_zip(archive: &Path, target_dir: &Path) -> Result<()> {
    info!("Extracting {:?} to {:?}", archive, target_dir);

    let archive = archive.to_path_buf();
    let target_dir = target_dir.to_path_buf();

    // The zip crate is synchronous; run the whole pass off the runtime.
    tokio::task::spawn_blocking(move || extract_zip_sync(&archive, &target_dir)).await?
}

fn extract_zip_sync(archive: &Path, target_dir: &Path) -> Result<()> {
    let file = fs::File::open(archive)?;
    let mut zip = ZipArchive::new(file).map_err(|e| PrepError::Extraction(e.to_string()))?;

    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .map_err(|e| PrepError::Extraction(e.to_string()))?;

        let rel: PathBuf = match entry.enclosed_name() {
            Some(rel) => rel.to_path_buf(),
            None => {
                return Err(PrepError::Extraction(format!(
                    "entry {:?} escapes the target directory",
                    entry.name()
                )))
            }
        };
        let out_path = target_dir.join(rel);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = fs::File::create(&out_path)?;
            io::copy(&mut entry, &mut out)?;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                fs::set_permissions(&out_path, fs::Permissions::from_mode(mode))?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn write_fixture(path: &Path) {
        let file = fs::File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        zip.add_directory("pkg/", FileOptions::default().unix_permissions(0o755))
            .unwrap();
        zip.start_file("pkg/tool", FileOptions::default().unix_permissions(0o755))
            .unwrap();
        zip.write_all(b"#!/bin/sh\n").unwrap();
        zip.start_file("pkg/data.txt", FileOptions::default().unix_permissions(0o644))
            .unwrap();
        zip.write_all(b"data").unwrap();
        zip.finish().unwrap();
    }

    #[tokio::test]
    async fn test_extract_restores_contents_and_modes() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("fixture.zip");
        write_fixture(&archive);

        let target = dir.path().join("out");
        extract_zip(&archive, &target).await.unwrap();

        assert_eq!(
            fs::read_to_string(target.join("pkg").join("data.txt")).unwrap(),
            "data"
        );

        use std::os::unix::fs::PermissionsExt;
        let tool_mode = fs::metadata(target.join("pkg").join("tool"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(tool_mode & 0o777, 0o755);
        let data_mode = fs::metadata(target.join("pkg").join("data.txt"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(data_mode & 0o777, 0o644);
    }

    #[tokio::test]
    async fn test_extract_rejects_escaping_entries() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("evil.zip");
        let file = fs::File::create(&archive).unwrap();
        let mut zip = ZipWriter::new(file);
        zip.start_file("../evil.txt", FileOptions::default()).unwrap();
        zip.write_all(b"x").unwrap();
        zip.finish().unwrap();

        let target = dir.path().join("out");
        assert!(extract_zip(&archive, &target).await.is_err());
        assert!(!dir.path().join("evil.txt").exists());
    }
}
