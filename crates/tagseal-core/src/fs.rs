//! Filesystem utilities for hosts that persist submitted values.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Atomically rename a file, with fallback for platforms where rename fails if target exists.
///
/// If the rename ultimately fails, the temp file is cleaned up.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

/// Replace `destination` with `contents` via a sibling temp file.
///
/// Readers see either the old file or the new one, never a partial write.
pub fn write_atomic(destination: &Path, contents: &[u8]) -> io::Result<()> {
    let file_name = destination
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let mut temp_name = file_name.to_os_string();
    temp_name.push(format!(".tmp-{}", std::process::id()));
    let temp_path = destination.with_file_name(temp_name);

    let written = fs::File::create(&temp_path).and_then(|mut file| {
        file.write_all(contents)?;
        file.sync_all()
    });
    if let Err(err) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }
    rename_with_fallback(&temp_path, destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_rename_overwrites_existing() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("items.json.tmp");
        let dest = dir.path().join("items.json");

        File::create(&dest).unwrap().write_all(b"[]").unwrap();
        File::create(&temp).unwrap().write_all(b"[{\"value\":\"bogo:x\"}]").unwrap();

        rename_with_fallback(&temp, &dest).unwrap();

        assert!(!temp.exists());
        assert_eq!(
            fs::read_to_string(&dest).unwrap(),
            "[{\"value\":\"bogo:x\"}]"
        );
    }

    #[test]
    fn test_write_atomic_creates_and_replaces() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("items.json");

        write_atomic(&dest, b"first").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "first");

        write_atomic(&dest, b"second").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "second");

        // No temp files left behind
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_atomic_missing_directory() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("missing").join("items.json");

        assert!(write_atomic(&dest, b"x").is_err());
        assert!(!dest.exists());
    }
}
