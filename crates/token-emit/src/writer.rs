//! Artifact output
//!
//! Generated files are written to a sibling temp file first and then renamed
//! over the target, so a failed write never leaves a truncated artifact.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Write `contents` to `path`, replacing any existing file
pub fn write_artifact(path: &Path, contents: &str) -> io::Result<()> {
    let temp_path = temp_path_for(path);

    let result = write_then_rename(&temp_path, path, contents);
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_then_rename(temp_path: &Path, path: &Path, contents: &str) -> io::Result<()> {
    let mut file = fs::File::create(temp_path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    drop(file);

    fs::rename(temp_path, path)
}

/// `tokens.css` → `tokens.css.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_temp_path_keeps_extension() {
        assert_eq!(temp_path_for(Path::new("out/tokens.css")), PathBuf::from("out/tokens.css.tmp"));
        assert_eq!(temp_path_for(Path::new("out/tokens.ts")), PathBuf::from("out/tokens.ts.tmp"));
    }

    #[test]
    fn test_write_artifact_creates_and_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tokens.css");

        write_artifact(&path, "first").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");

        write_artifact(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!temp_dir.path().join("tokens.css.tmp").exists());
    }

    #[test]
    fn test_write_artifact_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("tokens.ts");

        assert!(write_artifact(&path, "x").is_err());
        assert!(!path.exists());
    }
}
