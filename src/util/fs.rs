//! Filesystem utilities.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Read a file as text, replacing invalid UTF-8 sequences.
pub fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read file: {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write a string to a file as UTF-8, creating parent directories if needed.
///
/// The file is flushed and closed before returning, on success and on error.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let file =
        File::create(path).with_context(|| format!("failed to create file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents.as_bytes())
        .and_then(|_| writer.flush())
        .with_context(|| format!("failed to write file: {}", path.display()))
}

/// Render a path the way Ant expects it in a build file (forward slashes).
pub fn ant_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}

/// Path relative to `base` with forward slashes, used for pattern matching.
pub fn relative_slash_path(base: &Path, path: &Path) -> String {
    let relative = relative_path(base, path);
    ant_path(&relative)
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_string_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a/b/checkstyle-build.xml");

        write_string(&path, "<project/>").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<project/>");
    }

    #[test]
    fn test_write_string_into_file_parent_fails() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        assert!(write_string(&blocker.join("build.xml"), "<project/>").is_err());
    }

    #[test]
    fn test_read_lossy() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Latin1.java");
        fs::write(&path, [b'a', 0xE9, b'b']).unwrap();

        let text = read_lossy(&path).unwrap();
        assert!(text.starts_with('a'));
        assert!(text.ends_with('b'));
    }

    #[test]
    fn test_relative_slash_path() {
        let base = Path::new("/ws/src");
        let path = Path::new("/ws/src/com/acme/Foo.java");
        assert_eq!(relative_slash_path(base, path), "com/acme/Foo.java");
    }
}
