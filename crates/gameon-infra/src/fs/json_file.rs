//! Small file helpers shared by the JSON-backed adapters.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;

/// Reads a file, mapping "not found" to `None`.
pub async fn read_to_string_opt(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("read failed: {}", path.display())),
    }
}

/// Writes `content` next to `path` and renames it into place.
///
/// Readers observe either the previous file or the complete new one.
pub async fn atomic_write(path: &Path, content: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("create dir failed: {}", dir.display()))?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);
    fs::write(tmp_path, content)
        .await
        .with_context(|| format!("write temp file failed: {}", tmp_path.display()))?;

    // TODO: rename over an existing file is not atomic on Windows; macOS/Linux OK.
    fs::rename(tmp_path, path).await.with_context(|| {
        format!(
            "rename temp file to target failed: {} -> {}",
            tmp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            read_to_string_opt(&dir.path().join("nope.json")).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn atomic_write_creates_parents_and_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b.json");

        atomic_write(&path, "1").await.unwrap();
        atomic_write(&path, "2").await.unwrap();

        assert_eq!(read_to_string_opt(&path).await.unwrap().as_deref(), Some("2"));
        assert!(!dir.path().join("a").join("b.json.tmp").exists());
    }
}
