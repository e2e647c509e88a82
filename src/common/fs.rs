use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Create the directory if it doesn't exist; error if a non-directory exists there.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            anyhow::bail!("Path exists but is not a directory: {}", path.display());
        }
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
    }
    Ok(())
}

/// Error unless the file already exists.
pub fn require_file_exists(path: &Path) -> Result<()> {
    if !path.is_file() {
        anyhow::bail!("Required file does not exist: {}", path.display());
    }
    Ok(())
}

/// Write-then-rename wrapper so a checkpoint rewrite never leaves a torn file.
pub struct PendingWrite {
    target: PathBuf,
    tmp: Option<(NamedTempFile, bool)>, // (file, need_fsync_dir)
}

pub fn open_for_rewrite(target: &Path) -> Result<PendingWrite> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
    }
    let need_fsync_dir = target.parent().is_some();
    let tmp = NamedTempFile::new_in(target.parent().unwrap_or(Path::new(".")))
        .context("create temp file")?;

    Ok(PendingWrite { target: target.to_path_buf(), tmp: Some((tmp, need_fsync_dir)) })
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.tmp.as_mut().unwrap().0.write(buf)
    }
    fn flush(&mut self) -> std::io::Result<()> {
        self.tmp.as_mut().unwrap().0.flush()
    }
}

pub fn finalize_rewrite(mut pending: PendingWrite) -> Result<()> {
    let (tmp, need_fsync_dir) = pending.tmp.take().expect("not finalized");
    tmp.as_file().sync_all().ok(); // best-effort fsync file
    tmp.persist(&pending.target)
        .with_context(|| format!("rename to {}", pending.target.display()))?;
    if need_fsync_dir {
        if let Some(dir) = pending.target.parent() {
            let _ = File::open(dir).and_then(|f| f.sync_all());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrite_replaces_existing_contents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.csv");
        fs::write(&target, "old").unwrap();

        let mut pending = open_for_rewrite(&target).unwrap();
        pending.write_all(b"new contents").unwrap();
        finalize_rewrite(pending).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new contents");
    }

    #[test]
    fn ensure_dir_exists_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, "x").unwrap();
        assert!(ensure_dir_exists(&file).is_err());
    }
}
