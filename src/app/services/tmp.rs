use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::app::domain::doc_type::DocFileType;
use crate::app::infrastructure::error::Result;

/// Process-wide scratch space for transient files, e.g. protected
/// documents extracted for editing. Everything is removed on drop.
pub struct TempManager {
    root: TempDir,
    counter: Cell<u32>,
}

impl TempManager {
    pub fn new() -> Result<Self> {
        let root = tempfile::Builder::new().prefix("cherrypad-").tempdir()?;
        log::debug!("Temp root at {}", root.path().display());
        Ok(Self {
            root,
            counter: Cell::new(0),
        })
    }

    pub fn root_dir(&self) -> &Path {
        self.root.path()
    }

    /// Create a fresh private directory for work derived from `visible_path`.
    pub fn hidden_dir_for(&self, visible_path: &Path) -> Result<PathBuf> {
        let n = self.counter.get() + 1;
        self.counter.set(n);

        let stem = visible_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "doc".to_string());
        let dir = self.root.path().join(format!("{n}-{stem}"));
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Path where the plain document behind `visible_path` is expanded.
    /// Protected archives map to their plain counterpart (`.ctz` -> `.ctd`).
    pub fn hidden_file_for(&self, visible_path: &Path) -> Result<PathBuf> {
        let dir = self.hidden_dir_for(visible_path)?;
        let name = DocFileType::extracted_file_name(visible_path)
            .or_else(|| visible_path.file_name().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("doc"));
        Ok(dir.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_dirs_are_unique() {
        let tmp = TempManager::new().unwrap();
        let a = tmp.hidden_dir_for(Path::new("/notes/a.ctz")).unwrap();
        let b = tmp.hidden_dir_for(Path::new("/notes/a.ctz")).unwrap();
        assert_ne!(a, b);
        assert!(a.is_dir());
        assert!(a.starts_with(tmp.root_dir()));
    }

    #[test]
    fn test_hidden_file_maps_protected_extension() {
        let tmp = TempManager::new().unwrap();
        let file = tmp.hidden_file_for(Path::new("/notes/secret.ctx")).unwrap();
        assert_eq!(file.file_name().unwrap(), "secret.ctb");
        assert!(file.parent().unwrap().is_dir());

        let file = tmp.hidden_file_for(Path::new("plain.txt")).unwrap();
        assert_eq!(file.file_name().unwrap(), "plain.txt");
    }

    #[test]
    fn test_root_removed_on_drop() {
        let tmp = TempManager::new().unwrap();
        let root = tmp.root_dir().to_path_buf();
        tmp.hidden_dir_for(Path::new("a.ctd")).unwrap();
        assert!(root.exists());
        drop(tmp);
        assert!(!root.exists());
    }
}
