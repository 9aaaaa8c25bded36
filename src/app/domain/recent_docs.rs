use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum number of entries kept in the recent-document list.
pub const RECENT_DOCS_MAX: usize = 10;

/// Recently opened document paths, most recent first.
///
/// Entries are unique: re-adding a path relocates it instead of
/// inserting a duplicate. The list never grows past its bound; overflow
/// is dropped from the back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PathBuf>", into = "Vec<PathBuf>")]
pub struct RecentDocs {
    paths: Vec<PathBuf>,
    max_len: usize,
}

impl RecentDocs {
    pub fn new() -> Self {
        Self::with_max_len(RECENT_DOCS_MAX)
    }

    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            paths: Vec::new(),
            max_len,
        }
    }

    pub fn front(&self) -> Option<&Path> {
        self.paths.first().map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    /// Move `path` to the front, inserting it if absent.
    pub fn move_or_push_front(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.remove(&path);
        self.paths.insert(0, path);
        self.enforce_max_len();
    }

    /// Move `path` to the back, inserting it if absent.
    pub fn move_or_push_back(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.remove(&path);
        self.paths.push(path);
        self.enforce_max_len();
    }

    /// Remove `path`. Returns true if it was present.
    pub fn remove(&mut self, path: &Path) -> bool {
        let before = self.paths.len();
        self.paths.retain(|p| p != path);
        self.paths.len() != before
    }

    fn enforce_max_len(&mut self) {
        self.paths.truncate(self.max_len);
    }
}

impl Default for RecentDocs {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<PathBuf>> for RecentDocs {
    fn from(paths: Vec<PathBuf>) -> Self {
        // Old or hand-edited configs may carry duplicates; keep the first occurrence
        let mut recent = Self::new();
        for path in paths {
            if !recent.contains(&path) {
                recent.paths.push(path);
            }
        }
        recent.enforce_max_len();
        recent
    }
}

impl From<RecentDocs> for Vec<PathBuf> {
    fn from(recent: RecentDocs) -> Self {
        recent.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(recent: &RecentDocs) -> Vec<&str> {
        recent.iter().map(|p| p.to_str().unwrap()).collect()
    }

    #[test]
    fn test_push_front_orders_most_recent_first() {
        let mut recent = RecentDocs::new();
        recent.move_or_push_front("a.ctb");
        recent.move_or_push_front("b.ctd");
        assert_eq!(paths(&recent), vec!["b.ctd", "a.ctb"]);
        assert_eq!(recent.front(), Some(Path::new("b.ctd")));
    }

    #[test]
    fn test_push_front_is_idempotent() {
        let mut recent = RecentDocs::new();
        recent.move_or_push_front("a.ctb");
        recent.move_or_push_front("b.ctd");
        recent.move_or_push_front("a.ctb");
        recent.move_or_push_front("a.ctb");
        assert_eq!(recent.len(), 2);
        assert_eq!(paths(&recent), vec!["a.ctb", "b.ctd"]);
    }

    #[test]
    fn test_push_back_demotes_existing_entry() {
        let mut recent = RecentDocs::new();
        recent.move_or_push_back("a.ctb");
        recent.move_or_push_back("b.ctd");
        recent.move_or_push_back("a.ctb");
        recent.move_or_push_back("a.ctb");
        assert_eq!(recent.len(), 2);
        assert_eq!(paths(&recent), vec!["b.ctd", "a.ctb"]);
    }

    #[test]
    fn test_push_back_of_sole_entry_keeps_list() {
        let mut recent = RecentDocs::new();
        recent.move_or_push_front("missing.ctb");
        recent.move_or_push_back("missing.ctb");
        assert_eq!(paths(&recent), vec!["missing.ctb"]);
    }

    #[test]
    fn test_bounded_length() {
        let mut recent = RecentDocs::with_max_len(3);
        for name in ["a", "b", "c", "d"] {
            recent.move_or_push_front(format!("{name}.ctd"));
        }
        assert_eq!(paths(&recent), vec!["d.ctd", "c.ctd", "b.ctd"]);

        // A new entry pushed to the back of a full list does not fit
        recent.move_or_push_back("e.ctd");
        assert_eq!(paths(&recent), vec!["d.ctd", "c.ctd", "b.ctd"]);
    }

    #[test]
    fn test_remove() {
        let mut recent = RecentDocs::new();
        recent.move_or_push_front("a.ctb");
        assert!(recent.remove(Path::new("a.ctb")));
        assert!(!recent.remove(Path::new("a.ctb")));
        assert!(recent.is_empty());
    }

    #[test]
    fn test_deserialize_drops_duplicates() {
        let recent: RecentDocs = serde_json::from_str(r#"["a.ctb", "b.ctd", "a.ctb"]"#).unwrap();
        assert_eq!(paths(&recent), vec!["a.ctb", "b.ctd"]);

        let json = serde_json::to_string(&recent).unwrap();
        assert_eq!(json, r#"["a.ctb","b.ctd"]"#);
    }
}
