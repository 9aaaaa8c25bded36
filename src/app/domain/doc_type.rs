use std::path::{Path, PathBuf};

/// How the note tree is stored inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocStorage {
    Xml,
    Sqlite,
}

/// The four document containers the application reads.
///
/// Protected variants are password-protected 7z archives wrapping a single
/// plain document of the matching storage kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFileType {
    /// `.ctd` - XML, not protected
    Ctd,
    /// `.ctb` - SQLite, not protected
    Ctb,
    /// `.ctz` - XML, password protected
    Ctz,
    /// `.ctx` - SQLite, password protected
    Ctx,
}

impl DocFileType {
    pub const ALL: [DocFileType; 4] = [DocFileType::Ctd, DocFileType::Ctb, DocFileType::Ctz, DocFileType::Ctx];

    pub fn extension(&self) -> &'static str {
        match self {
            DocFileType::Ctd => "ctd",
            DocFileType::Ctb => "ctb",
            DocFileType::Ctz => "ctz",
            DocFileType::Ctx => "ctx",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.extension().eq_ignore_ascii_case(ext))
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn storage(&self) -> DocStorage {
        match self {
            DocFileType::Ctd | DocFileType::Ctz => DocStorage::Xml,
            DocFileType::Ctb | DocFileType::Ctx => DocStorage::Sqlite,
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(self, DocFileType::Ctz | DocFileType::Ctx)
    }

    /// The plain type a protected archive expands to.
    pub fn extracted(&self) -> DocFileType {
        match self.storage() {
            DocStorage::Xml => DocFileType::Ctd,
            DocStorage::Sqlite => DocFileType::Ctb,
        }
    }

    /// File name of the plain document extracted from `path`.
    pub fn extracted_file_name(path: &Path) -> Option<PathBuf> {
        let doc_type = Self::from_path(path)?;
        let stem = path.file_stem()?;
        let mut name = PathBuf::from(stem);
        name.set_extension(doc_type.extracted().extension());
        Some(name)
    }
}

/// Operator usage line listing every supported document suffix.
pub fn usage_text(program: &str) -> String {
    let suffixes: Vec<String> = DocFileType::ALL
        .iter()
        .map(|t| format!(".{}", t.extension()))
        .collect();
    format!("Usage: {} [filepath{}]", program, suffixes.join("|"))
}

/// Filter string for native file choosers.
///
/// FLTK format: "Description\tPattern\nDescription2\tPattern2"
pub fn documents_filter_multiline() -> String {
    [
        "CherryTree Documents\t*.{ctd,ctb,ctz,ctx}",
        "Plain Documents\t*.{ctd,ctb}",
        "Protected Documents\t*.{ctz,ctx}",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(DocFileType::from_path(Path::new("/n/a.ctd")), Some(DocFileType::Ctd));
        assert_eq!(DocFileType::from_path(Path::new("b.CTB")), Some(DocFileType::Ctb));
        assert_eq!(DocFileType::from_path(Path::new("c.ctz")), Some(DocFileType::Ctz));
        assert_eq!(DocFileType::from_path(Path::new("d.ctx")), Some(DocFileType::Ctx));
        assert_eq!(DocFileType::from_path(Path::new("notes.txt")), None);
        assert_eq!(DocFileType::from_path(Path::new("ctd")), None);
    }

    #[test]
    fn test_storage_and_protection() {
        assert_eq!(DocFileType::Ctz.storage(), DocStorage::Xml);
        assert_eq!(DocFileType::Ctx.storage(), DocStorage::Sqlite);
        assert!(DocFileType::Ctz.is_protected());
        assert!(!DocFileType::Ctb.is_protected());
        assert_eq!(DocFileType::Ctx.extracted(), DocFileType::Ctb);
        assert_eq!(DocFileType::Ctd.extracted(), DocFileType::Ctd);
    }

    #[test]
    fn test_extracted_file_name() {
        assert_eq!(
            DocFileType::extracted_file_name(Path::new("/home/u/notes.ctz")),
            Some(PathBuf::from("notes.ctd"))
        );
        assert_eq!(
            DocFileType::extracted_file_name(Path::new("work.ctx")),
            Some(PathBuf::from("work.ctb"))
        );
        assert_eq!(DocFileType::extracted_file_name(Path::new("x.txt")), None);
    }

    #[test]
    fn test_usage_text() {
        assert_eq!(usage_text("cherrypad"), "Usage: cherrypad [filepath.ctd|.ctb|.ctz|.ctx]");
    }

    #[test]
    fn test_filter_format() {
        let filter = documents_filter_multiline();
        assert!(filter.contains('\n'));
        assert!(filter.contains('\t'));
        assert!(filter.contains("*.{ctd,ctb,ctz,ctx}"));
    }
}
