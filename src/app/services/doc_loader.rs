use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::app::domain::doc_type::{DocFileType, DocStorage};
use crate::app::infrastructure::error::{AppError, Result};

const SQLITE_MAGIC: &[u8] = b"SQLite format 3\0";
const SEVEN_ZIP_MAGIC: &[u8] = &[b'7', b'z', 0xBC, 0xAF, 0x27, 0x1C];
const XML_ROOT: &str = "<cherrytree";

/// A document whose container has been recognised and checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbedDocument {
    pub path: PathBuf,
    pub file_type: DocFileType,
    /// Full XML text for unprotected XML documents
    pub xml: Option<String>,
}

/// Classify `path` by extension and verify its container signature.
pub fn probe_document(path: &Path) -> Result<ProbedDocument> {
    let file_type =
        DocFileType::from_path(path).ok_or_else(|| AppError::UnsupportedFileType(path.to_path_buf()))?;

    let xml = if file_type.is_protected() {
        check_magic(path, SEVEN_ZIP_MAGIC, "7z archive")?;
        None
    } else {
        match file_type.storage() {
            DocStorage::Xml => {
                let text = fs::read_to_string(path)?;
                if !text.contains(XML_ROOT) {
                    return Err(AppError::Document(format!(
                        "{} has no {}> root element",
                        path.display(),
                        XML_ROOT
                    )));
                }
                Some(text)
            }
            DocStorage::Sqlite => {
                check_magic(path, SQLITE_MAGIC, "SQLite database")?;
                None
            }
        }
    };

    Ok(ProbedDocument {
        path: path.to_path_buf(),
        file_type,
        xml,
    })
}

fn check_magic(path: &Path, magic: &[u8], what: &str) -> Result<()> {
    let mut header = vec![0u8; magic.len()];
    let mut file = File::open(path)?;
    let matches = file.read_exact(&mut header).is_ok() && header == magic;
    if matches {
        Ok(())
    } else {
        Err(AppError::Document(format!("{} is not a {}", path.display(), what)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_probe_xml_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "notes.ctd",
            br#"<?xml version="1.0"?><cherrytree><node name="a"/></cherrytree>"#,
        );
        let doc = probe_document(&path).unwrap();
        assert_eq!(doc.file_type, DocFileType::Ctd);
        assert!(doc.xml.unwrap().contains("<node name=\"a\"/>"));
    }

    #[test]
    fn test_probe_rejects_foreign_xml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "notes.ctd", b"<html></html>");
        assert!(matches!(probe_document(&path), Err(AppError::Document(_))));
    }

    #[test]
    fn test_probe_sqlite_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = SQLITE_MAGIC.to_vec();
        bytes.extend_from_slice(&[0u8; 84]);
        let path = write(dir.path(), "notes.ctb", &bytes);
        let doc = probe_document(&path).unwrap();
        assert_eq!(doc.file_type, DocFileType::Ctb);
        assert!(doc.xml.is_none());

        let short = write(dir.path(), "short.ctb", b"SQL");
        assert!(matches!(probe_document(&short), Err(AppError::Document(_))));
    }

    #[test]
    fn test_probe_protected_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = SEVEN_ZIP_MAGIC.to_vec();
        bytes.extend_from_slice(&[0u8; 26]);
        let path = write(dir.path(), "secret.ctz", &bytes);
        assert_eq!(probe_document(&path).unwrap().file_type, DocFileType::Ctz);

        let fake = write(dir.path(), "secret.ctx", SQLITE_MAGIC);
        assert!(probe_document(&fake).is_err());
    }

    #[test]
    fn test_probe_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "notes.txt", b"hello");
        assert!(matches!(probe_document(&path), Err(AppError::UnsupportedFileType(_))));
    }

    #[test]
    fn test_probe_missing_file() {
        let err = probe_document(Path::new("/nonexistent/dir/a.ctd")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
