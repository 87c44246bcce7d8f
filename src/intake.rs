use std::path::Path;

use walkdir::WalkDir;

use crate::error::Skip;
use crate::extract::DocumentFormat;
use crate::record::RawDocument;

/// Documents loaded from disk, plus files that looked like resumes but could
/// not be read.
#[derive(Debug, Default)]
pub struct Intake {
    pub documents: Vec<RawDocument>,
    pub unreadable: Vec<(String, Skip)>,
}

/// Recursively load every PDF/DOC/DOCX file under `dir`, in path order.
pub fn collect_documents(dir: &Path) -> Intake {
    let mut intake = Intake::default();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(dir).display().to_string();
                tracing::warn!(path = %path, error = %e, "cannot walk path");
                intake.unreadable.push((path, Skip::Unreadable(e.to_string())));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let filename = entry.file_name().to_string_lossy().into_owned();
        if DocumentFormat::from_filename(&filename).is_none() {
            continue;
        }

        match std::fs::read(path) {
            Ok(bytes) => intake.documents.push(RawDocument::new(filename, bytes)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read file");
                intake.unreadable.push((filename, Skip::Unreadable(e.to_string())));
            }
        }
    }

    tracing::info!(dir = %dir.display(), found = intake.documents.len(), "collected documents");
    intake
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_supported_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("b.PDF"), b"pdf").unwrap();
        std::fs::write(dir.path().join("a.docx"), b"docx").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"txt").unwrap();
        std::fs::write(dir.path().join("nested").join("c.doc"), b"doc").unwrap();

        let intake = collect_documents(dir.path());
        let names: Vec<_> = intake.documents.iter().map(|d| d.filename.as_str()).collect();
        assert_eq!(names, vec!["a.docx", "b.PDF", "c.doc"]);
        assert_eq!(intake.documents[1].bytes, b"pdf");
        assert!(intake.unreadable.is_empty());
    }

    #[test]
    fn missing_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("typo");
        let intake = collect_documents(&missing);

        assert!(intake.documents.is_empty());
        assert_eq!(intake.unreadable.len(), 1);
        let (path, reason) = &intake.unreadable[0];
        assert_eq!(path, &missing.display().to_string());
        assert!(matches!(reason, Skip::Unreadable(_)));
    }
}
