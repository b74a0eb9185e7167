//! Document decoding — turns uploaded files into plain text (or a tabular
//! preview) before any section matching happens. Decode failures surface as
//! `AppError::Decode` and never reach the extractor.

use std::io::Read;
use std::path::Path;

use calamine::Reader;
use serde::Serialize;

use crate::errors::AppError;

/// Upload formats the API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Xlsx,
}

impl DocumentKind {
    /// Detects the document kind from the uploaded filename.
    pub fn from_filename(filename: &str) -> Result<Self, AppError> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "docx" => Ok(DocumentKind::Docx),
            "xlsx" => Ok(DocumentKind::Xlsx),
            _ => Err(AppError::Validation(format!(
                "Unsupported file type '{filename}' (expected .pdf, .docx, or .xlsx)"
            ))),
        }
    }
}

/// Extracts plain text from a PDF file.
///
/// Joins the text of non-empty pages with newlines. A decodable PDF with no
/// text at all yields an empty string rather than an error.
pub fn extract_pdf_text(path: &Path) -> Result<String, AppError> {
    let text = pdf_extract::extract_text(path)
        .map_err(|e| AppError::Decode(format!("Error reading PDF: {e}")))?;

    // pdf-extract separates pages with form feeds
    let pages: Vec<&str> = text
        .split('\x0c')
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .collect();
    Ok(pages.join("\n"))
}

/// Extracts plain text from a DOCX file by reading `word/document.xml` out of
/// the ZIP archive and collecting the `<w:t>` text runs of each paragraph.
/// Paragraphs are joined with newlines, empty paragraphs included, so section
/// spacing survives into the extracted text.
pub fn extract_docx_text(path: &Path) -> Result<String, AppError> {
    let file = std::fs::File::open(path)
        .map_err(|e| AppError::Decode(format!("Error reading Word document: {e}")))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| AppError::Decode(format!("Error reading Word document: {e}")))?;

    let mut doc_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| AppError::Decode("Invalid DOCX: missing word/document.xml".to_string()))?
        .read_to_string(&mut doc_xml)
        .map_err(|e| AppError::Decode(format!("Error reading Word document: {e}")))?;

    let mut reader = quick_xml::Reader::from_reader(doc_xml.as_bytes());
    let mut paragraphs: Vec<String> = Vec::new();
    let mut paragraph = String::new();
    let mut in_text_run = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(ref e)) => match e.local_name().as_ref() {
                b"p" => paragraph.clear(),
                b"t" => in_text_run = true,
                _ => {}
            },
            Ok(quick_xml::events::Event::Empty(ref e)) => {
                // <w:p/> is an empty paragraph: a blank line in the document
                if e.local_name().as_ref() == b"p" {
                    paragraphs.push(String::new());
                }
            }
            Ok(quick_xml::events::Event::End(ref e)) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(std::mem::take(&mut paragraph)),
                b"t" => in_text_run = false,
                _ => {}
            },
            Ok(quick_xml::events::Event::Text(ref e)) => {
                if in_text_run {
                    if let Ok(text) = e.unescape() {
                        paragraph.push_str(&text);
                    }
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => {
                return Err(AppError::Decode(format!("Error reading Word document: {e}")));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs.join("\n"))
}

/// Preview of an uploaded tabular dataset. Spreadsheet uploads are shown back
/// to the user, not treated as resumes.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetPreview {
    pub total_rows: usize,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

const PREVIEW_ROWS: usize = 5;

/// Reads the first sheet of a spreadsheet and returns its header, row count,
/// and the first few data rows.
pub fn preview_dataset(path: &Path) -> Result<DatasetPreview, AppError> {
    let mut workbook = calamine::open_workbook_auto(path)
        .map_err(|e| AppError::Decode(format!("Error reading spreadsheet: {e}")))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AppError::Decode("Spreadsheet has no sheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| AppError::Decode(format!("Error reading spreadsheet: {e}")))?;

    let mut rows = range.rows();
    let columns: Vec<String> = rows
        .next()
        .map(|header| {
            header
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect()
        })
        .unwrap_or_default();
    let preview: Vec<Vec<String>> = rows
        .take(PREVIEW_ROWS)
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    let total_rows = range.rows().count().saturating_sub(1);

    Ok(DatasetPreview {
        total_rows,
        columns,
        rows: preview,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_docx(document_xml: &str) -> tempfile::NamedTempFile {
        let mut cursor = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), cursor.into_inner()).unwrap();
        file
    }

    #[test]
    fn test_kind_from_filename() {
        assert_eq!(DocumentKind::from_filename("resume.pdf").unwrap(), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_filename("Resume.DOCX").unwrap(), DocumentKind::Docx);
        assert_eq!(DocumentKind::from_filename("bank.xlsx").unwrap(), DocumentKind::Xlsx);
    }

    #[test]
    fn test_kind_rejects_unknown_extensions() {
        assert!(DocumentKind::from_filename("resume.txt").is_err());
        assert!(DocumentKind::from_filename("noextension").is_err());
    }

    #[test]
    fn test_docx_text_joins_runs_within_a_paragraph() {
        let file = write_docx(
            r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Rust, </w:t></w:r><w:r><w:t>Python</w:t></w:r></w:p>
  </w:body>
</w:document>"#,
        );
        assert_eq!(extract_docx_text(file.path()).unwrap(), "Rust, Python");
    }

    #[test]
    fn test_docx_empty_paragraphs_become_blank_lines() {
        let file = write_docx(
            r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Skills</w:t></w:r></w:p>
    <w:p/>
    <w:p><w:r><w:t>Rust</w:t></w:r></w:p>
  </w:body>
</w:document>"#,
        );
        assert_eq!(extract_docx_text(file.path()).unwrap(), "Skills\n\nRust");
    }

    #[test]
    fn test_docx_feeds_section_extraction() {
        let file = write_docx(
            r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Skills</w:t></w:r></w:p>
    <w:p><w:r><w:t>Rust, SQL</w:t></w:r></w:p>
    <w:p><w:r><w:t>Experience</w:t></w:r></w:p>
    <w:p><w:r><w:t>3 years at Acme</w:t></w:r></w:p>
  </w:body>
</w:document>"#,
        );
        let text = extract_docx_text(file.path()).unwrap();
        let summary = crate::extraction::sections::extract(&text);
        match summary {
            crate::extraction::sections::ResumeSummary::Found { sections } => {
                assert_eq!(sections[&crate::extraction::sections::Section::Skills], "Rust, SQL");
                assert_eq!(
                    sections[&crate::extraction::sections::Section::Experience],
                    "3 years at Acme"
                );
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn test_docx_missing_document_xml_is_a_decode_error() {
        let mut cursor = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file("other.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"<x/>").unwrap();
            writer.finish().unwrap();
        }
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), cursor.into_inner()).unwrap();

        let err = extract_docx_text(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Decode(_)), "got {err:?}");
    }

    #[test]
    fn test_docx_garbage_bytes_are_a_decode_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not a zip archive").unwrap();
        let err = extract_docx_text(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Decode(_)), "got {err:?}");
    }

    #[test]
    fn test_pdf_garbage_bytes_are_a_decode_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-garbage").unwrap();
        let err = extract_pdf_text(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Decode(_)), "got {err:?}");
    }
}
