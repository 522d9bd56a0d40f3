//! Resume text extraction. PDF via `pdf-extract`; plain text as UTF-8.

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    PlainText,
}

impl ResumeFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ResumeFormat::Pdf => "application/pdf",
            ResumeFormat::PlainText => "text/plain",
        }
    }
}

/// Picks a format from the file extension, falling back to the declared
/// content type. DOCX and anything else unrecognised is rejected.
pub fn detect_format(filename: &str, content_type: Option<&str>) -> Result<ResumeFormat, AppError> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => return Ok(ResumeFormat::Pdf),
        Some("txt" | "text" | "md") => return Ok(ResumeFormat::PlainText),
        _ => {}
    }

    match content_type.map(|c| c.to_ascii_lowercase()) {
        Some(c) if c == "application/pdf" => Ok(ResumeFormat::Pdf),
        Some(c) if c.starts_with("text/") => Ok(ResumeFormat::PlainText),
        _ => Err(AppError::Validation(format!(
            "Unsupported resume format for '{filename}': upload a PDF or plain-text file"
        ))),
    }
}

/// Extracts plain text. Blocking and CPU-bound for PDFs; call from
/// `spawn_blocking` in async code.
pub fn extract_text(format: ResumeFormat, bytes: &[u8]) -> Result<String, AppError> {
    let raw = match format {
        ResumeFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?,
        ResumeFormat::PlainText => String::from_utf8(bytes.to_vec()).map_err(|_| {
            AppError::UnprocessableEntity("Text resume is not valid UTF-8".to_string())
        })?,
    };
    Ok(clean_text(&raw))
}

/// Drops NUL and other control characters (PostgreSQL TEXT rejects NUL) and
/// trims surrounding whitespace. Line breaks and tabs are kept.
pub fn clean_text(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t'))
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(detect_format("cv.PDF", None).unwrap(), ResumeFormat::Pdf);
        assert_eq!(
            detect_format("cv.txt", Some("application/octet-stream")).unwrap(),
            ResumeFormat::PlainText
        );
        assert_eq!(detect_format("notes.md", None).unwrap(), ResumeFormat::PlainText);
    }

    #[test]
    fn test_detect_falls_back_to_content_type() {
        assert_eq!(
            detect_format("resume", Some("application/pdf")).unwrap(),
            ResumeFormat::Pdf
        );
        assert_eq!(
            detect_format("resume", Some("text/plain; charset=utf-8")).unwrap(),
            ResumeFormat::PlainText
        );
    }

    #[test]
    fn test_docx_is_rejected() {
        let result = detect_format(
            "cv.docx",
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        );
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(matches!(
            detect_format("cv", None),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_extract_plain_text() {
        let text = extract_text(ResumeFormat::PlainText, b"  Rust engineer\n\0Kafka \r\n").unwrap();
        assert_eq!(text, "Rust engineer\nKafka");
    }

    #[test]
    fn test_extract_rejects_invalid_utf8() {
        let result = extract_text(ResumeFormat::PlainText, &[0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(AppError::UnprocessableEntity(_))));
    }

    #[test]
    fn test_extract_rejects_garbage_pdf() {
        let result = extract_text(ResumeFormat::Pdf, b"definitely not a pdf");
        assert!(matches!(result, Err(AppError::UnprocessableEntity(_))));
    }

    #[test]
    fn test_empty_text_is_accepted() {
        assert_eq!(extract_text(ResumeFormat::PlainText, b"   ").unwrap(), "");
    }
}
