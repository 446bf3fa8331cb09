use jobmatch_core::{MatchError, Result};
use std::path::Path;

/// Extract resume text from an uploaded payload. PDFs are read page by page and
/// joined with newlines; anything else is decoded as UTF-8 with invalid bytes dropped.
pub fn load_resume_text(bytes: &[u8], filename: Option<&str>) -> Result<String> {
    if bytes.is_empty() {
        return Ok(String::new());
    }
    let is_pdf = filename
        .and_then(|f| Path::new(f).extension())
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| MatchError::Data(format!("failed to extract text from PDF: {e}")))?;
        return Ok(pages.join("\n"));
    }
    Ok(decode_lossy(bytes))
}

fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|&c| c != char::REPLACEMENT_CHARACTER)
        .collect()
}
