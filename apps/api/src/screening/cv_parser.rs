use crate::errors::AppError;

/// Extracts the text of a PDF held in memory.
///
/// Pages that yield no text are skipped; the rest are joined with newlines.
/// CPU-bound: async callers should run this on the blocking pool.
pub fn parse_pdf(bytes: &[u8]) -> Result<String, AppError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| AppError::Pdf(e.to_string()))?;
    Ok(join_pages(pages))
}

fn join_pages(pages: Vec<String>) -> String {
    pages
        .into_iter()
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
