use lopdf::Document;

use super::ExtractError;

/// Parses `data` as a PDF and extracts the text of up to `max_pages` pages,
/// in page order. Each page keeps its own result so one broken page does not
/// sink the document.
pub fn read_pages(
    data: &[u8],
    max_pages: usize,
) -> Result<Vec<Result<String, lopdf::Error>>, ExtractError> {
    let doc = Document::load_mem(data).map_err(|e| ExtractError::Unreadable(e.to_string()))?;

    // get_pages is keyed by 1-based page number, so iteration is page order
    Ok(doc
        .get_pages()
        .keys()
        .take(max_pages)
        .map(|&page_num| doc.extract_text(&[page_num]))
        .collect())
}
