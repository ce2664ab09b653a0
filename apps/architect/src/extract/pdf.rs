use super::{ExtractError, ExtractedText, UploadedDocument};

/// Runs the PDF library over the document and joins its pages.
/// Blocking: call from `spawn_blocking`.
pub fn extract_pages(document: &UploadedDocument) -> Result<ExtractedText, ExtractError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(&document.bytes).map_err(|e| {
        ExtractError::Pdf {
            filename: document.filename.clone(),
            message: e.to_string(),
        }
    })?;

    Ok(join_pages(pages.into_iter().map(Some)))
}

/// Joins page texts with `\n`, in the order given. A page with no text
/// contributes an empty string and is recorded in `empty_pages`.
pub fn join_pages<I>(pages: I) -> ExtractedText
where
    I: IntoIterator<Item = Option<String>>,
{
    let mut texts = Vec::new();
    let mut empty_pages = Vec::new();

    for (index, page) in pages.into_iter().enumerate() {
        let text = page.unwrap_or_default();
        if text.trim().is_empty() {
            empty_pages.push(index + 1);
        }
        texts.push(text);
    }

    ExtractedText {
        text: texts.join("\n"),
        empty_pages,
    }
}
