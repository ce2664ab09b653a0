//! Post-processing of raw model output into the final `.tex` artifact.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// A fence opening a line, optionally tagged `latex`, with the whitespace after it.
static TAGGED_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^```(?:latex)?\s*").expect("valid fence regex"));

static BARE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^```\s*").expect("valid fence regex"));

#[derive(Debug, Error, PartialEq)]
pub enum CleanError {
    #[error("The model returned no LaTeX content")]
    EmptyArtifact,
}

/// Strips markdown code fences at line starts, then surrounding whitespace.
/// Repeats until nothing changes, so the result is a fixed point: trimming can
/// expose a fence at the new start of the text. Does not check the LaTeX.
pub fn strip_code_fences(raw: &str) -> String {
    let mut current = strip_once(raw);
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_once(text: &str) -> String {
    let without_tagged = TAGGED_FENCE_RE.replace_all(text, "");
    BARE_FENCE_RE
        .replace_all(&without_tagged, "")
        .trim()
        .to_string()
}

/// Cleans the model output, rejecting a result with nothing left in it.
pub fn clean_response(raw: &str) -> Result<String, CleanError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(CleanError::EmptyArtifact);
    }
    Ok(cleaned)
}
