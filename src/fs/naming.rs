//! Filename generation and sanitization.

/// Characters that are illegal in Windows filenames, plus `#` and `,`.
const FORBIDDEN: &[char] = &['\\', '/', '?', ':', '<', '>', '*', '|', '#', ',', '"'];

/// Check whether a character falls in one of the emoji/pictograph blocks.
fn is_pictographic(c: char) -> bool {
    matches!(
        c,
        '\u{1F600}'..='\u{1F64F}' // emoticons
            | '\u{1F300}'..='\u{1F5FF}' // symbols & pictographs
            | '\u{1F680}'..='\u{1F6FF}' // transport & map symbols
            | '\u{1F1E0}'..='\u{1F1FF}' // regional indicators
            | '\u{2702}'..='\u{27B0}' // dingbats
            | '\u{24C2}'..='\u{1F251}' // enclosed characters and everything between
    )
}

/// Remove characters that are illegal in filenames and any emoji glyphs.
///
/// Total and idempotent; ASCII alphanumerics, `_`, `-` and `.` are kept.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !FORBIDDEN.contains(c) && !is_pictographic(*c))
        .collect()
}

/// Filename of a saved asset: `{name}_{id}.{extension}`, sanitized.
pub fn asset_filename(name: &str, id: &str, extension: &str) -> String {
    sanitize(&format!("{}_{}.{}", name, id, extension))
}
