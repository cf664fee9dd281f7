/// Best-effort MIME type guessing from the file extension.
///
/// Lookup goes through `mime_guess`'s extension table; the first listed
/// type wins. File contents are never read.

/// Fallback MIME label when the extension is missing or unknown.
pub const UNKNOWN: &str = "unknown";

/// MIME type for a lower-cased extension (no dot), or [`UNKNOWN`].
pub fn guess(ext: &str) -> String {
    if ext.is_empty() {
        return UNKNOWN.to_string();
    }
    mime_guess::from_ext(ext)
        .first()
        .map_or_else(|| UNKNOWN.to_string(), |m| m.to_string())
}
