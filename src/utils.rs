use std::borrow::Cow;
use std::path::Path;

use encoding_rs::WINDOWS_1252;

/// Decodes one line of raw bytes. Lines that are not valid UTF-8 fall back to
/// Windows-1252 so a stray byte never stops a comparison.
pub fn decode_line(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_owned(),
        Err(_) => {
            let (res, _, _) = WINDOWS_1252.decode(bytes);
            res.into_owned()
        }
    }
}

/// Strips a single trailing `\n` or `\r\n`.
pub fn strip_eol(bytes: &[u8]) -> &[u8] {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Relative path rendered with forward slashes, whatever the platform.
pub fn display_rel(rel: &Path) -> Cow<'_, str> {
    let s = rel.to_string_lossy();
    if s.contains('\\') {
        Cow::Owned(s.replace('\\', "/"))
    } else {
        s
    }
}
