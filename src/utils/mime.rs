//! MIME type detection for uploaded files

/// Guess MIME by inspecting bytes (magic numbers)
pub fn guess_mime_from_bytes(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|k| k.mime_type().to_string())
}

/// Guess MIME by file path (extension-based)
pub fn guess_mime_from_path(path: &str) -> Option<String> {
    mime_guess::from_path(path)
        .first_raw()
        .map(|s| s.to_string())
}

/// Combined guess: prefer bytes, fall back to extension, otherwise octet-stream
pub fn guess_mime(bytes: Option<&[u8]>, path: Option<&str>) -> String {
    if let Some(b) = bytes
        && let Some(m) = guess_mime_from_bytes(b)
    {
        return m;
    }
    if let Some(p) = path
        && let Some(m) = guess_mime_from_path(p)
    {
        return m;
    }
    crate::defaults::upload::FALLBACK_MIME.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_magic_wins_over_extension() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        assert_eq!(guess_mime(Some(&png), Some("avatar.txt")), "image/png");
    }

    #[test]
    fn extension_used_when_bytes_unknown() {
        assert_eq!(guess_mime(Some(b"plain words"), Some("notes.json")), "application/json");
    }

    #[test]
    fn falls_back_to_octet_stream() {
        assert_eq!(guess_mime(Some(b"\x00\x01"), Some("blob")), "application/octet-stream");
        assert_eq!(guess_mime(None, None), "application/octet-stream");
    }
}
