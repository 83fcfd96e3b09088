//! Magic-number signatures of common binary formats

/// (signature, format) pairs checked against the start of a file
pub static SIGNATURES: &[(&[u8], &str)] = &[
    (b"\x89PNG\r\n\x1a\n", "png"),
    (b"\xff\xd8\xff", "jpeg"),
    (b"GIF8", "gif"),
    (b"PK\x03\x04", "zip"),
    (b"%PDF", "pdf"),
];

/// Name of the format whose signature prefixes `header`, if any
pub fn matches_signature(header: &[u8]) -> Option<&'static str> {
    SIGNATURES
        .iter()
        .find(|(magic, _)| header.starts_with(magic))
        .map(|(_, format)| *format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signatures() {
        assert_eq!(matches_signature(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"), Some("png"));
        assert_eq!(matches_signature(b"\xff\xd8\xff\xe0"), Some("jpeg"));
        assert_eq!(matches_signature(b"GIF89a"), Some("gif"));
        assert_eq!(matches_signature(b"PK\x03\x04rest"), Some("zip"));
        assert_eq!(matches_signature(b"%PDF-1.7"), Some("pdf"));
    }

    #[test]
    fn test_short_or_plain_headers() {
        assert_eq!(matches_signature(b"PK"), None);
        assert_eq!(matches_signature(b"fn main() {}"), None);
        assert_eq!(matches_signature(b""), None);
    }
}
