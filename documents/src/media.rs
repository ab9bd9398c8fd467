//! Media type helpers.

use std::path::Path;

/// Media type of PDF documents.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Media type of plain text documents.
pub const TEXT_MEDIA_TYPE: &str = "text/plain";

/// Lower-case a declared media type and drop any parameters
/// (`Application/PDF; charset=binary` becomes `application/pdf`).
pub fn normalize_media_type(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Whether `media_type` is one of `accepted`, ignoring case and parameters.
pub fn is_accepted<S: AsRef<str>>(media_type: &str, accepted: &[S]) -> bool {
    let normalized = normalize_media_type(media_type);
    accepted
        .iter()
        .any(|candidate| normalize_media_type(candidate.as_ref()) == normalized)
}

/// Guess a media type from a file extension, falling back to
/// `application/octet-stream`.
pub fn guess_media_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_strips_parameters() {
        assert_eq!(
            normalize_media_type(" Application/PDF; charset=binary"),
            "application/pdf"
        );
    }

    #[test]
    fn test_is_accepted() {
        let accepted = vec![PDF_MEDIA_TYPE.to_string()];
        assert!(is_accepted("application/pdf", &accepted));
        assert!(is_accepted("APPLICATION/PDF", &accepted));
        assert!(!is_accepted("image/png", &accepted));
        assert!(!is_accepted("", &accepted));
    }

    #[test]
    fn test_guess_media_type() {
        assert_eq!(guess_media_type(Path::new("resume.pdf")), PDF_MEDIA_TYPE);
        assert_eq!(guess_media_type(Path::new("notes.txt")), TEXT_MEDIA_TYPE);
        assert_eq!(
            guess_media_type(Path::new("no_extension")),
            "application/octet-stream"
        );
    }
}
