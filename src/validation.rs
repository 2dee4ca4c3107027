//! Input validation for post data.

use crate::error::{BlogError, MissingField, Result};

/// Characters that would let an id escape the local posts directory.
const FORBIDDEN_ID_CHARS: &[char] = &['/', '\\', '\0'];

/// A title must be non-empty.
pub fn validate_title(title: &str) -> Result<()> {
    if title.is_empty() {
        return Err(BlogError::Validation(MissingField::Title));
    }
    Ok(())
}

/// Content must be non-empty. It is not otherwise checked or sanitized.
pub fn validate_content(content: &str) -> Result<()> {
    if content.is_empty() {
        return Err(BlogError::Validation(MissingField::Content));
    }
    Ok(())
}

/// Title first, so the alert names the title when both are missing.
pub fn validate_draft(title: &str, content: &str) -> Result<()> {
    validate_title(title)?;
    validate_content(content)
}

/// Ids from the local file store must stay inside its directory.
pub fn is_safe_file_id(id: &str) -> bool {
    !id.is_empty() && !id.contains("..") && !id.contains(FORBIDDEN_ID_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title_empty() {
        assert!(matches!(
            validate_title(""),
            Err(BlogError::Validation(MissingField::Title))
        ));
    }

    #[test]
    fn test_validate_title_whitespace_is_not_empty() {
        assert!(validate_title(" ").is_ok());
    }

    #[test]
    fn test_validate_draft_reports_title_first() {
        assert!(matches!(
            validate_draft("", ""),
            Err(BlogError::Validation(MissingField::Title))
        ));
        assert!(matches!(
            validate_draft("Title", ""),
            Err(BlogError::Validation(MissingField::Content))
        ));
        assert!(validate_draft("Title", "# Body").is_ok());
    }

    #[test]
    fn test_safe_file_id() {
        assert!(is_safe_file_id("k3j9x0a1qz7m"));
        assert!(!is_safe_file_id("../../etc/passwd"));
        assert!(!is_safe_file_id("a/b"));
        assert!(!is_safe_file_id("a\\b"));
        assert!(!is_safe_file_id(""));
    }
}
