use thiserror::Error;

/// Draft field that must be non-empty before publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Title,
    Content,
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingField::Title => write!(f, "title"),
            MissingField::Content => write!(f, "content"),
        }
    }
}

#[derive(Error, Debug)]
pub enum BlogError {
    #[error("Validation error: {0} is required")]
    Validation(MissingField),

    #[error("Post store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Blog not initialized. Run 'mdblog init' first.")]
    NotInitialized,

    #[error("Blog already initialized at {0}")]
    AlreadyInitialized(String),
}

impl From<reqwest::Error> for BlogError {
    fn from(err: reqwest::Error) -> Self {
        BlogError::StoreUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BlogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let err = BlogError::Validation(MissingField::Title);
        assert_eq!(err.to_string(), "Validation error: title is required");

        let err = BlogError::Validation(MissingField::Content);
        assert!(err.to_string().contains("content"));
    }
}
