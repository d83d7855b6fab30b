//! Error types for loading, validating and writing inspection trees.
//!
//! Defect aggregation and parent propagation are total and never fail;
//! errors only arise at the document boundary and in link verification.

use thiserror::Error;

/// Main error type for inspection tree operations
#[derive(Error, Debug)]
pub enum TreeError {
    /// Document could not be parsed into a tree
    #[error("Parse error ({format}): {message}")]
    Parse { format: String, message: String },

    /// File access or I/O error
    #[error("File error: {0}")]
    Io(String),

    /// Tree could not be written out
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File extension or format name not recognised
    #[error("Unknown document format: {0}")]
    UnknownFormat(String),

    /// Panel holds no boards
    #[error("Panel contains no boards")]
    EmptyPanel,

    /// Tree nests deeper than the configured limit
    #[error("Tree depth {depth} exceeds limit {max}")]
    TooDeep { depth: usize, max: usize },

    /// A node's parent link disagrees with the tree structure
    #[error("Stale parent reference at {path}")]
    StaleParent { path: String },

    /// Attribute key collides with a field the model serializes itself
    #[error("Attribute key '{0}' is reserved")]
    ReservedAttribute(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TreeError {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        TreeError::Parse {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Check if this error stems from caller input (vs internal)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            TreeError::Parse { .. }
                | TreeError::Io(_)
                | TreeError::UnknownFormat(_)
                | TreeError::EmptyPanel
                | TreeError::TooDeep { .. }
                | TreeError::ReservedAttribute(_)
                | TreeError::Config(_)
        )
    }
}

impl From<std::io::Error> for TreeError {
    fn from(err: std::io::Error) -> Self {
        TreeError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TreeError {
    fn from(err: serde_json::Error) -> Self {
        TreeError::parse("json", err.to_string())
    }
}

impl From<serde_yaml::Error> for TreeError {
    fn from(err: serde_yaml::Error) -> Self {
        TreeError::parse("yaml", err.to_string())
    }
}

impl From<toml::de::Error> for TreeError {
    fn from(err: toml::de::Error) -> Self {
        TreeError::Config(err.to_string())
    }
}

/// Result type alias for inspection tree operations
pub type Result<T> = std::result::Result<T, TreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TreeError::TooDeep { depth: 9, max: 8 };
        assert_eq!(err.to_string(), "Tree depth 9 exceeds limit 8");

        let err = TreeError::parse("yaml", "bad indent");
        assert_eq!(err.to_string(), "Parse error (yaml): bad indent");
    }

    #[test]
    fn test_is_user_error() {
        assert!(TreeError::EmptyPanel.is_user_error());
        assert!(TreeError::Io("missing".to_string()).is_user_error());
        assert!(!TreeError::Serialization("boom".to_string()).is_user_error());
        assert!(!TreeError::StaleParent {
            path: "/".to_string()
        }
        .is_user_error());
    }

    #[test]
    fn test_json_error_converts_to_parse() {
        let err: TreeError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, TreeError::Parse { ref format, .. } if format == "json"));
    }
}
