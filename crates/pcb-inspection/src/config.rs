//! Load-time policy for inspection documents.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TreeError};

/// Deepest tree the document parsers can read.
///
/// serde_json and serde_yaml stop at 128 nested containers and every
/// board level costs two (the node map and its `Boards` list), with room
/// left for the collections and placement of the deepest board.
pub const MAX_SUPPORTED_DEPTH: usize = 60;

/// Checks and post-processing applied when a tree is decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Maximum number of tree levels accepted (panel counts as one).
    /// At most [`MAX_SUPPORTED_DEPTH`].
    pub max_depth: usize,

    /// Reject panels that contain no boards
    pub require_boards: bool,

    /// Run parent-reference propagation right after decoding
    pub propagate_on_load: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_SUPPORTED_DEPTH,
            require_boards: true,
            propagate_on_load: true,
        }
    }
}

impl TreeConfig {
    /// Create a new config builder
    pub fn builder() -> TreeConfigBuilder {
        TreeConfigBuilder::new()
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_depth: env_or("PCB_TREE_MAX_DEPTH", defaults.max_depth),
            require_boards: env_or("PCB_TREE_REQUIRE_BOARDS", defaults.require_boards),
            propagate_on_load: env_or("PCB_TREE_PROPAGATE_ON_LOAD", defaults.propagate_on_load),
        }
    }

    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TreeError::Io(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        tracing::debug!(path = %path.display(), "Loaded tree config");
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(TreeError::Config("max_depth must be at least 1".to_string()));
        }
        if self.max_depth > MAX_SUPPORTED_DEPTH {
            return Err(TreeError::Config(format!(
                "max_depth {} exceeds the supported maximum of {}",
                self.max_depth, MAX_SUPPORTED_DEPTH
            )));
        }
        Ok(())
    }
}

fn env_or<T: FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(
                key,
                value = %raw,
                fallback = %default,
                "Ignoring unparsable environment value"
            );
            default
        }),
        Err(_) => default,
    }
}

/// Builder for TreeConfig
pub struct TreeConfigBuilder {
    config: TreeConfig,
}

impl TreeConfigBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        Self {
            config: TreeConfig::default(),
        }
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    pub fn require_boards(mut self, required: bool) -> Self {
        self.config.require_boards = required;
        self
    }

    pub fn propagate_on_load(mut self, enabled: bool) -> Self {
        self.config.propagate_on_load = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> TreeConfig {
        self.config
    }
}

impl Default for TreeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
