//! Reading and writing inspection documents (JSON and YAML).
//!
//! Decoding enforces the [`TreeConfig`] limits and, unless disabled,
//! runs parent-reference propagation so the returned tree is ready for
//! upward navigation. Encoding relies on the field-level filters of the
//! model: empty sub-board lists are left out, other collections are
//! always written.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::board::Board;
use crate::config::TreeConfig;
use crate::error::{Result, TreeError};
use crate::navigate::depth;
use crate::object::InspectionObject;
use crate::panel::Panel;

/// External document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        ext.parse()
            .map_err(|_| TreeError::UnknownFormat(path.display().to_string()))
    }
}

impl FromStr for Format {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            other => Err(TreeError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => write!(f, "json"),
            Format::Yaml => write!(f, "yaml"),
        }
    }
}

fn parse<T: DeserializeOwned>(content: &str, format: Format) -> Result<T> {
    match format {
        Format::Json => Ok(serde_json::from_str(content)?),
        Format::Yaml => Ok(serde_yaml::from_str(content)?),
    }
}

fn prepare(root: &mut dyn InspectionObject, config: &TreeConfig) -> Result<()> {
    let levels = depth(&*root);
    if levels > config.max_depth {
        return Err(TreeError::TooDeep {
            depth: levels,
            max: config.max_depth,
        });
    }
    if config.propagate_on_load {
        root.update_parent_reference(None);
    }
    Ok(())
}

/// Decode a panel document.
pub fn decode_panel(content: &str, format: Format, config: &TreeConfig) -> Result<Panel> {
    config.validate()?;
    let mut panel: Panel = parse(content, format)?;
    if config.require_boards && panel.boards.is_empty() {
        return Err(TreeError::EmptyPanel);
    }
    prepare(&mut panel, config)?;
    tracing::debug!(%format, boards = panel.boards.len(), "Decoded panel");
    Ok(panel)
}

/// Decode a single board document (no panel wrapper).
pub fn decode_board(content: &str, format: Format, config: &TreeConfig) -> Result<Board> {
    config.validate()?;
    let mut board: Board = parse(content, format)?;
    prepare(&mut board, config)?;
    tracing::debug!(%format, "Decoded board");
    Ok(board)
}

/// Encode any node. `pretty` only affects JSON.
pub fn encode<T: Serialize + ?Sized>(node: &T, format: Format, pretty: bool) -> Result<String> {
    match format {
        Format::Json if pretty => serde_json::to_string_pretty(node)
            .map_err(|e| TreeError::Serialization(e.to_string())),
        Format::Json => {
            serde_json::to_string(node).map_err(|e| TreeError::Serialization(e.to_string()))
        }
        Format::Yaml => {
            serde_yaml::to_string(node).map_err(|e| TreeError::Serialization(e.to_string()))
        }
    }
}

/// Read a panel file; the format follows the file extension.
pub fn load_panel(path: impl AsRef<Path>, config: &TreeConfig) -> Result<Panel> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| {
        TreeError::Io(format!(
            "Failed to read panel file '{}': {}",
            path.display(),
            e
        ))
    })?;
    tracing::info!(path = %path.display(), %format, "Loading panel");
    decode_panel(&content, format, config)
}

/// Write a panel file; the format follows the file extension.
pub fn save_panel(panel: &Panel, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    let content = encode(panel, format, true)?;
    std::fs::write(path, content)?;
    tracing::info!(path = %path.display(), %format, "Saved panel");
    Ok(())
}
