//! Read/write service for serialized content trees.
//!
//! The concrete save format is an external collaborator; this module treats
//! a data file as a JSON document and hands migrations the parsed tree.

use std::fs;
use std::path::Path;

use crate::errors::{ErrorInfo, MigrationError};

/// Parsed content of one data file.
pub type DataTree = serde_json::Value;

/// Extension recognized as a data file unless the caller overrides it.
pub const DATA_FILE_EXTENSION: &str = "sav";

/// Reads and parses one data file into a content tree.
pub fn read_tree(path: &Path) -> Result<DataTree, MigrationError> {
    let contents = fs::read_to_string(path).map_err(|err| {
        MigrationError::Io(
            ErrorInfo::new("modmig.tree_read", format!("failed to read data file: {err}"))
                .with_context("path", path.display().to_string()),
        )
    })?;
    serde_json::from_str(&contents).map_err(|err| {
        MigrationError::Io(
            ErrorInfo::new("modmig.tree_parse", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

/// Serializes a content tree back to its file.
pub fn write_tree(path: &Path, tree: &DataTree) -> Result<(), MigrationError> {
    let contents = serde_json::to_string_pretty(tree).map_err(|err| {
        MigrationError::Io(
            ErrorInfo::new("modmig.tree_serialize", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    fs::write(path, contents).map_err(|err| {
        MigrationError::Io(
            ErrorInfo::new("modmig.tree_write", format!("failed to write data file: {err}"))
                .with_context("path", path.display().to_string()),
        )
    })
}
