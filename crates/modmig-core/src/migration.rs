//! Migration records and the capability traits they are applied through.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::{ErrorInfo, MigrationError};
use crate::tree::DataTree;
use crate::version::Version;

/// Transform applied to one file's parsed content tree.
///
/// The callback is opaque to the executor: whatever tree it returns is what
/// gets written back, whether it mutated in place or rebuilt from scratch.
pub type DataTransform =
    Box<dyn Fn(DataTree) -> Result<DataTree, MigrationError> + Send + Sync>;

/// Transform applied to a whole directory tree through [`StructuralOps`].
pub type StructuralTransform =
    Box<dyn Fn(&dyn StructuralOps) -> Result<(), MigrationError> + Send + Sync>;

/// Scoped file-tree operations handed to structural migrations.
///
/// All relative paths are resolved against the implementation's root before
/// use; no sandboxing guarantee is made beyond that.
pub trait StructuralOps {
    /// Root path every relative path is resolved against.
    fn root(&self) -> &Path;
    /// Renames a file; fails if the source does not exist.
    fn rename_file(&self, old: &Path, new: &Path) -> Result<(), MigrationError>;
    /// Moves a file, creating missing destination parent directories.
    fn move_file(&self, src: &Path, dst: &Path) -> Result<(), MigrationError>;
    /// Deletes a file; deleting a missing file is not an error.
    fn delete_file(&self, path: &Path) -> Result<(), MigrationError>;
    /// Reads a file's parsed content tree.
    fn read_file(&self, path: &Path) -> Result<DataTree, MigrationError>;
    /// Writes a content tree back to a file.
    fn write_file(&self, path: &Path, tree: &DataTree) -> Result<(), MigrationError>;
    /// Creates a directory (and missing parents); idempotent.
    fn create_dir(&self, path: &Path) -> Result<(), MigrationError>;
    /// Deletes a directory; missing directories are a no-op.
    fn delete_dir(&self, path: &Path, recursive: bool) -> Result<(), MigrationError>;
    /// Lists files matching a glob pattern, root-relative and sorted.
    fn list_files(&self, pattern: &str, recursive: bool)
        -> Result<Vec<PathBuf>, MigrationError>;
    /// Lists directories matching a glob pattern, root-relative and sorted.
    fn list_dirs(&self, pattern: &str, recursive: bool)
        -> Result<Vec<PathBuf>, MigrationError>;
}

/// Common surface of both migration variants; the seam the path resolver
/// is generic over.
pub trait MigrationStep {
    /// Version the step migrates from.
    fn from_version(&self) -> &Version;
    /// Version the step migrates to.
    fn to_version(&self) -> &Version;
    /// Optional human readable description.
    fn description(&self) -> Option<&str>;
}

fn identity_endpoints(from: &Version, to: &Version) -> Result<(), MigrationError> {
    if from == to {
        return Err(MigrationError::Registration(
            ErrorInfo::new(
                "modmig.identity_migration",
                "migration endpoints must differ",
            )
            .with_context("from", from.to_string())
            .with_context("to", to.to_string()),
        ));
    }
    Ok(())
}

/// Immutable description of one per-file content transformation step.
pub struct DataMigration {
    from: Version,
    to: Version,
    description: Option<String>,
    transform: DataTransform,
}

impl DataMigration {
    /// Creates a record; rejects identical endpoints.
    pub fn new(
        from: Version,
        to: Version,
        transform: DataTransform,
    ) -> Result<Self, MigrationError> {
        identity_endpoints(&from, &to)?;
        Ok(Self {
            from,
            to,
            description: None,
            transform,
        })
    }

    /// Attaches a human readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Applies the transform to one content tree.
    pub fn apply(&self, tree: DataTree) -> Result<DataTree, MigrationError> {
        (self.transform)(tree)
    }
}

impl MigrationStep for DataMigration {
    fn from_version(&self) -> &Version {
        &self.from
    }

    fn to_version(&self) -> &Version {
        &self.to
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl fmt::Debug for DataMigration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataMigration")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Immutable description of one whole-tree file operation step.
pub struct StructuralMigration {
    from: Version,
    to: Version,
    description: Option<String>,
    transform: StructuralTransform,
}

impl StructuralMigration {
    /// Creates a record; rejects identical endpoints.
    pub fn new(
        from: Version,
        to: Version,
        transform: StructuralTransform,
    ) -> Result<Self, MigrationError> {
        identity_endpoints(&from, &to)?;
        Ok(Self {
            from,
            to,
            description: None,
            transform,
        })
    }

    /// Attaches a human readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Applies the transform through the provided capability surface.
    pub fn apply(&self, ops: &dyn StructuralOps) -> Result<(), MigrationError> {
        (self.transform)(ops)
    }
}

impl MigrationStep for StructuralMigration {
    fn from_version(&self) -> &Version {
        &self.from
    }

    fn to_version(&self) -> &Version {
        &self.to
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl fmt::Debug for StructuralMigration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuralMigration")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
