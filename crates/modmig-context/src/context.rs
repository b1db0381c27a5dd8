use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use modmig_core::errors::{ErrorInfo, MigrationError};
use modmig_core::{DataTree, StructuralOps};
use walkdir::WalkDir;

fn io_error(code: &str, path: &Path, err: impl ToString) -> MigrationError {
    MigrationError::Io(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

fn not_found(path: &Path) -> MigrationError {
    MigrationError::Io(
        ErrorInfo::new("modmig.file_not_found", "source file does not exist")
            .with_context("path", path.display().to_string()),
    )
}

fn build_globset(pattern: &str) -> Result<GlobSet, MigrationError> {
    let mut builder = GlobSetBuilder::new();
    builder.add(Glob::new(pattern).map_err(|err| {
        MigrationError::Io(
            ErrorInfo::new("modmig.bad_pattern", err.to_string())
                .with_context("pattern", pattern.to_string()),
        )
    })?);
    builder.build().map_err(|err| {
        MigrationError::Io(
            ErrorInfo::new("modmig.bad_pattern", err.to_string())
                .with_context("pattern", pattern.to_string()),
        )
    })
}

/// Filesystem capability object handed to structural migrations.
///
/// Every relative path is resolved against the root the context was
/// constructed with; the root itself may be a directory or a single file.
#[derive(Debug, Clone)]
pub struct MigrationContext {
    root: PathBuf,
}

impl MigrationContext {
    /// Creates a context rooted at the given path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, rel: &Path) -> PathBuf {
        self.root.join(rel)
    }

    fn list_entries(
        &self,
        pattern: &str,
        recursive: bool,
        want_dirs: bool,
    ) -> Result<Vec<PathBuf>, MigrationError> {
        let globset = build_globset(pattern)?;
        let mut matches = Vec::new();
        if !self.root.is_dir() {
            return Ok(matches);
        }
        let max_depth = if recursive { usize::MAX } else { 1 };
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(Result::ok)
        {
            let is_dir = entry.file_type().is_dir();
            if is_dir != want_dirs {
                continue;
            }
            let rel = match entry.path().strip_prefix(&self.root) {
                Ok(rel) => rel,
                Err(_) => continue,
            };
            if globset.is_match(rel) {
                matches.push(rel.to_path_buf());
            }
        }
        matches.sort();
        Ok(matches)
    }
}

impl StructuralOps for MigrationContext {
    fn root(&self) -> &Path {
        &self.root
    }

    fn rename_file(&self, old: &Path, new: &Path) -> Result<(), MigrationError> {
        let src = self.resolve(old);
        if !src.is_file() {
            return Err(not_found(&src));
        }
        let dst = self.resolve(new);
        fs::rename(&src, &dst).map_err(|err| io_error("modmig.context_io", &dst, err))
    }

    fn move_file(&self, src: &Path, dst: &Path) -> Result<(), MigrationError> {
        let src = self.resolve(src);
        if !src.is_file() {
            return Err(not_found(&src));
        }
        let dst = self.resolve(dst);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| io_error("modmig.context_io", parent, err))?;
        }
        fs::rename(&src, &dst).map_err(|err| io_error("modmig.context_io", &dst, err))
    }

    fn delete_file(&self, path: &Path) -> Result<(), MigrationError> {
        let target = self.resolve(path);
        if !target.exists() {
            return Ok(());
        }
        fs::remove_file(&target).map_err(|err| io_error("modmig.context_io", &target, err))
    }

    fn read_file(&self, path: &Path) -> Result<DataTree, MigrationError> {
        modmig_core::read_tree(&self.resolve(path))
    }

    fn write_file(&self, path: &Path, tree: &DataTree) -> Result<(), MigrationError> {
        modmig_core::write_tree(&self.resolve(path), tree)
    }

    fn create_dir(&self, path: &Path) -> Result<(), MigrationError> {
        let target = self.resolve(path);
        fs::create_dir_all(&target).map_err(|err| io_error("modmig.context_io", &target, err))
    }

    fn delete_dir(&self, path: &Path, recursive: bool) -> Result<(), MigrationError> {
        let target = self.resolve(path);
        if !target.exists() {
            return Ok(());
        }
        let result = if recursive {
            fs::remove_dir_all(&target)
        } else {
            fs::remove_dir(&target)
        };
        result.map_err(|err| io_error("modmig.context_io", &target, err))
    }

    fn list_files(
        &self,
        pattern: &str,
        recursive: bool,
    ) -> Result<Vec<PathBuf>, MigrationError> {
        self.list_entries(pattern, recursive, false)
    }

    fn list_dirs(
        &self,
        pattern: &str,
        recursive: bool,
    ) -> Result<Vec<PathBuf>, MigrationError> {
        self.list_entries(pattern, recursive, true)
    }
}
