use std::path::PathBuf;

use modmig_core::errors::{ErrorInfo, MigrationError};
use modmig_core::{read_tree, write_tree, MigrationStep, StructuralOps, DATA_FILE_EXTENSION};
use modmig_context::MigrationContext;
use serde::Serialize;

use crate::chain::MigrationChain;

/// Knobs for one chain execution.
#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    /// Extension (without the dot) recognizing data files under a
    /// directory root.
    pub data_extension: String,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            data_extension: DATA_FILE_EXTENSION.to_string(),
        }
    }
}

/// Counters describing what one chain execution touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionSummary {
    /// Structural steps applied.
    pub structural_applied: usize,
    /// Data steps applied (each to the whole file set).
    pub data_applied: usize,
    /// File rewrites performed by the data phase.
    pub files_rewritten: usize,
}

fn step_error(
    code: &str,
    step: &dyn MigrationStep,
    cause: &MigrationError,
) -> MigrationError {
    let mut info = ErrorInfo::new(code, "migration step failed")
        .with_context("from", step.from_version().to_string())
        .with_context("to", step.to_version().to_string())
        .with_context("cause", cause.to_string());
    if let Some(description) = step.description() {
        info = info.with_context("step", description.to_string());
    }
    MigrationError::Execution(info)
}

/// Applies a resolved chain to the path the context is rooted at.
///
/// Structural steps run first, in order, against the whole tree; the data
/// file set is then enumerated once, so files renamed or created by the
/// structural phase are picked up and files it deleted are not. Each data
/// step is applied to every file before the next step starts. The first
/// failing step stops the run with an error naming its version pair; no
/// rollback of earlier steps or earlier file rewrites is attempted.
pub fn execute(
    chain: &MigrationChain<'_>,
    context: &MigrationContext,
    options: &ExecuteOptions,
) -> Result<ExecutionSummary, MigrationError> {
    let mut summary = ExecutionSummary::default();
    let root = context.root();
    let root_is_dir = root.is_dir();

    if root_is_dir {
        for step in chain.structural() {
            step.apply(context)
                .map_err(|err| step_error("modmig.structural_step", *step, &err))?;
            summary.structural_applied += 1;
        }
    }

    if chain.data().is_empty() {
        return Ok(summary);
    }

    // Scanned once, after the structural phase and before the data phase.
    let files: Vec<PathBuf> = if root_is_dir {
        context
            .list_files(&format!("**/*.{}", options.data_extension), true)?
            .into_iter()
            .map(|rel| root.join(rel))
            .collect()
    } else {
        vec![root.to_path_buf()]
    };

    for step in chain.data() {
        for file in &files {
            let tree = read_tree(file)
                .map_err(|err| step_error("modmig.data_step", *step, &err))?;
            let migrated = step
                .apply(tree)
                .map_err(|err| step_error("modmig.data_step", *step, &err))?;
            write_tree(file, &migrated)
                .map_err(|err| step_error("modmig.data_step", *step, &err))?;
            summary.files_rewritten += 1;
        }
        summary.data_applied += 1;
    }

    Ok(summary)
}
