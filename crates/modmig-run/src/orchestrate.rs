use std::collections::BTreeMap;
use std::path::Path;

use modmig_core::errors::{ErrorInfo, MigrationError};
use modmig_core::{Version, DATA_FILE_EXTENSION};
use modmig_context::MigrationContext;
use modmig_registry::MigrationRegistry;
use serde::Serialize;

use crate::chain::MigrationChain;
use crate::executor::{execute, ExecuteOptions, ExecutionSummary};

/// Caller options for one [`migrate`] call.
#[derive(Debug, Clone)]
pub struct MigrateOptions {
    /// Suppresses compatibility checks (missing module, downgrade, no
    /// path), turning them into per-module skips. Never suppresses
    /// execution failures and never enables a reverse chain.
    pub force: bool,
    /// Extension recognizing data files under a directory target.
    pub data_extension: String,
}

impl Default for MigrateOptions {
    fn default() -> Self {
        Self {
            force: false,
            data_extension: DATA_FILE_EXTENSION.to_string(),
        }
    }
}

/// Why a module was skipped under force mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// The module is absent from the target-version map.
    ModuleNotLoaded,
    /// The stored version is newer than the target version.
    DowngradeRequested,
    /// Neither migration graph has a path for the version pair.
    NoMigrationPath,
}

/// Per-module result of one [`migrate`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ModuleStatus {
    /// A chain was resolved and applied.
    Migrated(ExecutionSummary),
    /// Stored and target versions already match; nothing to do.
    UpToDate,
    /// A compatibility check failed and force mode turned it into a skip.
    Skipped(SkipReason),
}

/// What one [`migrate`] call did, module by module.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrateOutcome {
    /// Module results in processing order.
    pub modules: Vec<(String, ModuleStatus)>,
}

fn compatibility(code: &str, message: &str, module: &str) -> MigrationError {
    MigrationError::Compatibility(
        ErrorInfo::new(code, message).with_context("module", module.to_string()),
    )
}

/// Migrates every module recorded in `from_versions` toward the versions
/// in `to_versions`, applying resolved chains to `path`.
///
/// `path` is either a directory (structural + data migration of the whole
/// tree) or a single data file (data-only). Modules are processed in the
/// map's iteration order and independently: progress made for earlier
/// modules persists even when a later module fails.
pub fn migrate(
    registry: &MigrationRegistry,
    path: &Path,
    from_versions: &BTreeMap<String, String>,
    to_versions: &BTreeMap<String, String>,
    options: &MigrateOptions,
) -> Result<MigrateOutcome, MigrationError> {
    let mut outcome = MigrateOutcome::default();
    for (module, from_text) in from_versions {
        let from = Version::parse(from_text)
            .map_err(|err| err.with_context("module", module.clone()))?;
        let to_text = match to_versions.get(module) {
            Some(text) => text,
            None => {
                if options.force {
                    outcome
                        .modules
                        .push((module.clone(), ModuleStatus::Skipped(SkipReason::ModuleNotLoaded)));
                    continue;
                }
                return Err(compatibility(
                    "modmig.module_not_loaded",
                    "module has saved data but no target version",
                    module,
                ));
            }
        };
        let to = Version::parse(to_text)
            .map_err(|err| err.with_context("module", module.clone()))?;

        if from > to {
            // Never attempted, even under force: force only removes the
            // hard stop, it does not invoke a reverse chain.
            if options.force {
                outcome
                    .modules
                    .push((module.clone(), ModuleStatus::Skipped(SkipReason::DowngradeRequested)));
                continue;
            }
            return Err(compatibility(
                "modmig.downgrade",
                "saved version is newer than the target version",
                module,
            )
            .with_context("from", from.to_string())
            .with_context("to", to.to_string()));
        }

        if from == to {
            outcome.modules.push((module.clone(), ModuleStatus::UpToDate));
            continue;
        }

        let chain = match MigrationChain::resolve(registry, module, &from, &to) {
            Some(chain) => chain,
            None => {
                if options.force {
                    outcome
                        .modules
                        .push((module.clone(), ModuleStatus::Skipped(SkipReason::NoMigrationPath)));
                    continue;
                }
                return Err(compatibility(
                    "modmig.no_path",
                    "no registered migration path bridges the version pair",
                    module,
                )
                .with_context("from", from.to_string())
                .with_context("to", to.to_string()));
            }
        };

        let context = MigrationContext::new(path);
        let exec_options = ExecuteOptions {
            data_extension: options.data_extension.clone(),
        };
        let summary = execute(&chain, &context, &exec_options)
            .map_err(|err| err.with_context("module", module.clone()))?;
        outcome
            .modules
            .push((module.clone(), ModuleStatus::Migrated(summary)));
    }
    Ok(outcome)
}
