use modmig_core::errors::{ErrorInfo, MigrationError};
use modmig_core::{DataMigration, MigrationStep, StructuralMigration, Version};
use modmig_graph::VersionGraph;
use modmig_registry::MigrationRegistry;

fn check_walk<T: MigrationStep>(steps: &[&T], kind: &str) -> Result<(), MigrationError> {
    for pair in steps.windows(2) {
        if pair[0].to_version() != pair[1].from_version() {
            return Err(MigrationError::Registration(
                ErrorInfo::new(
                    "modmig.broken_walk",
                    format!("{kind} migrations do not form a contiguous walk"),
                )
                .with_context("reached", pair[0].to_version().to_string())
                .with_context("expected_from", pair[1].from_version().to_string()),
            ));
        }
    }
    Ok(())
}

/// Resolved, ordered sequences of migrations bridging one version pair.
///
/// The structural and data sequences are independent walks through version
/// space; either may be empty when only the other graph had a path.
/// Ephemeral: built per orchestration call, borrowing the registry's
/// records, and discarded after execution.
#[derive(Debug)]
pub struct MigrationChain<'reg> {
    structural: Vec<&'reg StructuralMigration>,
    data: Vec<&'reg DataMigration>,
}

impl<'reg> MigrationChain<'reg> {
    /// Builds a chain from pre-resolved sequences, validating that each
    /// non-empty sequence is a contiguous walk.
    pub fn new(
        structural: Vec<&'reg StructuralMigration>,
        data: Vec<&'reg DataMigration>,
    ) -> Result<Self, MigrationError> {
        check_walk(&structural, "structural")?;
        check_walk(&data, "data")?;
        Ok(Self { structural, data })
    }

    /// Resolves a chain for one module and version pair.
    ///
    /// Both graphs are searched independently; the chain exists if either
    /// search succeeds, carrying whichever sequences were found. Callers
    /// must special-case `from == to` before resolving.
    pub fn resolve(
        registry: &'reg MigrationRegistry,
        module: &str,
        from: &Version,
        to: &Version,
    ) -> Option<Self> {
        let (data_steps, structural_steps) = registry.lookup(module);
        let data_path = VersionGraph::build(data_steps).find_path(from, to);
        let structural_path = VersionGraph::build(structural_steps).find_path(from, to);
        if data_path.is_none() && structural_path.is_none() {
            return None;
        }
        Some(Self {
            structural: structural_path.unwrap_or_default(),
            data: data_path.unwrap_or_default(),
        })
    }

    /// Structural steps in application order.
    pub fn structural(&self) -> &[&'reg StructuralMigration] {
        &self.structural
    }

    /// Data steps in application order.
    pub fn data(&self) -> &[&'reg DataMigration] {
        &self.data
    }

    /// True when both sequences are empty; applying such a chain is a
    /// trivial no-op.
    pub fn is_empty(&self) -> bool {
        self.structural.is_empty() && self.data.is_empty()
    }
}
