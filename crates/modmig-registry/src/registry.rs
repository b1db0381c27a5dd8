use std::collections::{BTreeMap, BTreeSet};

use modmig_core::errors::{ErrorInfo, MigrationError};
use modmig_core::{DataMigration, StructuralMigration, Version};
use serde::Serialize;

use crate::candidate::{MigrationCandidate, TransformCandidate};

/// One candidate rejected during a discovery pass.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationFailure {
    /// Module the candidate declared.
    pub module: String,
    /// Declared from-version string, verbatim.
    pub from: String,
    /// Declared to-version string, verbatim.
    pub to: String,
    /// The error that disqualified the candidate.
    pub error: MigrationError,
}

/// Outcome of one discovery pass.
///
/// Individual registration failures never abort the pass; tooling can
/// surface the skipped candidates from here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscoveryReport {
    /// Number of candidates registered successfully.
    pub registered: usize,
    /// Candidates that were skipped, with the reason each one failed.
    pub failures: Vec<RegistrationFailure>,
}

#[derive(Debug, Default)]
struct ModuleMigrations {
    data: Vec<DataMigration>,
    structural: Vec<StructuralMigration>,
}

/// Per-module collections of registered migrations.
///
/// The registry is plain mutable state with no internal locking: discovery
/// runs once at startup, before any migration run, and the registry is
/// read-only afterwards. Running discovery concurrently with lookups is
/// the caller's bug to prevent.
#[derive(Debug)]
pub struct MigrationRegistry {
    active_modules: BTreeSet<String>,
    modules: BTreeMap<String, ModuleMigrations>,
}

const NO_DATA: &[DataMigration] = &[];
const NO_STRUCTURAL: &[StructuralMigration] = &[];

impl MigrationRegistry {
    /// Creates an empty registry for the given set of active module ids.
    pub fn new(active_modules: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            active_modules: active_modules.into_iter().map(Into::into).collect(),
            modules: BTreeMap::new(),
        }
    }

    /// Whether the host declared the module as known/active.
    pub fn is_active(&self, module: &str) -> bool {
        self.active_modules.contains(module)
    }

    /// Validates one candidate and appends it to its module's list.
    ///
    /// Registration order within each list is preserved; the path search
    /// uses it as its tie-break.
    pub fn register(&mut self, candidate: MigrationCandidate) -> Result<(), MigrationError> {
        if !self.is_active(&candidate.module) {
            return Err(MigrationError::Registration(
                ErrorInfo::new(
                    "modmig.module_inactive",
                    "candidate declares a module the host does not know",
                )
                .with_context("module", candidate.module),
            ));
        }
        let from = Version::parse(&candidate.from)?;
        let to = Version::parse(&candidate.to)?;
        let entry = self.modules.entry(candidate.module).or_default();
        match candidate.transform {
            TransformCandidate::Data(transform) => {
                let mut record = DataMigration::new(from, to, transform)?;
                if let Some(description) = candidate.description {
                    record = record.with_description(description);
                }
                entry.data.push(record);
            }
            TransformCandidate::Structural(transform) => {
                let mut record = StructuralMigration::new(from, to, transform)?;
                if let Some(description) = candidate.description {
                    record = record.with_description(description);
                }
                entry.structural.push(record);
            }
        }
        Ok(())
    }

    /// Clears all registrations, then registers every valid candidate.
    ///
    /// A failing candidate is reported and skipped; the pass always runs
    /// to completion.
    pub fn discover_all(
        &mut self,
        candidates: impl IntoIterator<Item = MigrationCandidate>,
    ) -> DiscoveryReport {
        self.reset();
        let mut report = DiscoveryReport::default();
        for candidate in candidates {
            let (module, from, to) = (
                candidate.module.clone(),
                candidate.from.clone(),
                candidate.to.clone(),
            );
            match self.register(candidate) {
                Ok(()) => report.registered += 1,
                Err(error) => report.failures.push(RegistrationFailure {
                    module,
                    from,
                    to,
                    error,
                }),
            }
        }
        report
    }

    /// Data and structural migrations registered for a module.
    ///
    /// An absent module yields two empty slices, not an error.
    pub fn lookup(&self, module: &str) -> (&[DataMigration], &[StructuralMigration]) {
        match self.modules.get(module) {
            Some(entry) => (&entry.data, &entry.structural),
            None => (NO_DATA, NO_STRUCTURAL),
        }
    }

    /// Removes every registration, keeping the active-module set.
    pub fn reset(&mut self) {
        self.modules.clear();
    }
}
