#![deny(missing_docs)]
#![doc = "Migration chain resolution, ordered fault-tolerant execution, and the top-level per-module orchestrator."]

mod chain;
mod executor;
mod orchestrate;

pub use chain::MigrationChain;
pub use executor::{execute, ExecuteOptions, ExecutionSummary};
pub use orchestrate::{migrate, MigrateOptions, MigrateOutcome, ModuleStatus, SkipReason};
