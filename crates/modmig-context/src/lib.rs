//! Scoped filesystem operations for structural migrations.

mod context;

pub use context::MigrationContext;
