#![deny(missing_docs)]
#![doc = "Core types for the modmig save-data migration engine: versions, migration records, capability traits, errors, and the content-tree service."]

pub mod errors;
pub mod migration;
pub mod tree;
pub mod version;

pub use errors::{ErrorInfo, MigrationError};
pub use migration::{
    DataMigration, DataTransform, MigrationStep, StructuralMigration, StructuralOps,
    StructuralTransform,
};
pub use tree::{read_tree, write_tree, DataTree, DATA_FILE_EXTENSION};
pub use version::Version;
