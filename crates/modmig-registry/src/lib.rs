#![deny(missing_docs)]
#![doc = "Per-module migration registry built from an externally discovered candidate feed."]

mod candidate;
mod registry;

pub use candidate::{MigrationCandidate, TransformCandidate};
pub use registry::{DiscoveryReport, MigrationRegistry, RegistrationFailure};
