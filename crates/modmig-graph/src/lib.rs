#![deny(missing_docs)]
#![doc = "Deterministic version-graph construction and shortest-path migration resolution."]

mod graph;

pub use graph::VersionGraph;
