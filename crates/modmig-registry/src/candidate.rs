use std::fmt;

use modmig_core::{DataTransform, StructuralTransform};

/// Transform callback variant declared by a candidate.
pub enum TransformCandidate {
    /// Per-file content-tree transform.
    Data(DataTransform),
    /// Whole-tree filesystem transform.
    Structural(StructuralTransform),
}

impl fmt::Debug for TransformCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformCandidate::Data(_) => f.write_str("TransformCandidate::Data"),
            TransformCandidate::Structural(_) => f.write_str("TransformCandidate::Structural"),
        }
    }
}

/// One entry of the flattened feed produced by an external discovery
/// mechanism (attribute scanning, explicit registration calls, ...).
///
/// Version fields stay as declared strings; the registry parses and
/// validates them at registration time so one malformed candidate only
/// costs itself, not the whole discovery pass.
#[derive(Debug)]
pub struct MigrationCandidate {
    /// Module the migration belongs to.
    pub module: String,
    /// Declared from-version string.
    pub from: String,
    /// Declared to-version string.
    pub to: String,
    /// Optional human readable description.
    pub description: Option<String>,
    /// The transform callback, tagged by variant.
    pub transform: TransformCandidate,
}

impl MigrationCandidate {
    /// Convenience constructor for a data-migration candidate.
    pub fn data(
        module: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        transform: DataTransform,
    ) -> Self {
        Self {
            module: module.into(),
            from: from.into(),
            to: to.into(),
            description: None,
            transform: TransformCandidate::Data(transform),
        }
    }

    /// Convenience constructor for a structural-migration candidate.
    pub fn structural(
        module: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        transform: StructuralTransform,
    ) -> Self {
        Self {
            module: module.into(),
            from: from.into(),
            to: to.into(),
            description: None,
            transform: TransformCandidate::Structural(transform),
        }
    }

    /// Attaches a human readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
