//! Ordered module-version identifier with text parsing.

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, MigrationError};

/// Ordered tuple of numeric version components ("1.4", "0.19.2", ...).
///
/// Comparison is lexicographic left to right; missing trailing components
/// compare as zero, so `1.2` and `1.2.0` are equal and interchangeable as
/// graph keys. The parsed component list is kept verbatim so the canonical
/// string form round-trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    components: Vec<u64>,
}

impl Version {
    /// Parses a dotted version string of at least two numeric components.
    pub fn parse(text: &str) -> Result<Self, MigrationError> {
        let invalid = |detail: &str| {
            MigrationError::Version(
                ErrorInfo::new(
                    "modmig.version_format",
                    format!("invalid version string: {detail}"),
                )
                .with_context("text", text.to_string()),
            )
        };
        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() < 2 {
            return Err(invalid("expected at least two dotted components"));
        }
        let mut components = Vec::with_capacity(parts.len());
        for part in parts {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid("components must be non-empty decimal numbers"));
            }
            let value = part
                .parse::<u64>()
                .map_err(|_| invalid("component out of range"))?;
            components.push(value);
        }
        Ok(Self { components })
    }

    /// Returns the parsed components, most significant first.
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Component at `index`, treating missing trailing components as zero.
    fn component_or_zero(&self, index: usize) -> u64 {
        self.components.get(index).copied().unwrap_or(0)
    }
}

impl FromStr for Version {
    type Err = MigrationError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Version::parse(text)
    }
}

impl TryFrom<String> for Version {
    type Error = MigrationError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Version::parse(&text)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, component) in self.components.iter().enumerate() {
            if idx > 0 {
                write!(f, ".")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let width = self.components.len().max(other.components.len());
        for idx in 0..width {
            match self.component_or_zero(idx).cmp(&other.component_or_zero(idx)) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Trailing zeros must not distinguish hashes, matching Ord.
        let mut significant = self.components.len();
        while significant > 0 && self.components[significant - 1] == 0 {
            significant -= 1;
        }
        self.components[..significant].hash(state);
    }
}
