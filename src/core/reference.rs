//! Public part references - WHICH published part of another component is
//! used, and WHEN (build time, run time, or both).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a published part: (vendor, component, part).
///
/// Equality and ordering are over the full triple, so two references
/// declared by different components to the same part compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PublicPartKey {
    /// Vendor of the component publishing the part
    pub vendor: String,
    /// Name of the component publishing the part
    pub component: String,
    /// Name of the public part
    pub part: String,
}

impl PublicPartKey {
    /// Create a new key.
    pub fn new(
        vendor: impl Into<String>,
        component: impl Into<String>,
        part: impl Into<String>,
    ) -> Self {
        PublicPartKey {
            vendor: vendor.into(),
            component: component.into(),
            part: part.into(),
        }
    }
}

impl fmt::Display for PublicPartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.vendor, self.component, self.part)
    }
}

/// A component's declared use of another component's public part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicPartReference {
    #[serde(flatten)]
    key: PublicPartKey,

    #[serde(default, rename = "build-time")]
    at_build_time: bool,

    #[serde(default, rename = "run-time")]
    at_run_time: bool,
}

impl PublicPartReference {
    /// Create a reference with neither flag set.
    pub fn new(
        vendor: impl Into<String>,
        component: impl Into<String>,
        part: impl Into<String>,
    ) -> Self {
        PublicPartReference {
            key: PublicPartKey::new(vendor, component, part),
            at_build_time: false,
            at_run_time: false,
        }
    }

    /// Mark the reference as used at build time.
    pub fn build_time(mut self) -> Self {
        self.at_build_time = true;
        self
    }

    /// Mark the reference as used at run time.
    pub fn run_time(mut self) -> Self {
        self.at_run_time = true;
        self
    }

    /// The referenced part.
    pub fn key(&self) -> &PublicPartKey {
        &self.key
    }

    pub fn is_at_build_time(&self) -> bool {
        self.at_build_time
    }

    pub fn is_at_run_time(&self) -> bool {
        self.at_run_time
    }
}
