//! Development components - the units whose sources get analysed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::reference::PublicPartReference;

/// Identity of a development component: (vendor, name).
///
/// Names may contain `/` (e.g. `tc/bl/util`); the vendor may not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId {
    pub vendor: String,
    pub name: String,
}

impl ComponentId {
    pub fn new(vendor: impl Into<String>, name: impl Into<String>) -> Self {
        ComponentId {
            vendor: vendor.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.vendor, self.name)
    }
}

impl FromStr for ComponentId {
    type Err = String;

    /// Parse `vendor/name`. Everything after the first `/` is the name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((vendor, name)) if !vendor.is_empty() && !name.is_empty() => {
                Ok(ComponentId::new(vendor, name))
            }
            _ => Err(format!(
                "invalid component `{}`; expected `vendor/name`",
                s
            )),
        }
    }
}

/// Kind of development component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentType {
    #[default]
    Java,
    /// Data dictionary; its source folders never hold Java sources
    Dictionary,
    WebDynpro,
    J2eeLibrary,
    #[serde(other)]
    Other,
}

/// A development component as supplied by the component metadata provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DevelopmentComponent {
    #[serde(flatten)]
    id: ComponentId,

    #[serde(default, rename = "type")]
    component_type: ComponentType,

    #[serde(default)]
    source_folders: Vec<String>,

    #[serde(default)]
    test_source_folders: Vec<String>,

    #[serde(default)]
    output_folder: String,

    #[serde(default)]
    public_parts: Vec<String>,

    #[serde(default)]
    uses: Vec<PublicPartReference>,
}

impl DevelopmentComponent {
    /// Create a Java component with no folders and no references.
    pub fn new(vendor: impl Into<String>, name: impl Into<String>) -> Self {
        DevelopmentComponent {
            id: ComponentId::new(vendor, name),
            component_type: ComponentType::default(),
            source_folders: Vec::new(),
            test_source_folders: Vec::new(),
            output_folder: String::new(),
            public_parts: Vec::new(),
            uses: Vec::new(),
        }
    }

    pub fn with_type(mut self, component_type: ComponentType) -> Self {
        self.component_type = component_type;
        self
    }

    /// Add a source folder (kept unique, insertion order preserved).
    pub fn with_source_folder(mut self, folder: impl Into<String>) -> Self {
        push_unique(&mut self.source_folders, folder.into());
        self
    }

    /// Add a test source folder (kept unique, insertion order preserved).
    pub fn with_test_source_folder(mut self, folder: impl Into<String>) -> Self {
        push_unique(&mut self.test_source_folders, folder.into());
        self
    }

    pub fn with_output_folder(mut self, folder: impl Into<String>) -> Self {
        self.output_folder = folder.into();
        self
    }

    pub fn with_public_part(mut self, part: impl Into<String>) -> Self {
        push_unique(&mut self.public_parts, part.into());
        self
    }

    pub fn with_reference(mut self, reference: PublicPartReference) -> Self {
        self.uses.push(reference);
        self
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn vendor(&self) -> &str {
        &self.id.vendor
    }

    pub fn name(&self) -> &str {
        &self.id.name
    }

    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    pub fn source_folders(&self) -> &[String] {
        &self.source_folders
    }

    pub fn test_source_folders(&self) -> &[String] {
        &self.test_source_folders
    }

    pub fn output_folder(&self) -> &str {
        &self.output_folder
    }

    pub fn public_parts(&self) -> &[String] {
        &self.public_parts
    }

    /// Whether this component declares the given public part.
    ///
    /// Components that list no public parts are treated as declaring all.
    pub fn declares_part(&self, part: &str) -> bool {
        self.public_parts.is_empty() || self.public_parts.iter().any(|p| p == part)
    }

    /// Declared references to other components' public parts.
    pub fn used_references(&self) -> &[PublicPartReference] {
        &self.uses
    }

    /// Whether the component has any source folder at all (before filtering).
    pub fn has_sources(&self) -> bool {
        !self.source_folders.is_empty() || !self.test_source_folders.is_empty()
    }

    /// Drop duplicate folder entries that came in through deserialization.
    pub(crate) fn normalize(&mut self) {
        dedup_in_order(&mut self.source_folders);
        dedup_in_order(&mut self.test_source_folders);
        dedup_in_order(&mut self.public_parts);
    }
}

fn push_unique(items: &mut Vec<String>, item: String) {
    if !items.contains(&item) {
        items.push(item);
    }
}

fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen = Vec::with_capacity(items.len());
    items.retain(|item| {
        if seen.contains(item) {
            false
        } else {
            seen.push(item.clone());
            true
        }
    });
}
