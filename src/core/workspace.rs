//! Workspace - the set of development components of one build and the
//! directory they live in.
//!
//! Component metadata comes from `components.toml` at the workspace root:
//!
//! ```toml
//! [[component]]
//! vendor = "vendor.com"
//! name = "dc2"
//! source-folders = ["src/packages"]
//! output-folder = "classes"
//!
//! [[component.uses]]
//! vendor = "vendor.com"
//! component = "dc1"
//! part = "api"
//! build-time = true
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::core::component::{ComponentId, DevelopmentComponent};
use crate::core::layout::{is_plain_segment, DtcLayout, LocationResolver, ResolutionError};
use crate::core::reference::PublicPartKey;

/// File listing the components of a workspace.
pub const COMPONENTS_FILE: &str = "components.toml";

/// Checkstyle configuration written into the workspace before generation.
pub const CHECKSTYLE_CONFIG_FILE: &str = "checkstyle-config.xml";

/// Errors reading the component metadata.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not find `{COMPONENTS_FILE}` in `{}` or any parent directory", dir.display())]
    NotFound { dir: PathBuf },

    #[error("failed to read `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse `{}`", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("component `{id}` is declared more than once")]
    DuplicateComponent { id: ComponentId },

    #[error("component `{id}` has an invalid {segment}")]
    InvalidComponent { id: ComponentId, segment: &'static str },
}

/// Supplier of the components affected by a build.
pub trait ComponentSource {
    /// All components, in declaration order.
    fn components(&self) -> &[DevelopmentComponent];

    /// Look up a component by id.
    fn component(&self, id: &ComponentId) -> Option<&DevelopmentComponent> {
        self.components().iter().find(|c| c.id() == id)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ComponentsFile {
    #[serde(default, rename = "component")]
    components: Vec<DevelopmentComponent>,
}

/// A workspace: root directory, layout and components.
#[derive(Debug, Clone)]
pub struct Workspace {
    layout: DtcLayout,
    components: Vec<DevelopmentComponent>,
}

impl Workspace {
    /// Load the workspace rooted at `root` from its `components.toml`.
    pub fn load(root: &Path) -> Result<Self, ManifestError> {
        let path = root.join(COMPONENTS_FILE);
        let contents = std::fs::read_to_string(&path).map_err(|source| ManifestError::Read {
            path: path.clone(),
            source,
        })?;
        let file: ComponentsFile =
            toml::from_str(&contents).map_err(|source| ManifestError::Parse {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(
            "Loaded {} component(s) from {}",
            file.components.len(),
            path.display()
        );

        Self::from_components(root, file.components)
    }

    /// Build a workspace from already-known components.
    pub fn from_components(
        root: impl Into<PathBuf>,
        components: Vec<DevelopmentComponent>,
    ) -> Result<Self, ManifestError> {
        let mut seen = BTreeSet::new();
        let mut normalized = Vec::with_capacity(components.len());

        for mut component in components {
            let id = component.id();
            if !is_plain_segment(&id.vendor, false) {
                return Err(ManifestError::InvalidComponent {
                    id: id.clone(),
                    segment: "vendor",
                });
            }
            if !is_plain_segment(&id.name, true) {
                return Err(ManifestError::InvalidComponent {
                    id: id.clone(),
                    segment: "name",
                });
            }
            if !seen.insert(component.id().clone()) {
                return Err(ManifestError::DuplicateComponent {
                    id: component.id().clone(),
                });
            }
            component.normalize();
            normalized.push(component);
        }

        Ok(Workspace {
            layout: DtcLayout::new(root),
            components: normalized,
        })
    }

    /// Get the workspace root directory.
    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    /// Get the filesystem layout.
    pub fn layout(&self) -> &DtcLayout {
        &self.layout
    }

    /// Where the checkstyle configuration is written.
    pub fn checkstyle_config_path(&self) -> PathBuf {
        self.root().join(CHECKSTYLE_CONFIG_FILE)
    }
}

impl ComponentSource for Workspace {
    fn components(&self) -> &[DevelopmentComponent] {
        &self.components
    }
}

impl LocationResolver for Workspace {
    fn base_location(&self, component: &ComponentId) -> PathBuf {
        self.layout.base_location(component)
    }

    /// Resolve through the layout, rejecting parts a known component does
    /// not publish. Components outside the workspace are trusted.
    fn resolve(&self, key: &PublicPartKey) -> Result<PathBuf, ResolutionError> {
        let owner = ComponentId::new(&key.vendor, &key.component);
        if let Some(component) = self.component(&owner) {
            if !component.declares_part(&key.part) {
                return Err(ResolutionError::UndeclaredPart {
                    component: owner,
                    part: key.part.clone(),
                });
            }
        }

        self.layout.resolve(key)
    }

    fn result_location(&self, component: &ComponentId) -> PathBuf {
        self.layout.result_location(component)
    }
}

/// Find the directory containing `components.toml`, starting at `start`
/// and searching upward.
pub fn find_workspace_root(start: &Path) -> Result<PathBuf, ManifestError> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(COMPONENTS_FILE).is_file() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(ManifestError::NotFound {
                dir: start.to_path_buf(),
            });
        }
    }
}
