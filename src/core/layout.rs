//! Filesystem layout of a development workspace.
//!
//! Components live under `.dtc/DCs/<vendor>/<name>/_comp`; their public
//! parts are published below `gen/default/public/<part>/lib/java`.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::core::component::ComponentId;
use crate::core::id;
use crate::core::reference::PublicPartKey;

/// A public part reference that cannot be mapped to a location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("reference `{key}` has an invalid {segment} `{value}`")]
    InvalidSegment {
        key: PublicPartKey,
        segment: &'static str,
        value: String,
    },

    #[error("`{component}` does not declare a public part named `{part}`")]
    UndeclaredPart { component: ComponentId, part: String },

    #[error("reference `{key}` has the same classpath id `{id}` as `{existing}`")]
    IdClash {
        key: PublicPartKey,
        existing: PublicPartKey,
        id: String,
    },
}

impl ResolutionError {
    /// The reference that failed to resolve.
    pub fn key(&self) -> PublicPartKey {
        match self {
            ResolutionError::InvalidSegment { key, .. } | ResolutionError::IdClash { key, .. } => {
                key.clone()
            }
            ResolutionError::UndeclaredPart { component, part } => {
                PublicPartKey::new(&component.vendor, &component.name, part)
            }
        }
    }
}

/// Where components and their published parts live.
pub trait LocationResolver {
    /// Base directory of a component; source folders are relative to it.
    fn base_location(&self, component: &ComponentId) -> PathBuf;

    /// Directory holding the archives of a referenced public part.
    fn resolve(&self, key: &PublicPartKey) -> Result<PathBuf, ResolutionError>;

    /// File the analysis results of a component are written to.
    fn result_location(&self, component: &ComponentId) -> PathBuf;
}

/// The default `.dtc` layout rooted at a workspace directory.
#[derive(Debug, Clone)]
pub struct DtcLayout {
    root: PathBuf,
}

impl DtcLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DtcLayout { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/.dtc/DCs`
    pub fn components_dir(&self) -> PathBuf {
        self.root.join(".dtc").join("DCs")
    }

    fn component_dir(&self, vendor: &str, name: &str) -> PathBuf {
        let mut dir = self.components_dir().join(vendor);
        for segment in name.split('/') {
            dir.push(segment);
        }
        dir.join("_comp")
    }

    /// Absolute location of a source folder of a component.
    pub fn source_folder(&self, component: &ComponentId, folder: &str) -> PathBuf {
        join_folder(&self.base_location(component), folder)
    }
}

/// Join a `/`-separated folder below `base`.
pub fn join_folder(base: &Path, folder: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    for segment in folder.split(['/', '\\']).filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path
}

impl LocationResolver for DtcLayout {
    fn base_location(&self, component: &ComponentId) -> PathBuf {
        self.component_dir(&component.vendor, &component.name)
    }

    fn resolve(&self, key: &PublicPartKey) -> Result<PathBuf, ResolutionError> {
        check_segment(key, "vendor", &key.vendor, false)?;
        check_segment(key, "component", &key.component, true)?;
        check_segment(key, "part", &key.part, false)?;

        Ok(self
            .component_dir(&key.vendor, &key.component)
            .join("gen")
            .join("default")
            .join("public")
            .join(&key.part)
            .join("lib")
            .join("java"))
    }

    fn result_location(&self, component: &ComponentId) -> PathBuf {
        self.root
            .join("checkstyle")
            .join(id::component_id(component))
            .join("checkstyle-result.xml")
    }
}

/// A segment must be a plain, non-empty name. Component names may nest
/// with `/`, each piece of which must itself be plain.
pub fn is_plain_segment(value: &str, allow_nesting: bool) -> bool {
    let pieces: Vec<&str> = if allow_nesting {
        value.split('/').collect()
    } else {
        vec![value]
    };

    pieces.iter().all(|piece| {
        let mut components = Path::new(piece).components();
        !piece.is_empty()
            && !piece.contains(['/', '\\'])
            && matches!(components.next(), Some(Component::Normal(_)))
            && components.next().is_none()
    })
}

fn check_segment(
    key: &PublicPartKey,
    segment: &'static str,
    value: &str,
    allow_nesting: bool,
) -> Result<(), ResolutionError> {
    if is_plain_segment(value, allow_nesting) {
        Ok(())
    } else {
        Err(ResolutionError::InvalidSegment {
            key: key.clone(),
            segment,
            value: value.to_string(),
        })
    }
}
