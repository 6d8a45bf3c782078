//! Core data structures.
//!
//! This module contains the foundational types used throughout the crate:
//! - Development components and their public part references
//! - Identifiers used inside generated build files
//! - The workspace layout and location resolution
//! - Workspace loading from `components.toml`

pub mod component;
pub mod id;
pub mod layout;
pub mod reference;
pub mod workspace;

pub use component::{ComponentId, ComponentType, DevelopmentComponent};
pub use layout::{DtcLayout, LocationResolver, ResolutionError};
pub use reference::{PublicPartKey, PublicPartReference};
pub use workspace::{find_workspace_root, ComponentSource, ManifestError, Workspace, COMPONENTS_FILE};
