//! nwdi-checkstyle - Checkstyle analysis for NWDI development components
//!
//! This crate generates Ant build files that run Checkstyle over the Java
//! sources of the development components in a workspace, with each
//! component's build-time public part references on the analysis
//! classpath. It can also run the generated build, or analyse the sources
//! directly without Ant.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and doubles for unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides the sample workspace and recording implementations of the
/// Ant and Checkstyle seams.
#[cfg(test)]
pub mod test_support;

pub use crate::builder::{BuildDescriptor, DescriptorRenderer, ExcludePolicy, PathsAssembler, RenderMode};
pub use crate::core::{
    ComponentId, DevelopmentComponent, LocationResolver, PublicPartKey, PublicPartReference,
    Workspace,
};
pub use crate::util::context::GlobalContext;
