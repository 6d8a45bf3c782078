//! Build file generation.
//!
//! This module turns development components into Checkstyle build files:
//! collecting build-time references, assembling classpaths, applying
//! excludes and rendering templates. Direct analysis lives in [`analysis`].

pub mod analysis;
pub mod excludes;
pub mod paths;
pub mod references;
pub mod renderer;
pub mod template;

pub use analysis::{AnalysisOutcome, AnalysisRequest, Analyzer, CommandAnalyzer, FileSet};
pub use excludes::ExcludePolicy;
pub use paths::{Classpath, ClasspathEntry, PathsAssembler};
pub use references::collect_build_time_references;
pub use renderer::{BuildDescriptor, DescriptorRenderer, RenderMode};
pub use template::{AntTemplates, RenderContext, RenderError, TemplateEngine, TemplateName};
