//! Implementation of `nwdi-checkstyle paths`: show what generation would
//! analyse and put on the classpath, without writing anything.

use std::path::PathBuf;

use serde::Serialize;

use crate::builder::excludes::source_paths;
use crate::builder::paths::{ClasspathEntry, PathsAssembler};
use crate::builder::references::{build_time_references, collect_build_time_references};
use crate::core::component::ComponentId;
use crate::core::layout::LocationResolver;
use crate::core::Workspace;
use crate::ops::{select_components, UnknownComponent};

/// Source folders and classpath of one component.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentPaths {
    pub component: ComponentId,
    pub base: PathBuf,
    pub source_paths: Vec<PathBuf>,
    pub classpath: Vec<ClasspathEntry>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PathsReport {
    pub components: Vec<ComponentPaths>,
    /// Build-time references that did not resolve, as `vendor/component#part`
    pub unresolved: Vec<String>,
}

/// Source folders and classpath of the selected components.
pub fn component_paths(
    ws: &Workspace,
    filter: &[ComponentId],
) -> Result<PathsReport, UnknownComponent> {
    let components = select_components(ws, filter)?;
    let keys = collect_build_time_references(components.iter().copied());
    let classpath = PathsAssembler::new(ws).assemble(&keys);

    let mut report = PathsReport {
        unresolved: classpath
            .unresolved()
            .iter()
            .map(|e| e.key().to_string())
            .collect(),
        ..PathsReport::default()
    };

    for component in components {
        let base = ws.base_location(component.id());
        let refs: Vec<_> = build_time_references(component).collect();
        report.components.push(ComponentPaths {
            component: component.id().clone(),
            source_paths: source_paths(component, &base),
            classpath: classpath.select(&refs),
            base,
        });
    }

    Ok(report)
}
