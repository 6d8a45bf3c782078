//! High-level operations.
//!
//! This module contains the implementation of the nwdi-checkstyle commands.

pub mod check;
pub mod generate;
pub mod paths;
pub mod run;

use thiserror::Error;

use crate::core::component::{ComponentId, DevelopmentComponent};
use crate::core::workspace::{ComponentSource, Workspace};

pub use check::{check, CheckOptions, CheckReport};
pub use generate::{generate, generate_with, FailedComponent, GenerateOptions, GenerationReport};
pub use paths::{component_paths, ComponentPaths, PathsReport};
pub use run::{ant_properties, run_checkstyle, AntRunner, BuildRunner, RunError, RunOptions, RunReport};

/// A component filter naming something the workspace does not have.
#[derive(Debug, Error)]
#[error("component `{id}` not found in workspace\navailable components: {available}")]
pub struct UnknownComponent {
    pub id: ComponentId,
    pub available: String,
}

/// Pick the components named by `filter`, or every component when the
/// filter is empty. Workspace order is kept.
pub fn select_components<'a>(
    ws: &'a Workspace,
    filter: &[ComponentId],
) -> Result<Vec<&'a DevelopmentComponent>, UnknownComponent> {
    if filter.is_empty() {
        return Ok(ws.components().iter().collect());
    }

    if let Some(missing) = filter.iter().find(|id| ws.component(id).is_none()) {
        let available: Vec<String> = ws.components().iter().map(|c| c.id().to_string()).collect();
        return Err(UnknownComponent {
            id: missing.clone(),
            available: if available.is_empty() {
                "(none)".to_string()
            } else {
                available.join(", ")
            },
        });
    }

    Ok(ws
        .components()
        .iter()
        .filter(|c| filter.contains(c.id()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::sample_components;

    #[test]
    fn test_empty_filter_selects_all() {
        let ws = Workspace::from_components("/ws", sample_components()).unwrap();
        assert_eq!(select_components(&ws, &[]).unwrap().len(), 3);
    }

    #[test]
    fn test_filter_keeps_workspace_order() {
        let ws = Workspace::from_components("/ws", sample_components()).unwrap();
        let filter = [
            ComponentId::new("vendor.com", "dc3"),
            ComponentId::new("vendor.com", "dc1"),
        ];

        let names: Vec<_> = select_components(&ws, &filter)
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["dc1", "dc3"]);
    }

    #[test]
    fn test_unknown_component_lists_available() {
        let ws = Workspace::from_components("/ws", sample_components()).unwrap();
        let err = select_components(&ws, &[ComponentId::new("vendor.com", "nope")]).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("`vendor.com/nope`"));
        assert!(msg.contains("vendor.com/dc1, vendor.com/dc2, vendor.com/dc3"));
    }
}
