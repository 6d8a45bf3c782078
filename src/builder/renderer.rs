//! Descriptor rendering - from components to build files on disk.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::excludes::{source_paths, ExcludePolicy};
use crate::builder::paths::Classpath;
use crate::builder::references::build_time_references;
use crate::builder::template::{
    AggregateContext, ComponentContext, DispatcherContext, RenderContext, TemplateEngine,
    TemplateName,
};
use crate::core::component::DevelopmentComponent;
use crate::core::id;
use crate::core::layout::LocationResolver;
use crate::core::reference::PublicPartKey;
use crate::util::fs::write_string;

/// Build file written next to each component.
pub const COMPONENT_BUILD_FILE: &str = "checkstyle-build.xml";

/// Workspace build file: dispatcher or aggregate.
pub const DISPATCHER_BUILD_FILE: &str = "checkstyle-build-all.xml";

/// How build files are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// One build file per component plus a dispatcher
    #[default]
    PerComponent,
    /// A single build file for all components
    Aggregate,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::PerComponent => "per-component",
            RenderMode::Aggregate => "aggregate",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per-component" => Ok(RenderMode::PerComponent),
            "aggregate" => Ok(RenderMode::Aggregate),
            _ => Err(format!(
                "invalid mode '{}'; expected 'per-component' or 'aggregate'",
                s
            )),
        }
    }
}

/// A written build file and the target that runs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildDescriptor {
    pub build_file: PathBuf,
    pub default_target: String,
}

/// Turns components into build files.
pub struct DescriptorRenderer<'a> {
    resolver: &'a dyn LocationResolver,
    engine: &'a dyn TemplateEngine,
    policy: &'a ExcludePolicy,
    checkstyle_config: PathBuf,
}

impl<'a> DescriptorRenderer<'a> {
    pub fn new(
        resolver: &'a dyn LocationResolver,
        engine: &'a dyn TemplateEngine,
        policy: &'a ExcludePolicy,
        checkstyle_config: impl Into<PathBuf>,
    ) -> Self {
        DescriptorRenderer {
            resolver,
            engine,
            policy,
            checkstyle_config: checkstyle_config.into(),
        }
    }

    /// Render context of a component, or `None` if nothing is left to
    /// analyse once data dictionary folders are removed.
    pub fn context(
        &self,
        component: &DevelopmentComponent,
        classpath: &Classpath,
    ) -> Option<ComponentContext> {
        let base = self.resolver.base_location(component.id());
        let sources = source_paths(component, &base);
        if sources.is_empty() {
            return None;
        }

        let keys: Vec<PublicPartKey> = build_time_references(component).collect();

        Some(ComponentContext {
            vendor: component.vendor().to_string(),
            component: id::sanitize(component.name()),
            target: id::target_name(component.id()),
            component_base: base,
            source_paths: sources,
            checkstyle_config: self.checkstyle_config.clone(),
            excludes: self.policy.excludes().to_vec(),
            exclude_contains_regexps: self.policy.contains_regexps().to_vec(),
            classpaths: classpath.select(&keys),
            classes: component.output_folder().to_string(),
            result_file: self.resolver.result_location(component.id()),
        })
    }

    /// Write `checkstyle-build.xml` at the component's base location.
    ///
    /// Returns `Ok(None)` when the component has no sources to analyse.
    pub fn write_component(
        &self,
        component: &DevelopmentComponent,
        classpath: &Classpath,
    ) -> Result<Option<BuildDescriptor>> {
        let Some(ctx) = self.context(component, classpath) else {
            return Ok(None);
        };

        let build_file = ctx.component_base.join(COMPONENT_BUILD_FILE);
        let default_target = ctx.target.clone();
        let content = self
            .engine
            .render(TemplateName::ComponentBuild, &RenderContext::Component(ctx))?;

        write_string(&build_file, &content)
            .with_context(|| format!("failed to write build file for {}", component.id()))?;

        tracing::debug!("Wrote {}", build_file.display());
        Ok(Some(BuildDescriptor {
            build_file,
            default_target,
        }))
    }

    /// Write the dispatcher calling every given build file.
    pub fn write_dispatcher(
        &self,
        root: &Path,
        build_files: &[BuildDescriptor],
    ) -> Result<BuildDescriptor> {
        let context = RenderContext::Dispatcher(DispatcherContext {
            basedir: root.to_path_buf(),
            build_files: build_files.to_vec(),
        });
        let content = self.engine.render(TemplateName::Dispatcher, &context)?;
        self.write_workspace_file(root, &content)
    }

    /// Write the single aggregate build file for all given components.
    ///
    /// Components without sources get no target.
    pub fn write_aggregate<'c, I>(
        &self,
        root: &Path,
        components: I,
        classpath: &Classpath,
    ) -> Result<BuildDescriptor>
    where
        I: IntoIterator<Item = &'c DevelopmentComponent>,
    {
        let components: Vec<ComponentContext> = components
            .into_iter()
            .filter_map(|c| self.context(c, classpath))
            .collect();

        let context = RenderContext::Aggregate(AggregateContext {
            basedir: root.to_path_buf(),
            classpath: classpath.entries().cloned().collect(),
            components,
        });
        let content = self.engine.render(TemplateName::Aggregate, &context)?;
        self.write_workspace_file(root, &content)
    }

    fn write_workspace_file(&self, root: &Path, content: &str) -> Result<BuildDescriptor> {
        let build_file = root.join(DISPATCHER_BUILD_FILE);
        write_string(&build_file, content)?;
        tracing::debug!("Wrote {}", build_file.display());

        Ok(BuildDescriptor {
            build_file,
            default_target: id::ALL_TARGET.to_string(),
        })
    }
}
