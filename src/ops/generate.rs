//! Implementation of `nwdi-checkstyle generate`.
//!
//! One generation pass writes the checkstyle configuration into the
//! workspace, collects and resolves build-time references once, renders a
//! build file per component (or one aggregate file) and finally the
//! workspace build file Ant is started on.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::builder::excludes::ExcludePolicy;
use crate::builder::paths::PathsAssembler;
use crate::builder::references::collect_build_time_references;
use crate::builder::renderer::{BuildDescriptor, DescriptorRenderer, RenderMode};
use crate::builder::template::{AntTemplates, TemplateEngine};
use crate::core::component::{ComponentId, DevelopmentComponent};
use crate::core::Workspace;
use crate::ops::select_components;
use crate::util::config::GenerateConfig;
use crate::util::fs::write_string;
use crate::util::shell::{Shell, Status};

/// Options for a generation pass.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Overrides the configured mode
    pub mode: Option<RenderMode>,

    /// Components to generate for (empty = all)
    pub components: Vec<ComponentId>,
}

/// A component whose build file could not be written.
#[derive(Debug, Clone, Serialize)]
pub struct FailedComponent {
    pub component: ComponentId,
    pub error: String,
}

/// What a generation pass produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    pub mode: RenderMode,

    /// Per-component build files, in component order
    pub descriptors: Vec<BuildDescriptor>,

    /// The workspace build file to run
    pub dispatcher: Option<BuildDescriptor>,

    /// Components without anything to analyse
    pub skipped: Vec<ComponentId>,

    /// Components whose build file could not be written
    pub failed: Vec<FailedComponent>,

    /// References left off the classpath
    pub unresolved: Vec<String>,
}

impl GenerationReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Run a generation pass with the built-in Ant templates.
pub fn generate(
    ws: &Workspace,
    config: &GenerateConfig,
    opts: &GenerateOptions,
    shell: &Arc<Shell>,
) -> Result<GenerationReport> {
    generate_with(ws, config, opts, &AntTemplates, shell)
}

/// Run a generation pass rendering through `engine`.
pub fn generate_with(
    ws: &Workspace,
    config: &GenerateConfig,
    opts: &GenerateOptions,
    engine: &dyn TemplateEngine,
    shell: &Arc<Shell>,
) -> Result<GenerationReport> {
    config.validate()?;
    let policy = ExcludePolicy::new(&config.excludes, &config.exclude_contains_regexps)?;

    let config_path = ws.checkstyle_config_path();
    write_string(&config_path, &config.checkstyle_config)
        .context("failed to write checkstyle configuration into the workspace")?;

    let mode = opts.mode.unwrap_or(config.mode);
    let mut report = GenerationReport {
        mode,
        ..GenerationReport::default()
    };

    let mut components: Vec<&DevelopmentComponent> = Vec::new();
    for component in select_components(ws, &opts.components)? {
        if component.has_sources() {
            components.push(component);
        } else {
            tracing::debug!("{} has no Java sources", component.id());
            report.skipped.push(component.id().clone());
        }
    }

    let span = shell.span(
        Status::Generating,
        format!("checkstyle build files for {} component(s)", components.len()),
    );

    let keys = collect_build_time_references(components.iter().copied());
    let classpath = PathsAssembler::new(ws).assemble(&keys);
    for error in classpath.unresolved() {
        shell.warn(format!("{}; leaving it off the classpath", error));
        report.unresolved.push(error.key().to_string());
    }

    let renderer = DescriptorRenderer::new(ws, engine, &policy, &config_path);

    let dispatcher = match mode {
        RenderMode::PerComponent => {
            for component in &components {
                match renderer.write_component(component, &classpath) {
                    Ok(Some(descriptor)) => {
                        shell.status(Status::Created, descriptor.build_file.display());
                        shell.json_event(&serde_json::json!({
                            "reason": "descriptor-generated",
                            "component": component.id().to_string(),
                            "build_file": descriptor.build_file,
                            "target": descriptor.default_target,
                        }));
                        report.descriptors.push(descriptor);
                    }
                    Ok(None) => skip(shell, &mut report, component),
                    Err(e) => {
                        tracing::warn!("Generating build file for {} failed: {:#}", component.id(), e);
                        shell.error(format!("{:#}", e));
                        report.failed.push(FailedComponent {
                            component: component.id().clone(),
                            error: format!("{:#}", e),
                        });
                    }
                }
            }

            renderer.write_dispatcher(ws.root(), &report.descriptors)?
        }
        RenderMode::Aggregate => {
            for component in &components {
                if renderer.context(component, &classpath).is_none() {
                    skip(shell, &mut report, component);
                }
            }
            renderer.write_aggregate(ws.root(), components.iter().copied(), &classpath)?
        }
    };

    shell.status(Status::Created, dispatcher.build_file.display());
    span.finish_with_message(format!(
        "generating {} ({} mode)",
        dispatcher.build_file.display(),
        mode
    ));

    shell.json_event(&serde_json::json!({
        "reason": "generation-finished",
        "dispatcher": dispatcher.build_file,
        "descriptors": report.descriptors.len(),
        "skipped": report.skipped.len(),
        "failed": report.failed.len(),
    }));

    report.dispatcher = Some(dispatcher);
    Ok(report)
}

fn skip(shell: &Shell, report: &mut GenerationReport, component: &DevelopmentComponent) {
    shell.status(
        Status::Skipped,
        format!("{} (no Java sources to analyse)", component.id()),
    );
    report.skipped.push(component.id().clone());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::renderer::COMPONENT_BUILD_FILE;
    use crate::builder::template::{RenderContext, RenderError, TemplateName};
    use crate::core::layout::LocationResolver;
    use crate::core::reference::PublicPartReference;
    use crate::test_support::fixtures::{generate_config, sample_components};
    use crate::util::config::ConfigurationError;
    use tempfile::TempDir;

    fn shell() -> Arc<Shell> {
        Arc::new(Shell::quiet())
    }

    fn workspace(tmp: &TempDir, components: Vec<DevelopmentComponent>) -> Workspace {
        Workspace::from_components(tmp.path(), components).unwrap()
    }

    fn classpath_dirs(path: &std::path::Path) -> Vec<String> {
        let xml = std::fs::read_to_string(path).unwrap();
        let doc = roxmltree::Document::parse(&xml).unwrap();
        doc.descendants()
            .filter(|n| n.tag_name().name() == "path" && n.attribute("id") == Some("classpath"))
            .flat_map(|p| p.children().filter(|n| n.is_element()))
            .filter_map(|n| n.attribute("dir").map(str::to_string))
            .collect()
    }

    #[test]
    fn test_generate_sample_workspace() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(&tmp, sample_components());

        let report = generate(&ws, &generate_config(), &GenerateOptions::default(), &shell()).unwrap();

        assert_eq!(report.descriptors.len(), 3);
        assert!(report.skipped.is_empty());
        assert!(report.failed.is_empty());
        assert!(report.unresolved.is_empty());
        assert_eq!(report.descriptors[0].default_target, "checkstyle-vendor.com~dc1");

        let config = std::fs::read_to_string(tmp.path().join("checkstyle-config.xml")).unwrap();
        assert_eq!(config, generate_config().checkstyle_config);

        let dispatcher = report.dispatcher.unwrap();
        assert_eq!(dispatcher.build_file, tmp.path().join("checkstyle-build-all.xml"));
        assert!(dispatcher.build_file.is_file());

        // dc1 has no build-time references
        assert!(classpath_dirs(&report.descriptors[0].build_file).is_empty());

        // dc2 uses dc1's api and assembly parts
        let dc2 = classpath_dirs(&report.descriptors[1].build_file);
        assert_eq!(dc2.len(), 2);
        assert!(dc2[0].ends_with("dc1/_comp/gen/default/public/api/lib/java"));
        assert!(dc2[1].ends_with("dc1/_comp/gen/default/public/assembly/lib/java"));

        // dc3 only uses defLib at run time
        let dc3 = std::fs::read_to_string(&report.descriptors[2].build_file).unwrap();
        assert!(!dc3.contains("defLib"));
    }

    #[test]
    fn test_components_without_sources_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(
            &tmp,
            vec![
                DevelopmentComponent::new("vendor.com", "empty"),
                DevelopmentComponent::new("vendor.com", "types").with_source_folder("src/ddic"),
            ],
        );

        let report = generate(&ws, &generate_config(), &GenerateOptions::default(), &shell()).unwrap();

        assert!(report.descriptors.is_empty());
        assert_eq!(report.skipped.len(), 2);
        assert!(report.dispatcher.is_some());
    }

    #[test]
    fn test_missing_configuration_fails_before_writing() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(&tmp, sample_components());

        let err = generate(&ws, &GenerateConfig::default(), &GenerateOptions::default(), &shell())
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConfigurationError>(),
            Some(ConfigurationError::MissingConfiguration)
        ));
        assert!(!tmp.path().join("checkstyle-config.xml").exists());
    }

    #[test]
    fn test_invalid_regexp_is_configuration_error() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(&tmp, sample_components());
        let mut config = generate_config();
        config.exclude_contains_regexps = vec!["(".to_string()];

        let err = generate(&ws, &config, &GenerateOptions::default(), &shell()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigurationError>(),
            Some(ConfigurationError::InvalidRegexp { .. })
        ));
    }

    #[test]
    fn test_unresolved_reference_is_reported_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let mut components = sample_components();
        components[2] = components[2]
            .clone()
            .with_reference(PublicPartReference::new("vendor.com", "dc1", "missing").build_time());
        let ws = workspace(&tmp, components);

        let report = generate(&ws, &generate_config(), &GenerateOptions::default(), &shell()).unwrap();

        assert_eq!(report.descriptors.len(), 3);
        assert_eq!(report.unresolved, vec!["vendor.com/dc1#missing"]);
    }

    #[test]
    fn test_write_failure_is_isolated() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(&tmp, sample_components());

        // A file where dc2's base directory should be
        let dc2_base = ws.base_location(&ComponentId::new("vendor.com", "dc2"));
        std::fs::create_dir_all(dc2_base.parent().unwrap()).unwrap();
        std::fs::write(&dc2_base, "not a directory").unwrap();

        let report = generate(&ws, &generate_config(), &GenerateOptions::default(), &shell()).unwrap();

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].component, ComponentId::new("vendor.com", "dc2"));
        assert_eq!(report.descriptors.len(), 2);
        assert!(report.has_failures());
    }

    #[test]
    fn test_component_filter() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(&tmp, sample_components());
        let opts = GenerateOptions {
            components: vec![ComponentId::new("vendor.com", "dc2")],
            ..GenerateOptions::default()
        };

        let report = generate(&ws, &generate_config(), &opts, &shell()).unwrap();
        assert_eq!(report.descriptors.len(), 1);
        assert_eq!(report.descriptors[0].default_target, "checkstyle-vendor.com~dc2");

        let unknown = GenerateOptions {
            components: vec![ComponentId::new("vendor.com", "nope")],
            ..GenerateOptions::default()
        };
        assert!(generate(&ws, &generate_config(), &unknown, &shell()).is_err());
    }

    #[test]
    fn test_aggregate_mode() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(&tmp, sample_components());
        let opts = GenerateOptions {
            mode: Some(RenderMode::Aggregate),
            ..GenerateOptions::default()
        };

        let report = generate(&ws, &generate_config(), &opts, &shell()).unwrap();

        assert_eq!(report.mode, RenderMode::Aggregate);
        assert!(report.descriptors.is_empty());
        let dispatcher = report.dispatcher.unwrap();
        assert_eq!(dispatcher.default_target, "checkstyle-all");
        assert!(!ws
            .base_location(&ComponentId::new("vendor.com", "dc1"))
            .join(COMPONENT_BUILD_FILE)
            .exists());

        let xml = std::fs::read_to_string(&dispatcher.build_file).unwrap();
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let declared: Vec<_> = doc
            .root_element()
            .children()
            .filter(|n| n.tag_name().name() == "path")
            .filter_map(|n| n.attribute("id"))
            .collect();
        assert_eq!(declared, vec!["vendor.com~dc1~api", "vendor.com~dc1~assembly"]);
    }

    #[test]
    fn test_repeated_generation_is_identical() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(&tmp, sample_components());

        let first = generate(&ws, &generate_config(), &GenerateOptions::default(), &shell()).unwrap();
        let first_dc2 = std::fs::read_to_string(&first.descriptors[1].build_file).unwrap();
        let second = generate(&ws, &generate_config(), &GenerateOptions::default(), &shell()).unwrap();
        let second_dc2 = std::fs::read_to_string(&second.descriptors[1].build_file).unwrap();

        assert_eq!(first.descriptors, second.descriptors);
        assert_eq!(first_dc2, second_dc2);
    }

    struct CountingEngine(std::cell::Cell<usize>);

    impl TemplateEngine for CountingEngine {
        fn render(&self, template: TemplateName, context: &RenderContext) -> Result<String, RenderError> {
            self.0.set(self.0.get() + 1);
            AntTemplates.render(template, context)
        }
    }

    #[test]
    fn test_custom_engine() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(&tmp, sample_components());
        let engine = CountingEngine(std::cell::Cell::new(0));

        generate_with(&ws, &generate_config(), &GenerateOptions::default(), &engine, &shell())
            .unwrap();

        // three components plus the dispatcher
        assert_eq!(engine.0.get(), 4);
    }
}
