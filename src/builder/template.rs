//! Build file templates.
//!
//! A [`TemplateEngine`] renders a named template from a typed
//! [`RenderContext`]. [`AntTemplates`] is the built-in engine producing Ant
//! build files that drive the Checkstyle Ant task.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::builder::excludes::JAVA_SOURCES;
use crate::builder::paths::ClasspathEntry;
use crate::builder::renderer::BuildDescriptor;
use crate::core::id;
use crate::util::fs::ant_path;
use crate::util::xml::XmlWriter;

/// Resource defining the `checkstyle` Ant task.
const CHECKSTYLE_TASK_RESOURCE: &str = "com/puppycrawl/tools/checkstyle/ant/checkstyle-ant-task.properties";

/// Id of the per-component classpath inside a component build file.
const CLASSPATH_ID: &str = "classpath";

/// Templates known to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateName {
    /// Build file of one component
    ComponentBuild,
    /// Workspace build file calling every component build file
    Dispatcher,
    /// Single workspace build file holding every component target
    Aggregate,
}

impl TemplateName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateName::ComponentBuild => "checkstyle-build",
            TemplateName::Dispatcher => "checkstyle-build-all",
            TemplateName::Aggregate => "checkstyle-build-aggregate",
        }
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to render the analysis of one component.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentContext {
    pub vendor: String,
    /// Component name with `/` replaced by `~`
    pub component: String,
    /// `checkstyle-vendor~name`
    pub target: String,
    /// Base directory of the component; becomes the project basedir
    pub component_base: PathBuf,
    /// Absolute source and test source folders, data dictionary folders removed
    pub source_paths: Vec<PathBuf>,
    pub checkstyle_config: PathBuf,
    pub excludes: Vec<String>,
    pub exclude_contains_regexps: Vec<String>,
    /// Build-time classpath of the component, sorted by id
    pub classpaths: Vec<ClasspathEntry>,
    /// Output folder, relative to the component base
    pub classes: String,
    pub result_file: PathBuf,
}

/// The dispatcher calls the default target of each component build file.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatcherContext {
    pub basedir: PathBuf,
    pub build_files: Vec<BuildDescriptor>,
}

/// One file for all components; classpath entries are declared once.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateContext {
    pub basedir: PathBuf,
    pub classpath: Vec<ClasspathEntry>,
    pub components: Vec<ComponentContext>,
}

/// Input of a template.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderContext {
    Component(ComponentContext),
    Dispatcher(DispatcherContext),
    Aggregate(AggregateContext),
}

impl RenderContext {
    fn kind(&self) -> &'static str {
        match self {
            RenderContext::Component(_) => "component",
            RenderContext::Dispatcher(_) => "dispatcher",
            RenderContext::Aggregate(_) => "aggregate",
        }
    }
}

/// Errors rendering a template.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template `{template}` cannot be rendered from a {context} context")]
    ContextMismatch {
        template: TemplateName,
        context: &'static str,
    },

    #[error("failed to render template `{template}`: {message}")]
    Template {
        template: TemplateName,
        message: String,
    },
}

/// Renders named templates.
pub trait TemplateEngine {
    fn render(&self, template: TemplateName, context: &RenderContext) -> Result<String, RenderError>;
}

/// Built-in Ant build file templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct AntTemplates;

impl TemplateEngine for AntTemplates {
    fn render(&self, template: TemplateName, context: &RenderContext) -> Result<String, RenderError> {
        match (template, context) {
            (TemplateName::ComponentBuild, RenderContext::Component(ctx)) => {
                Ok(component_build(ctx))
            }
            (TemplateName::Dispatcher, RenderContext::Dispatcher(ctx)) => Ok(dispatcher(ctx)),
            (TemplateName::Aggregate, RenderContext::Aggregate(ctx)) => Ok(aggregate(ctx)),
            _ => Err(RenderError::ContextMismatch {
                template,
                context: context.kind(),
            }),
        }
    }
}

fn component_build(ctx: &ComponentContext) -> String {
    let base = ant_path(&ctx.component_base);

    let mut xml = XmlWriter::new();
    xml.start(
        "project",
        &[
            ("name", ctx.target.as_str()),
            ("default", ctx.target.as_str()),
            ("basedir", base.as_str()),
        ],
    );
    xml.comment(&format!("{}/{}", ctx.vendor, ctx.component));
    taskdef(&mut xml);

    xml.start("path", &[("id", CLASSPATH_ID)]);
    for entry in &ctx.classpaths {
        jar_fileset(&mut xml, entry);
    }
    xml.end();

    xml.start("target", &[("name", ctx.target.as_str())]);
    checkstyle_task(&mut xml, ctx, |xml| {
        xml.empty("classpath", &[("refid", CLASSPATH_ID)]);
    });
    xml.end();

    xml.finish()
}

fn dispatcher(ctx: &DispatcherContext) -> String {
    let basedir = ant_path(&ctx.basedir);
    let mut xml = XmlWriter::new();
    xml.start(
        "project",
        &[
            ("name", id::ALL_TARGET),
            ("default", id::ALL_TARGET),
            ("basedir", basedir.as_str()),
        ],
    );

    xml.start("target", &[("name", id::ALL_TARGET)]);
    for descriptor in &ctx.build_files {
        let antfile = ant_path(&descriptor.build_file);
        let dir = descriptor
            .build_file
            .parent()
            .map(ant_path)
            .unwrap_or_else(|| ".".to_string());
        xml.empty(
            "ant",
            &[
                ("antfile", antfile.as_str()),
                ("dir", dir.as_str()),
                ("target", descriptor.default_target.as_str()),
                ("inheritAll", "true"),
            ],
        );
    }
    xml.end();

    xml.finish()
}

fn aggregate(ctx: &AggregateContext) -> String {
    let basedir = ant_path(&ctx.basedir);
    let mut xml = XmlWriter::new();
    xml.start(
        "project",
        &[
            ("name", id::ALL_TARGET),
            ("default", id::ALL_TARGET),
            ("basedir", basedir.as_str()),
        ],
    );
    taskdef(&mut xml);

    for entry in &ctx.classpath {
        xml.start("path", &[("id", entry.id.as_str())]);
        jar_fileset(&mut xml, entry);
        xml.end();
    }

    let depends = ctx
        .components
        .iter()
        .map(|c| c.target.as_str())
        .collect::<Vec<_>>()
        .join(",");
    if depends.is_empty() {
        xml.empty("target", &[("name", id::ALL_TARGET)]);
    } else {
        xml.empty(
            "target",
            &[("name", id::ALL_TARGET), ("depends", depends.as_str())],
        );
    }

    for component in &ctx.components {
        xml.comment(&format!("{}/{}", component.vendor, component.component));
        xml.start("target", &[("name", component.target.as_str())]);
        checkstyle_task(&mut xml, component, |xml| {
            if component.classpaths.is_empty() {
                return;
            }
            xml.start("classpath", &[]);
            for entry in &component.classpaths {
                xml.empty("path", &[("refid", entry.id.as_str())]);
            }
            xml.end();
        });
        xml.end();
    }

    xml.finish()
}

fn taskdef(xml: &mut XmlWriter) {
    xml.start("taskdef", &[("resource", CHECKSTYLE_TASK_RESOURCE)])
        .start("classpath", &[])
        .empty("fileset", &[("dir", "${checkstyle.dir}"), ("includes", "*.jar")])
        .end()
        .end();
}

fn jar_fileset(xml: &mut XmlWriter, entry: &ClasspathEntry) {
    let dir = ant_path(&entry.location);
    xml.empty(
        "fileset",
        &[("dir", dir.as_str()), ("includes", entry.include.as_str())],
    );
}

/// `<checkstyle>` with formatter, classpath and one fileset per source path.
fn checkstyle_task(
    xml: &mut XmlWriter,
    ctx: &ComponentContext,
    classpath: impl FnOnce(&mut XmlWriter),
) {
    let result = ant_path(&ctx.result_file);
    if let Some(parent) = ctx.result_file.parent() {
        let dir = ant_path(parent);
        xml.empty("mkdir", &[("dir", dir.as_str())]);
    }

    let config = ant_path(&ctx.checkstyle_config);
    let mut attrs = vec![("config", config.as_str()), ("failOnViolation", "false")];
    if !ctx.classes.is_empty() {
        attrs.push(("classpath", ctx.classes.as_str()));
    }
    xml.start("checkstyle", &attrs);
    xml.empty("formatter", &[("type", "xml"), ("tofile", result.as_str())]);
    classpath(xml);

    for source in &ctx.source_paths {
        source_fileset(xml, source, &ctx.excludes, &ctx.exclude_contains_regexps);
    }
    xml.end();
}

fn source_fileset(xml: &mut XmlWriter, dir: &Path, excludes: &[String], regexps: &[String]) {
    let dir = ant_path(dir);
    xml.start("fileset", &[("dir", dir.as_str()), ("includes", JAVA_SOURCES)]);
    for exclude in excludes {
        xml.empty("exclude", &[("name", exclude.as_str())]);
    }
    if !regexps.is_empty() {
        xml.start("not", &[]).start("or", &[]);
        for expression in regexps {
            xml.empty("containsregexp", &[("expression", expression.as_str())]);
        }
        xml.end().end();
    }
    xml.end();
}
