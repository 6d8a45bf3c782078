//! Implementation of `nwdi-checkstyle check`: run the analysis directly,
//! one component at a time, without generating build files.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::builder::analysis::{AnalysisOutcome, AnalysisRequest, Analyzer, FileSet};
use crate::builder::excludes::{source_paths, ExcludePolicy};
use crate::core::component::{ComponentId, DevelopmentComponent};
use crate::core::layout::LocationResolver;
use crate::core::Workspace;
use crate::ops::generate::FailedComponent;
use crate::ops::select_components;
use crate::util::config::GenerateConfig;
use crate::util::fs::{ensure_dir, write_string};
use crate::util::shell::{format_duration, Shell, Status};

/// Options for `check`.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Components to analyse (empty = all)
    pub components: Vec<ComponentId>,
}

/// What a direct analysis did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub analyzed: Vec<AnalysisOutcome>,
    pub skipped: Vec<ComponentId>,
    pub failed: Vec<FailedComponent>,
}

impl CheckReport {
    /// Number of files handed to the analyzer.
    pub fn file_count(&self) -> usize {
        self.analyzed.iter().map(|o| o.files).sum()
    }
}

/// Analyse every selected component with `analyzer`.
///
/// A component whose analysis fails is logged and recorded; the next one
/// is still analysed.
pub fn check(
    ws: &Workspace,
    config: &GenerateConfig,
    opts: &CheckOptions,
    analyzer: &dyn Analyzer,
    shell: &Arc<Shell>,
) -> Result<CheckReport> {
    config.validate()?;
    let policy = ExcludePolicy::new(&config.excludes, &config.exclude_contains_regexps)?;

    let config_path = ws.checkstyle_config_path();
    write_string(&config_path, &config.checkstyle_config)
        .context("failed to write checkstyle configuration into the workspace")?;

    let components = select_components(ws, &opts.components)?;
    let mut report = CheckReport::default();
    let mut progress = shell.progress(components.len() as u64, "Analyzing");

    for component in components {
        let outcome = prepare(ws, component, &policy, &config_path, shell)
            .and_then(|request| match request {
                Some(request) => analyze(analyzer, &request, shell).map(Some),
                None => Ok(None),
            });

        match outcome {
            Ok(Some(outcome)) => report.analyzed.push(outcome),
            Ok(None) => {
                shell.status(Status::Skipped, format!("{} (no existing source folders)", component.id()));
                report.skipped.push(component.id().clone());
            }
            Err(e) => {
                tracing::warn!("Analysis of {} failed: {:#}", component.id(), e);
                shell.error(format!("{:#}", e));
                report.failed.push(FailedComponent {
                    component: component.id().clone(),
                    error: format!("{:#}", e),
                });
            }
        }
        progress.inc(1);
    }
    progress.finish();

    Ok(report)
}

/// Build the request for one component, or `None` when none of its source
/// folders exist.
fn prepare(
    ws: &Workspace,
    component: &DevelopmentComponent,
    policy: &ExcludePolicy,
    config: &std::path::Path,
    shell: &Shell,
) -> Result<Option<AnalysisRequest>> {
    let base = ws.base_location(component.id());
    let mut file_sets = Vec::new();

    for dir in source_paths(component, &base) {
        if !dir.is_dir() {
            shell.warn(format!(
                "source folder {} does not exist in {}",
                dir.display(),
                component.id()
            ));
            continue;
        }
        let files = policy.select_files(&dir)?;
        file_sets.push(FileSet { dir, files });
    }

    if file_sets.is_empty() {
        return Ok(None);
    }

    let result_file = ws.result_location(component.id());
    if let Some(parent) = result_file.parent() {
        ensure_dir(parent)
            .with_context(|| format!("{} could not be created", parent.display()))?;
    }

    Ok(Some(AnalysisRequest {
        component: component.id().clone(),
        config: PathBuf::from(config),
        file_sets,
        result_file,
        fail_on_violation: false,
    }))
}

fn analyze(
    analyzer: &dyn Analyzer,
    request: &AnalysisRequest,
    shell: &Shell,
) -> Result<AnalysisOutcome> {
    shell.status(
        Status::Analyzing,
        format!("Running checkstyle analysis on {}...", request.component),
    );
    let outcome = analyzer.analyze(request)?;

    tracing::debug!(
        "Running checkstyle analysis on {}... ({:.3} sec.)",
        request.component,
        outcome.duration.as_secs_f64()
    );
    shell.status(
        Status::Finished,
        format!(
            "{} ({} file(s), {})",
            request.component,
            outcome.files,
            format_duration(outcome.duration)
        ),
    );
    shell.json_event(&serde_json::json!({
        "reason": "analysis-finished",
        "component": request.component.to_string(),
        "files": outcome.files,
        "result_file": outcome.result_file,
    }));

    Ok(outcome)
}
