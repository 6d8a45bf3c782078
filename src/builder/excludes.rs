//! Which sources are analysed.
//!
//! Three filters apply, in this order:
//! 1. data dictionary folders are never analysed;
//! 2. Ant-style filename patterns exclude files by relative path;
//! 3. regular expressions exclude files whose content matches any of them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use regex::Regex;
use walkdir::WalkDir;

use crate::core::component::{ComponentType, DevelopmentComponent};
use crate::core::layout::join_folder;
use crate::util::config::ConfigurationError;
use crate::util::fs::{read_lossy, relative_slash_path};

/// Include pattern for analysed sources.
pub const JAVA_SOURCES: &str = "**/*.java";

/// Folder names holding generated data dictionary sources.
const DATA_DICTIONARY_FOLDERS: &[&str] = &["ddic", "gen_ddic"];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Whether a source folder holds data dictionary content.
pub fn is_data_dictionary_folder(folder: &str) -> bool {
    folder
        .split(['/', '\\'])
        .any(|segment| DATA_DICTIONARY_FOLDERS.contains(&segment))
}

/// Absolute source and test source folders of a component below `base`,
/// without data dictionary folders.
///
/// Dictionary components contribute no folders at all.
pub fn source_paths(component: &DevelopmentComponent, base: &Path) -> Vec<PathBuf> {
    if component.component_type() == ComponentType::Dictionary {
        return Vec::new();
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for folder in component
        .source_folders()
        .iter()
        .chain(component.test_source_folders())
    {
        if is_data_dictionary_folder(folder) {
            tracing::debug!("Ignoring data dictionary folder {} of {}", folder, component.id());
            continue;
        }
        let path = join_folder(base, folder);
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}

/// Compiled filename and content excludes.
#[derive(Debug, Clone, Default)]
pub struct ExcludePolicy {
    excludes: Vec<String>,
    patterns: Vec<Pattern>,
    expressions: Vec<String>,
    regexes: Vec<Regex>,
}

impl ExcludePolicy {
    /// Compile the patterns. Empty entries are ignored.
    pub fn new(excludes: &[String], expressions: &[String]) -> Result<Self, ConfigurationError> {
        let mut policy = ExcludePolicy::default();

        for exclude in excludes.iter().filter(|e| !e.trim().is_empty()) {
            let pattern = Pattern::new(&ant_pattern(exclude)).map_err(|source| {
                ConfigurationError::InvalidExclude {
                    pattern: exclude.clone(),
                    source,
                }
            })?;
            policy.excludes.push(exclude.clone());
            policy.patterns.push(pattern);
        }

        for expression in expressions.iter().filter(|e| !e.trim().is_empty()) {
            let regex = Regex::new(expression).map_err(|source| {
                ConfigurationError::InvalidRegexp {
                    expression: expression.clone(),
                    source,
                }
            })?;
            policy.expressions.push(expression.clone());
            policy.regexes.push(regex);
        }

        Ok(policy)
    }

    /// Filename exclude patterns as given.
    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    /// Content exclude expressions as given.
    pub fn contains_regexps(&self) -> &[String] {
        &self.expressions
    }

    /// Whether a path relative to its source folder (`/`-separated) is
    /// excluded by name.
    pub fn is_excluded_name(&self, relative: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_with(relative, MATCH_OPTIONS))
    }

    /// Whether any line of `content` matches any content expression.
    pub fn is_excluded_content(&self, content: &str) -> bool {
        if self.regexes.is_empty() {
            return false;
        }
        content
            .lines()
            .any(|line| self.regexes.iter().any(|r| r.is_match(line)))
    }

    /// Java sources below `dir` that survive all excludes, sorted.
    pub fn select_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let include = Pattern::new(JAVA_SOURCES).context("invalid include pattern")?;
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry =
                entry.with_context(|| format!("failed to walk source folder: {}", dir.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = relative_slash_path(dir, path);
            if !include.matches_with(&relative, MATCH_OPTIONS) || self.is_excluded_name(&relative)
            {
                continue;
            }

            if !self.regexes.is_empty() && self.is_excluded_content(&read_lossy(path)?) {
                tracing::debug!("Excluded by content: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        Ok(files)
    }
}

/// Ant treats a trailing `/` as `/**`.
fn ant_pattern(pattern: &str) -> String {
    let pattern = pattern.trim().replace('\\', "/");
    if pattern.ends_with('/') {
        format!("{}**", pattern)
    } else {
        pattern
    }
}
