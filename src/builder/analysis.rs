//! Direct analysis - run Checkstyle over file sets without going through Ant.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::core::component::ComponentId;
use crate::util::process::{find_java, ProcessBuilder};

/// Sources below one source folder selected for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// One analysis run of one component.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub component: ComponentId,
    /// Checkstyle configuration file
    pub config: PathBuf,
    pub file_sets: Vec<FileSet>,
    /// XML report location
    pub result_file: PathBuf,
    /// Treat rule violations as a failed run
    pub fail_on_violation: bool,
}

impl AnalysisRequest {
    /// All files of all file sets.
    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.file_sets.iter().flat_map(|set| set.files.iter())
    }

    pub fn file_count(&self) -> usize {
        self.file_sets.iter().map(|set| set.files.len()).sum()
    }
}

/// What an analysis run did.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub component: ComponentId,
    pub files: usize,
    pub result_file: PathBuf,
    #[serde(skip)]
    pub duration: Duration,
}

/// Runs Checkstyle.
pub trait Analyzer {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisOutcome>;
}

/// Runs the Checkstyle command line through `java -jar`.
#[derive(Debug, Clone)]
pub struct CommandAnalyzer {
    java: PathBuf,
    jar: PathBuf,
}

impl CommandAnalyzer {
    pub fn new(java: impl Into<PathBuf>, jar: impl Into<PathBuf>) -> Self {
        CommandAnalyzer {
            java: java.into(),
            jar: jar.into(),
        }
    }

    /// Use the configured java and jar, falling back to `JAVA_HOME`/PATH for java.
    pub fn from_config(java: Option<&Path>, jar: Option<&Path>) -> Result<Self> {
        let Some(jar) = jar else {
            bail!("no checkstyle jar configured; set `analysis.jar` in the configuration");
        };
        let java = match java {
            Some(java) => java.to_path_buf(),
            None => find_java().context("java not found in JAVA_HOME or PATH")?,
        };
        Ok(CommandAnalyzer::new(java, jar))
    }

    /// `java -jar <jar> -c <config> -f xml -o <result> <files...>`
    pub fn command(&self, request: &AnalysisRequest) -> ProcessBuilder {
        ProcessBuilder::new(&self.java)
            .arg("-jar")
            .arg(&self.jar)
            .arg("-c")
            .arg(&request.config)
            .args(["-f", "xml", "-o"])
            .arg(&request.result_file)
            .args(request.files())
    }
}

impl Analyzer for CommandAnalyzer {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisOutcome> {
        let start = Instant::now();
        let files = request.file_count();

        if files > 0 {
            // A report left over from an earlier run must not pass for this one.
            if request.result_file.exists() {
                std::fs::remove_file(&request.result_file).with_context(|| {
                    format!(
                        "failed to remove previous result `{}`",
                        request.result_file.display()
                    )
                })?;
            }

            let cmd = self.command(request);
            tracing::debug!("Running {}", cmd.display_command());
            let output = cmd.exec()?;

            // Checkstyle exits with the number of violations.
            let reported = request.result_file.is_file();
            if !output.status.success() && (request.fail_on_violation || !reported) {
                bail!(
                    "checkstyle failed on {} with exit code {:?}\n{}",
                    request.component,
                    output.status.code(),
                    String::from_utf8_lossy(&output.stderr)
                );
            }
        }

        Ok(AnalysisOutcome {
            component: request.component.clone(),
            files,
            result_file: request.result_file.clone(),
            duration: start.elapsed(),
        })
    }
}
