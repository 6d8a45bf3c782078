//! Test utilities and doubles for unit tests.
//!
//! Provides recording implementations of the seams that would otherwise
//! start external programs: [`BuildRunner`] (Ant) and [`Analyzer`]
//! (Checkstyle).
//!
//! # Example
//!
//! ```rust,ignore
//! use nwdi_checkstyle::test_support::RecordingRunner;
//!
//! let runner = RecordingRunner::succeeding();
//! run_checkstyle(&ws, &config, &opts, &runner, &shell)?;
//! assert_eq!(runner.calls()[0].target, "checkstyle-all");
//! ```

pub mod fixtures;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Result};

use crate::builder::analysis::{AnalysisOutcome, AnalysisRequest, Analyzer};
use crate::core::component::ComponentId;
use crate::ops::run::BuildRunner;

pub use fixtures::*;

/// One recorded Ant invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCall {
    pub build_file: PathBuf,
    pub target: String,
    pub properties: BTreeMap<String, String>,
}

/// [`BuildRunner`] that records its calls instead of running Ant.
#[derive(Debug)]
pub struct RecordingRunner {
    success: bool,
    calls: Mutex<Vec<RunCall>>,
}

impl RecordingRunner {
    /// Every target succeeds.
    pub fn succeeding() -> Self {
        RecordingRunner {
            success: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every target fails.
    pub fn failing() -> Self {
        RecordingRunner {
            success: false,
            ..Self::succeeding()
        }
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<RunCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl BuildRunner for RecordingRunner {
    fn run(
        &self,
        build_file: &Path,
        target: &str,
        properties: &BTreeMap<String, String>,
    ) -> Result<bool> {
        self.calls.lock().unwrap().push(RunCall {
            build_file: build_file.to_path_buf(),
            target: target.to_string(),
            properties: properties.clone(),
        });
        Ok(self.success)
    }
}

/// [`Analyzer`] that records requests instead of running Checkstyle.
#[derive(Debug, Default)]
pub struct RecordingAnalyzer {
    fail_for: Option<ComponentId>,
    requests: Mutex<Vec<AnalysisRequest>>,
}

impl RecordingAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the analysis of one component.
    pub fn failing_for(component: ComponentId) -> Self {
        RecordingAnalyzer {
            fail_for: Some(component),
            ..Self::default()
        }
    }

    /// Requests received so far, failed ones included.
    pub fn requests(&self) -> Vec<AnalysisRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Analyzer for RecordingAnalyzer {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisOutcome> {
        self.requests.lock().unwrap().push(request.clone());

        if self.fail_for.as_ref() == Some(&request.component) {
            bail!("checkstyle failed on {}", request.component);
        }

        Ok(AnalysisOutcome {
            component: request.component.clone(),
            files: request.file_count(),
            result_file: request.result_file.clone(),
            duration: Duration::from_millis(5),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::workspace::{ComponentSource, Workspace, COMPONENTS_FILE};
    use tempfile::TempDir;

    #[test]
    fn test_sample_manifest_matches_sample_components() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(COMPONENTS_FILE), SAMPLE_MANIFEST).unwrap();

        let loaded = Workspace::load(tmp.path()).unwrap();
        let built = Workspace::from_components(tmp.path(), sample_components()).unwrap();
        assert_eq!(loaded.components(), built.components());
    }

    #[test]
    fn test_recording_runner() {
        let runner = RecordingRunner::failing();
        let ok = runner
            .run(Path::new("build.xml"), "all", &BTreeMap::new())
            .unwrap();

        assert!(!ok);
        assert_eq!(runner.calls().len(), 1);
        assert_eq!(runner.calls()[0].target, "all");
    }
}
