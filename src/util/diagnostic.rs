//! User-friendly diagnostic messages.
//!
//! Every error printed by the CLI includes its root cause chain and, where
//! one exists, a suggested fix.

use std::fmt;
use std::path::PathBuf;

use crate::core::workspace::ManifestError;
use crate::ops::run::RunError;
use crate::ops::UnknownComponent;
use crate::util::config::ConfigurationError;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no components manifest is found.
    pub const NO_MANIFEST: &str =
        "Create a `components.toml` listing the development components, or pass `--workspace`";

    /// Suggestion when the checkstyle configuration is missing.
    pub const NO_CHECKSTYLE_CONFIG: &str =
        "Set `checkstyle.config` in `.nwdi-checkstyle/config.toml`";

    /// Suggestion when a component filter matches nothing.
    pub const UNKNOWN_COMPONENT: &str = "Run `nwdi-checkstyle paths` to list the workspace";

    /// Suggestion printed with references left off the classpath.
    pub const UNRESOLVED_REFERENCE: &str =
        "Check the `uses` entries and `public-parts` in components.toml";

    /// Suggestion when a component id is not a plain relative path.
    pub const INVALID_COMPONENT: &str =
        "Use plain `vendor` and `name` values without `..` or empty segments";

    /// Suggestion when Ant is missing.
    pub const NO_ANT: &str = "Install Apache Ant or set `ant.program` in the configuration";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Error,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            ..Diagnostic::error(message)
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Build a diagnostic from an error chain, attaching known suggestions.
    pub fn from_error(err: &anyhow::Error) -> Self {
        let mut diag = Diagnostic::error(err.to_string());

        for cause in err.chain().skip(1) {
            diag = diag.with_context(cause.to_string());
        }

        if let Some(config_err) = err.downcast_ref::<ConfigurationError>() {
            if matches!(config_err, ConfigurationError::MissingConfiguration) {
                diag = diag.with_suggestion(suggestions::NO_CHECKSTYLE_CONFIG);
            }
        } else if let Some(manifest_err) = err.downcast_ref::<ManifestError>() {
            match manifest_err {
                ManifestError::NotFound { dir } => {
                    diag = diag
                        .with_location(dir.clone())
                        .with_suggestion(suggestions::NO_MANIFEST);
                }
                ManifestError::InvalidComponent { .. } => {
                    diag = diag.with_suggestion(suggestions::INVALID_COMPONENT);
                }
                _ => {}
            }
        } else if err.downcast_ref::<UnknownComponent>().is_some() {
            diag = diag.with_suggestion(suggestions::UNKNOWN_COMPONENT);
        } else if let Some(RunError::AntNotFound) = err.downcast_ref::<RunError>() {
            diag = diag.with_suggestion(suggestions::NO_ANT);
        }

        diag
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            match self.severity {
                Severity::Error => "\x1b[1;31merror\x1b[0m",
                Severity::Warning => "\x1b[1;33mwarning\x1b[0m",
            }
        } else {
            match self.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            }
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  caused by: {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
