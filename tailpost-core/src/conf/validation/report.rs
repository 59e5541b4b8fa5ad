use crate::conf::validation::Origin;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
    pub origin: Origin,
    pub help: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

#[derive(Serialize)]
struct ValidationReportJson<'a> {
    errors: &'a [ValidationIssue],
    warnings: &'a [ValidationIssue],
}

impl ValidationReport {
    pub fn has_violations(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub(crate) fn error(&mut self, message: String, origin: &Origin, help: Option<String>) {
        self.errors.push(ValidationIssue {
            severity: Severity::Error,
            message,
            origin: origin.clone(),
            help,
        });
    }

    pub(crate) fn warning(&mut self, message: String, origin: &Origin, help: Option<String>) {
        self.warnings.push(ValidationIssue {
            severity: Severity::Warning,
            message,
            origin: origin.clone(),
            help,
        });
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&ValidationReportJson {
            errors: &self.errors,
            warnings: &self.warnings,
        })
    }

    pub fn render_plain(&self) -> String {
        let mut out = String::new();
        for issue in self.errors.iter().chain(self.warnings.iter()) {
            let severity = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };

            out.push_str(&format!("{}: {}: {}\n", issue.origin, severity, issue.message));

            if let Some(help) = &issue.help {
                out.push_str(&format!("  help: {}\n", help));
            }
        }
        out
    }

    pub fn render_pretty(&self) -> String {
        let mut out = String::new();
        if self.has_violations() {
            out.push_str(&format!(
                "configuration validation failed ({} errors, {} warnings)\n\n",
                self.errors.len(),
                self.warnings.len()
            ));
        }

        let mut by_file: BTreeMap<&Path, Vec<&ValidationIssue>> = BTreeMap::new();
        for issue in self.errors.iter().chain(self.warnings.iter()) {
            by_file.entry(issue.origin.file()).or_default().push(issue);
        }

        for (file, issues) in by_file {
            out.push_str(&format!("{}\n", file.display()));

            for issue in issues {
                let label = match issue.severity {
                    Severity::Error => "error".red().bold().to_string(),
                    Severity::Warning => "warning".yellow().bold().to_string(),
                };
                out.push_str(&format!("  {}: [{}] {}\n", label, issue.origin.section, issue.message));
                if let Some(help) = &issue.help {
                    out.push_str(&format!("    {}: {}\n", "help".cyan(), help));
                }
                out.push('\n');
            }
        }
        out
    }
}

/// Tail Spec Validation
impl ValidationReport {
    pub fn no_files(&mut self, origin: &Origin) {
        self.error(
            "no files configured".to_string(),
            origin,
            Some("List at least one path or glob pattern in tail.files.".to_string()),
        );
    }

    pub fn empty_file_entry(&mut self, origin: &Origin) {
        self.error("empty file entry".to_string(), origin, None);
    }

    pub fn invalid_count(&mut self, count: u64, max: u64, origin: &Origin) {
        self.error(
            format!("invalid count - must be at most {}: {}", max, count),
            origin,
            None,
        );
    }

    pub fn invalid_poll_interval(&mut self, secs: u64, max: u64, origin: &Origin) {
        self.error(
            format!(
                "invalid poll interval - must be between 1 and {} seconds: {}",
                max, secs
            ),
            origin,
            None,
        );
    }

    pub fn zero_count(&mut self, origin: &Origin) {
        self.warning(
            "count is 0 - no initial window is emitted; only appended data is followed"
                .to_string(),
            origin,
            None,
        );
    }

    pub fn zero_count_from_top(&mut self, origin: &Origin) {
        self.warning(
            "count is 0 with from = \"top\" - treated as 1 (the whole file)".to_string(),
            origin,
            None,
        );
    }
}

/// Sink Spec Validation
impl ValidationReport {
    pub fn invalid_destination(&mut self, destination: &str, reason: &str, origin: &Origin) {
        self.error(
            format!("invalid destination '{}': {}", destination, reason),
            origin,
            Some("Use an absolute http:// or https:// URL.".to_string()),
        );
    }

    pub fn invalid_timeout(&mut self, origin: &Origin) {
        self.error(
            "invalid sink timeout - must be greater than 0".to_string(),
            origin,
            None,
        );
    }

    pub fn fail_policy_without_destination(&mut self, origin: &Origin) {
        self.warning(
            "on_failure = \"fail\" has no effect without a destination".to_string(),
            origin,
            None,
        );
    }
}
