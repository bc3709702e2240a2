//! Per-output build results.

use super::vhosts::SkippedSite;

/// What happened to one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Rendered (and written unless dry-run). Unresolved placeholders were left in place.
    Written { unresolved: Vec<String> },
    /// Source template absent; the output is not configured.
    NotConfigured,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    /// Output path relative to the destination tree.
    pub output: String,
    pub outcome: BuildOutcome,
}

impl BuildResult {
    pub fn written(output: impl Into<String>, unresolved: Vec<String>) -> Self {
        Self { output: output.into(), outcome: BuildOutcome::Written { unresolved } }
    }

    pub fn not_configured(output: impl Into<String>) -> Self {
        Self { output: output.into(), outcome: BuildOutcome::NotConfigured }
    }

    pub fn failed(output: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { output: output.into(), outcome: BuildOutcome::Failed { reason: reason.into() } }
    }

    pub fn success(&self) -> bool {
        !matches!(self.outcome, BuildOutcome::Failed { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            BuildOutcome::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    pub fn unresolved(&self) -> &[String] {
        match &self.outcome {
            BuildOutcome::Written { unresolved } => unresolved,
            _ => &[],
        }
    }
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub results: Vec<BuildResult>,
    pub skipped_sites: Vec<SkippedSite>,
    /// Sites rendered into the vhosts output.
    pub sites_generated: usize,
    pub dry_run: bool,
}

impl BuildReport {
    pub fn built(&self) -> usize {
        self.count(|o| matches!(o, BuildOutcome::Written { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, BuildOutcome::Failed { .. }))
    }

    pub fn not_configured(&self) -> usize {
        self.count(|o| matches!(o, BuildOutcome::NotConfigured))
    }

    pub fn unresolved_total(&self) -> usize {
        self.results.iter().map(|r| r.unresolved().len()).sum()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// No failures, no unresolved placeholders and no skipped sites.
    pub fn is_clean(&self) -> bool {
        self.is_success() && self.unresolved_total() == 0 && self.skipped_sites.is_empty()
    }

    pub fn result_for(&self, output: &str) -> Option<&BuildResult> {
        self.results.iter().find(|r| r.output == output)
    }

    fn count(&self, pred: impl Fn(&BuildOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }
}
