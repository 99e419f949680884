//! Step pipeline: ordered, fail-fast execution of named operations.
//!
//! Each step moves `Pending -> Running -> Succeeded | Failed`. The first
//! failure stops the pipeline; steps after it end as `Skipped`. Nothing that
//! already ran is rolled back.

use crate::error::RenameError;
use serde::Serialize;
use std::fmt;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    /// Never ran because an earlier step failed.
    Skipped,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StepStatus::Pending => "pending",
            StepStatus::Running => "running",
            StepStatus::Succeeded => "succeeded",
            StepStatus::Failed => "failed",
            StepStatus::Skipped => "skipped",
        };
        f.write_str(label)
    }
}

type StepWork<'a> = Box<dyn FnOnce() -> Result<(), RenameError> + 'a>;

/// A named unit of work.
pub struct Step<'a> {
    name: String,
    work: StepWork<'a>,
}

impl<'a> Step<'a> {
    pub fn new(
        name: impl Into<String>,
        work: impl FnOnce() -> Result<(), RenameError> + 'a,
    ) -> Self {
        Self {
            name: name.into(),
            work: Box::new(work),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Step<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step").field("name", &self.name).finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepResult {
    pub name: String,
    pub status: StepStatus,
    pub message: Option<String>,
}

/// Final status of every step, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[must_use = "PipelineReport should be checked for failed steps"]
pub struct PipelineReport {
    pub name: String,
    pub steps: Vec<StepResult>,
}

impl PipelineReport {
    pub fn is_success(&self) -> bool {
        self.steps
            .iter()
            .all(|step| step.status == StepStatus::Succeeded)
    }

    pub fn failed_step(&self) -> Option<&StepResult> {
        self.steps
            .iter()
            .find(|step| step.status == StepStatus::Failed)
    }

    pub fn status_of(&self, name: &str) -> Option<StepStatus> {
        self.steps
            .iter()
            .find(|step| step.name == name)
            .map(|step| step.status)
    }

    pub fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|step| step.status == status).count()
    }
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name)?;
        for step in &self.steps {
            match &step.message {
                Some(message) => writeln!(f, "  [{}] {}: {}", step.status, step.name, message)?,
                None => writeln!(f, "  [{}] {}", step.status, step.name)?,
            }
        }
        Ok(())
    }
}

/// Run `steps` in order, stopping at the first failure.
///
/// `script_infos` runs once before the first step and is meant for
/// printing pipeline-level details.
pub fn run_script<'a>(
    name: &str,
    steps: Vec<Step<'a>>,
    script_infos: impl FnOnce(),
) -> PipelineReport {
    let mut results: Vec<StepResult> = steps
        .iter()
        .map(|step| StepResult {
            name: step.name.clone(),
            status: StepStatus::Pending,
            message: None,
        })
        .collect();

    info!(pipeline = name, steps = steps.len(), "starting pipeline");
    script_infos();

    for (index, step) in steps.into_iter().enumerate() {
        let result = &mut results[index];
        result.status = StepStatus::Running;
        info!(step = %result.name, "running step");

        match (step.work)() {
            Ok(()) => {
                result.status = StepStatus::Succeeded;
                info!(step = %result.name, "step succeeded");
            }
            Err(err) => {
                error!(step = %result.name, error = %err, "step failed");
                result.status = StepStatus::Failed;
                result.message = Some(err.to_string());
                break;
            }
        }
    }

    for result in &mut results {
        if result.status == StepStatus::Pending {
            result.status = StepStatus::Skipped;
        }
    }

    PipelineReport {
        name: name.to_string(),
        steps: results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    fn failing(message: &str) -> RenameError {
        RenameError::io(
            PathBuf::from("x"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, message.to_string()),
        )
    }

    #[test]
    fn all_steps_succeed() {
        let log = RefCell::new(Vec::new());
        let steps = vec![
            Step::new("one", || {
                log.borrow_mut().push("one");
                Ok(())
            }),
            Step::new("two", || {
                log.borrow_mut().push("two");
                Ok(())
            }),
        ];

        let report = run_script("demo", steps, || log.borrow_mut().push("infos"));

        assert!(report.is_success());
        assert_eq!(*log.borrow(), vec!["infos", "one", "two"]);
        assert_eq!(report.count(StepStatus::Succeeded), 2);
        assert!(report.failed_step().is_none());
    }

    #[test]
    fn stops_at_first_failure() {
        let ran_third = RefCell::new(false);
        let steps = vec![
            Step::new("first", || Ok(())),
            Step::new("second", || Err(failing("locked"))),
            Step::new("third", || {
                *ran_third.borrow_mut() = true;
                Ok(())
            }),
        ];

        let report = run_script("demo", steps, || {});

        assert!(!*ran_third.borrow());
        assert_eq!(report.status_of("first"), Some(StepStatus::Succeeded));
        assert_eq!(report.status_of("second"), Some(StepStatus::Failed));
        assert_eq!(report.status_of("third"), Some(StepStatus::Skipped));
        let failed = report.failed_step().unwrap();
        assert!(failed.message.as_deref().unwrap().contains("locked"));
        assert!(report.steps[2].message.is_none());
    }

    #[test]
    fn empty_pipeline_is_successful() {
        let report = run_script("nothing", Vec::new(), || {});
        assert!(report.is_success());
        assert!(report.steps.is_empty());
    }

    #[test]
    fn display_lists_every_step() {
        let report = run_script(
            "demo",
            vec![
                Step::new("a", || Ok(())),
                Step::new("b", || Err(failing("boom"))),
            ],
            || {},
        );
        let text = report.to_string();
        assert!(text.contains("[succeeded] a"));
        assert!(text.contains("[failed] b: "));
        assert!(text.contains("boom"));
    }

    #[test]
    fn report_serializes_statuses_in_snake_case() {
        let report = run_script("demo", vec![Step::new("a", || Ok(()))], || {});
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["steps"][0]["status"], "succeeded");
    }
}
