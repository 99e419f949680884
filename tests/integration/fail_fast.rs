use project_renamer::{run_script, RenameError, Step, StepStatus};
use std::cell::Cell;
use std::path::PathBuf;

#[test]
fn later_steps_never_run_after_a_failure() {
    let third_ran = Cell::new(false);
    let infos_before_steps = Cell::new(false);
    let first_ran = Cell::new(false);

    let steps = vec![
        Step::new("first", || {
            first_ran.set(true);
            Ok(())
        }),
        Step::new("second", || {
            Err(RenameError::Io {
                path: PathBuf::from("locked.kt"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }),
        Step::new("third", || {
            third_ran.set(true);
            Ok(())
        }),
    ];

    let report = run_script("pipeline", steps, || {
        infos_before_steps.set(!first_ran.get());
    });

    assert!(infos_before_steps.get());
    assert!(!third_ran.get());
    assert!(!report.is_success());

    let statuses: Vec<_> = report.steps.iter().map(|step| step.status).collect();
    assert_eq!(
        statuses,
        vec![StepStatus::Succeeded, StepStatus::Failed, StepStatus::Skipped]
    );
    let message = report.steps[1].message.as_deref().unwrap();
    assert!(message.contains("locked.kt"));
    assert!(message.contains("denied"));
}
