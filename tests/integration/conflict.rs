use crate::{read_file, rename, write_file};
use project_renamer::{
    rename_folders, Mode, NoopSink, ProjectIdentity, RenameContext, RenameError, RenameOptions,
    RewriteFlags, StepStatus,
};

#[test]
fn occupied_destination_aborts_before_any_move() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write_file(root, "src/com/acme/App.kt", "package com.acme\n");
    write_file(root, "src/com/widgets/Existing.kt", "package com.widgets\n");
    write_file(root, "other/com/acme/Other.kt", "package com.acme\n");

    let identity = ProjectIdentity::new(
        root,
        "com.acme",
        "com.widgets",
        "acme",
        "acme",
        RewriteFlags::default(),
    )
    .unwrap();
    let ctx = RenameContext::new(identity, RenameOptions::default(), Mode::Apply, &NoopSink);

    let err = rename_folders(&ctx).unwrap_err();
    match err {
        RenameError::Conflict { path, destination } => {
            assert!(path.ends_with("src/com/acme"));
            assert!(destination.ends_with("src/com/widgets"));
        }
        other => panic!("expected conflict, got {other}"),
    }

    // no branch was touched, including the one without a conflict
    assert_eq!(read_file(root, "src/com/acme/App.kt"), "package com.acme\n");
    assert!(root.join("other/com/acme/Other.kt").is_file());
    assert!(!root.join("other/com/widgets").exists());
}

#[test]
fn conflict_fails_the_pipeline_step() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write_file(root, "src/com/acme/App.kt", "package com.acme\n");
    write_file(root, "src/com/widgets/Existing.kt", "package com.widgets\n");

    let report = rename(root, "com.acme", "com.widgets");

    let failed = report.failed_step().unwrap();
    assert_eq!(failed.status, StepStatus::Failed);
    assert!(failed.message.as_deref().unwrap().contains("src/com/widgets"));
    assert_eq!(read_file(root, "src/com/acme/App.kt"), "package com.acme\n");
}

#[test]
fn empty_destination_is_replaced() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write_file(root, "src/com/acme/App.kt", "package com.acme\n");
    std::fs::create_dir_all(root.join("src/com/widgets")).unwrap();

    let report = rename(root, "com.acme", "com.widgets");
    assert!(report.is_success(), "{report}");
    assert!(root.join("src/com/widgets/App.kt").is_file());
}
