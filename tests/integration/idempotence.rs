use crate::{snapshot, write_config, write_file};
use project_renamer::commands::{find_command, CommandContext, CommandOutcome};
use project_renamer::{load_config, read_state, Mode, NoopSink};

fn run_rename(root: &std::path::Path) -> CommandOutcome {
    let config = load_config(root).unwrap();
    let ctx = CommandContext {
        root,
        config: &config,
        mode: Mode::Apply,
        sink: &NoopSink,
    };
    (find_command("rename-project").unwrap().handler)(&ctx).unwrap()
}

#[test]
fn second_identical_rename_is_a_no_op() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write_config(root, "com.widgets", "widgets");
    write_file(root, "src/com/acme/App.kt", "package com.acme\n");

    let first = run_rename(root);
    assert!(matches!(first, CommandOutcome::Renamed { ref report } if report.is_success()));
    let state_after_first = read_state(root).unwrap().unwrap();
    let tree_after_first = snapshot(root);

    let second = run_rename(root);
    match second {
        CommandOutcome::AlreadyApplied { state } => assert_eq!(state, state_after_first),
        other => panic!("expected already applied, got {other:?}"),
    }
    assert_eq!(snapshot(root), tree_after_first);
    assert_eq!(read_state(root).unwrap().unwrap(), state_after_first);
}

#[test]
fn configuration_files_are_never_rewritten() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write_config(root, "com.widgets", "widgets");
    write_file(root, "src/com/acme/App.kt", "package com.acme\n");
    let project_config = std::fs::read_to_string(root.join("configs/project.toml")).unwrap();

    run_rename(root);

    assert_eq!(
        std::fs::read_to_string(root.join("configs/project.toml")).unwrap(),
        project_config
    );
}
