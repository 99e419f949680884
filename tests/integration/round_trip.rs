use crate::{snapshot, write_config, write_file};
use project_renamer::commands::{find_command, CommandContext, CommandOutcome};
use project_renamer::{load_config, replace_bounded, Boundary, Mode, NoopSink};
use proptest::prelude::*;
use std::path::Path;

fn run_rename(root: &Path) {
    let config = load_config(root).unwrap();
    let ctx = CommandContext {
        root,
        config: &config,
        mode: Mode::Apply,
        sink: &NoopSink,
    };
    let outcome = (find_command("rename-project").unwrap().handler)(&ctx).unwrap();
    assert!(matches!(outcome, CommandOutcome::Renamed { ref report } if report.is_success()));
}

#[test]
fn rename_there_and_back_restores_every_byte() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write_config(root, "com.acme", "acme");
    write_file(
        root,
        "library/core/src/commonMain/kotlin/com/acme/acme/Core.kt",
        "package com.acme.acme\n\nimport com.acmex.Other\n",
    );
    write_file(
        root,
        "library/core/build.gradle.kts",
        "dependencies { implementation(project(\":acme:model\")) }\n",
    );
    write_file(
        root,
        "demo/iosApp/Configuration/Config.xcconfig",
        "BUNDLE_ID=com.acme.demo\n",
    );
    write_file(
        root,
        ".run/Desktop.run.xml",
        "<option name=\"MAIN_CLASS_NAME\" value=\"com.acme.MainKt\" />\n",
    );

    let original = snapshot(root);

    write_config(root, "com.widgets", "widgets");
    run_rename(root);
    assert!(root
        .join("library/core/src/commonMain/kotlin/com/widgets/widgets/Core.kt")
        .is_file());

    write_config(root, "com.acme", "acme");
    run_rename(root);

    assert_eq!(snapshot(root), original);
}

fn fragment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "com.a",
        "com.a.Main",
        "com.ab",
        "xcom.a",
        "_com.a",
        "import ",
        "package ",
        " ",
        "\n",
        ";",
        "\"",
        "(",
        ".",
    ])
}

proptest! {
    #[test]
    fn content_round_trip(parts in prop::collection::vec(fragment(), 0..24)) {
        let content = parts.concat();
        let (forward, _) = replace_bounded(&content, "com.a", "com.b", Boundary::Package);
        let (back, _) = replace_bounded(&forward, "com.b", "com.a", Boundary::Package);
        prop_assert_eq!(back.as_ref(), content.as_str());
    }
}
