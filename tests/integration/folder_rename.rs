use crate::{read_file, rename, write_file};

#[test]
fn nested_leaf_folders_are_renamed_deepest_first() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write_file(root, "src/com/acme/acme/Deep.kt", "package com.acme.acme\n");
    write_file(root, "src/com/acme/App.kt", "package com.acme\n");

    let report = rename(root, "com.acme", "com.widgets");
    assert!(report.is_success(), "{report}");

    assert!(!root.join("src/com/acme").exists());
    assert_eq!(
        read_file(root, "src/com/widgets/widgets/Deep.kt"),
        "package com.widgets.acme\n"
    );
    assert_eq!(read_file(root, "src/com/widgets/App.kt"), "package com.widgets\n");
}

#[test]
fn every_source_set_is_renamed() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    for source_set in ["commonMain", "androidMain", "iosMain"] {
        write_file(
            root,
            &format!("library/src/{source_set}/kotlin/com/acme/Platform.kt"),
            "package com.acme\n",
        );
    }

    let report = rename(root, "com.acme", "com.widgets");
    assert!(report.is_success(), "{report}");

    for source_set in ["commonMain", "androidMain", "iosMain"] {
        let base = format!("library/src/{source_set}/kotlin/com");
        assert!(root.join(format!("{base}/widgets/Platform.kt")).is_file());
        assert!(!root.join(format!("{base}/acme")).exists());
    }
}

#[test]
fn package_with_more_segments_is_relocated() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write_file(root, "app/src/main/kotlin/com/acme/App.kt", "package com.acme\n");

    let report = rename(root, "com.acme", "io.github.widgets");
    assert!(report.is_success(), "{report}");

    assert_eq!(
        read_file(root, "app/src/main/kotlin/io/github/widgets/App.kt"),
        "package io.github.widgets\n"
    );
    assert!(!root.join("app/src/main/kotlin/com").exists());
}

#[test]
fn excluded_directories_are_left_alone() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write_file(root, "build/generated/com/acme/Gen.kt", "package com.acme\n");
    write_file(root, "src/com/acme/App.kt", "package com.acme\n");

    let report = rename(root, "com.acme", "com.widgets");
    assert!(report.is_success(), "{report}");

    assert_eq!(
        read_file(root, "build/generated/com/acme/Gen.kt"),
        "package com.acme\n"
    );
    assert!(root.join("src/com/widgets/App.kt").is_file());
}

#[test]
fn sibling_package_stays_where_it_is() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write_file(root, "src/com/acme/App.kt", "package com.acme\n");
    write_file(root, "src/com/other/Lib.kt", "package com.other\n");

    let report = rename(root, "com.acme", "org.acme");
    assert!(report.is_success(), "{report}");

    assert_eq!(read_file(root, "src/org/acme/App.kt"), "package org.acme\n");
    assert_eq!(read_file(root, "src/com/other/Lib.kt"), "package com.other\n");
    assert!(!root.join("src/org/other").exists());
}

#[test]
fn existing_target_parent_with_other_packages_is_kept() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write_file(root, "src/com/acme/App.kt", "package com.acme\n");
    write_file(root, "src/org/jetbrains/X.kt", "package org.jetbrains\n");

    let report = rename(root, "com.acme", "org.acme");
    assert!(report.is_success(), "{report}");

    assert_eq!(read_file(root, "src/org/acme/App.kt"), "package org.acme\n");
    assert_eq!(
        read_file(root, "src/org/jetbrains/X.kt"),
        "package org.jetbrains\n"
    );
    assert!(!root.join("src/com").exists());
}

#[test]
fn leaf_named_folder_deeper_in_package_is_not_renamed() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write_file(
        root,
        "src/com/acme/feature/acme/Deep.kt",
        "package com.acme.feature.acme\n",
    );

    let report = rename(root, "com.acme", "com.widgets");
    assert!(report.is_success(), "{report}");

    assert_eq!(
        read_file(root, "src/com/widgets/feature/acme/Deep.kt"),
        "package com.widgets.feature.acme\n"
    );
}
