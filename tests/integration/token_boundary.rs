use crate::{read_file, rename, write_file};
use project_renamer::{replace_bounded, Boundary, RewriteRule};
use proptest::prelude::*;

#[test]
fn longer_package_is_untouched() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write_file(
        root,
        "app/Main.kt",
        "package com.foo\n\nimport com.foobar.Thing\nimport com.foo.Main\nval x = \"xcom.foo\"\n",
    );

    let report = rename(root, "com.foo", "com.bar");
    assert!(report.is_success(), "{report}");

    assert_eq!(
        read_file(root, "app/Main.kt"),
        "package com.bar\n\nimport com.foobar.Thing\nimport com.bar.Main\nval x = \"xcom.foo\"\n"
    );
}

#[test]
fn module_reference_needs_module_boundary() {
    let rule = RewriteRule::module_reference("acme", "widgets");
    let (out, count) = rule.apply(
        "implementation(project(\":acme:core\"))\nimplementation(project(\":acmeExtra\"))\nimplementation(project(\":acme-ui\"))\nid(\"org:acme:1.0\")\n",
    );
    assert_eq!(count, 1);
    assert_eq!(
        out,
        "implementation(project(\":widgets:core\"))\nimplementation(project(\":acmeExtra\"))\nimplementation(project(\":acme-ui\"))\nid(\"org:acme:1.0\")\n"
    );
}

proptest! {
    #[test]
    fn identifier_suffix_blocks_match(suffix in "[A-Za-z0-9_][A-Za-z0-9_]{0,8}") {
        let content = format!("import com.foo{suffix}\n");
        let (out, count) = replace_bounded(&content, "com.foo", "com.bar", Boundary::Package);
        prop_assert_eq!(count, 0);
        prop_assert_eq!(out.as_ref(), content.as_str());
    }

    #[test]
    fn identifier_prefix_blocks_match(prefix in "[A-Za-z0-9_]{0,7}[A-Za-z0-9_.]") {
        let content = format!("{prefix}com.foo\n");
        let (_, count) = replace_bounded(&content, "com.foo", "com.bar", Boundary::Package);
        prop_assert_eq!(count, 0);
    }

    #[test]
    fn qualified_names_are_rewritten(class in "[A-Z][A-Za-z0-9]{0,8}") {
        let content = format!("import com.foo.{class}\n");
        let (out, count) = replace_bounded(&content, "com.foo", "com.bar", Boundary::Package);
        prop_assert_eq!(count, 1);
        prop_assert_eq!(out.into_owned(), format!("import com.bar.{class}\n"));
    }
}
