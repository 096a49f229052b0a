use flowsync_core::{changed_files, ChangedFile};
use rstest::rstest;

#[rstest]
#[case("scripts/foo.py", "foo")]
#[case("foo.py", "foo")]
#[case("a/b/c/score_model.py", "score_model")]
#[case("scripts/notes.txt", "notes.txt")]
#[case("scripts/foo.py.bak", "foo.py.bak")]
#[case("scripts/my.module.py", "my.module")]
#[case("bare", "bare")]
fn basename_and_suffix_are_stripped(#[case] arg: &str, #[case] expected: &str) {
    assert_eq!(ChangedFile::from_arg(arg, "py").name, expected);
}

#[test]
fn only_a_trailing_extension_is_removed() {
    // "py" inside the stem must survive.
    assert_eq!(ChangedFile::from_arg("scripts/happy.py", "py").name, "happy");
    assert_eq!(ChangedFile::from_arg("scripts/pyfoo.py", "py").name, "pyfoo");
}

#[test]
fn empty_argument_list_gives_no_changes() {
    let none: [&str; 0] = [];
    assert!(changed_files(none, "py").is_empty());
}

#[test]
fn order_matches_arguments() {
    let files = changed_files(vec!["scripts/z.py".to_string(), "scripts/a.py".to_string()], "py");
    assert_eq!(
        files,
        vec![
            ChangedFile { name: "z".into() },
            ChangedFile { name: "a".into() }
        ]
    );
}
