use rstest::rstest;
use tagger_fs::NormalizedPath;

#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("infra\\stacks\\db.yaml");
    assert_eq!(path.as_str(), "infra/stacks/db.yaml");
}

#[test]
fn test_native_path_is_kept_verbatim() {
    let path = NormalizedPath::new("weird\\name.tf");
    assert_eq!(path.to_native(), std::path::PathBuf::from("weird\\name.tf"));
}

#[rstest]
#[case("stacks/db.TF.JSON", ".tf.json", true)]
#[case("stacks/db.tf.json", ".json", true)]
#[case("stacks/db.tf", ".tf.json", false)]
#[case("stacks/", ".tf", false)]
fn test_has_suffix(#[case] input: &str, #[case] suffix: &str, #[case] expected: bool) {
    assert_eq!(NormalizedPath::new(input).has_suffix(suffix), expected);
}

#[rstest]
#[case("infra/Tests/bucket.yaml", "test", true)]
#[case("infra/prod/bucket.yaml", "test", false)]
#[case("LATEST/bucket.yaml", "test", true)]
fn test_contains_ignore_case(#[case] input: &str, #[case] needle: &str, #[case] expected: bool) {
    assert_eq!(NormalizedPath::new(input).contains_ignore_case(needle), expected);
}

#[test]
fn test_extension_and_file_name() {
    let path = NormalizedPath::new("a/b/template.yml");
    assert_eq!(path.file_name(), Some("template.yml"));
    assert_eq!(path.extension(), Some("yml"));
    assert_eq!(NormalizedPath::new("a/.hidden").extension(), None);
}
