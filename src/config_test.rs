use super::*;
use clap::Parser;
use std::fs;

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("gitfame").chain(args.iter().copied())).unwrap()
}

#[test]
fn defaults_without_file() {
    let settings = Settings::resolve(&cli(&[]), FileConfig::default()).unwrap();
    assert_eq!(settings.revision, "HEAD");
    assert_eq!(settings.order_by, OrderBy::Lines);
    assert_eq!(settings.identity, Identity::Author);
    assert_eq!(settings.format, Format::Tabular);
    assert!(settings.extensions.is_empty());
    assert!(settings.jobs >= 1);
}

#[test]
fn file_values_apply() {
    let file = FileConfig::parse(
        r#"
revision = "main"
order-by = "commits"
use-committer = true
format = "json-lines"
extensions = ["rs", "go"]
exclude = ["vendor/*"]
jobs = 2
"#,
    )
    .unwrap();
    let settings = Settings::resolve(&cli(&[]), file).unwrap();

    assert_eq!(settings.revision, "main");
    assert_eq!(settings.order_by, OrderBy::Commits);
    assert_eq!(settings.identity, Identity::Committer);
    assert_eq!(settings.format, Format::JsonLines);
    assert_eq!(settings.extensions, vec!["rs", "go"]);
    assert_eq!(settings.exclude, vec!["vendor/*"]);
    assert_eq!(settings.jobs, 2);
}

#[test]
fn cli_overrides_file() {
    let file = FileConfig::parse(
        r#"
order-by = "commits"
extensions = ["rs", "go"]
"#,
    )
    .unwrap();
    let settings = Settings::resolve(
        &cli(&["--order-by", "files", "--extensions", "py", "--revision", "v1"]),
        file,
    )
    .unwrap();

    assert_eq!(settings.order_by, OrderBy::Files);
    assert_eq!(settings.extensions, vec!["py"]);
    assert_eq!(settings.revision, "v1");
}

#[test]
fn unknown_order_by_in_file() {
    let err = FileConfig::parse(r#"order-by = "age""#).unwrap_err();
    assert!(matches!(err, Error::ConfigParse(_)));
}

#[test]
fn unknown_key_in_file() {
    let err = FileConfig::parse("colour = true").unwrap_err();
    assert!(matches!(err, Error::ConfigParse(_)));
}

#[test]
fn zero_jobs_rejected() {
    let err = Settings::resolve(&cli(&["--jobs", "0"]), FileConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn empty_revision_rejected() {
    let err = Settings::resolve(&cli(&["--revision", ""]), FileConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn discovers_file_in_repository() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILE), "order-by = \"files\"\n").unwrap();

    let repo = dir.path().to_str().unwrap();
    let settings = Settings::from_cli(&cli(&["--repository", repo])).unwrap();
    assert_eq!(settings.order_by, OrderBy::Files);
}

#[test]
fn explicit_config_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fame.toml");
    fs::write(&path, "format = \"csv\"\n").unwrap();

    let settings = Settings::from_cli(&cli(&["--config", path.to_str().unwrap()])).unwrap();
    assert_eq!(settings.format, Format::Csv);
}

#[test]
fn missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = Settings::from_cli(&cli(&["--config", path.to_str().unwrap()])).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
