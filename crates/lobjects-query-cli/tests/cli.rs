use std::io::Write;

use clap::Parser;
use insta::assert_snapshot;
use lobjects_query_cli::{load_column_map, run, Cli};
use tempfile::NamedTempFile;

fn run_args(args: &[&str]) -> anyhow::Result<Option<String>> {
    run_with_stdin(args, "")
}

fn run_with_stdin(args: &[&str], stdin: &str) -> anyhow::Result<Option<String>> {
    let cli = Cli::try_parse_from(std::iter::once("lobq").chain(args.iter().copied()))?;
    run(&cli, &mut stdin.as_bytes())
}

fn column_file(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

// ============================================================================
// filter
// ============================================================================

#[test]
fn filter_compiles_criteria() {
    let output = run_args(&["filter", r#"{"code":"ABC","status":1}"#]).unwrap();
    assert_snapshot!(output.unwrap(), @"CODE eq 'ABC' and STATUS eq 1");
}

#[test]
fn filter_with_operators_and_lists() {
    let output = run_args(&[
        "filter",
        r#"{"projectCode":{"like":"test*"},"tags":["A","B"],"amount":{"gte":10,"lt":20}}"#,
    ])
    .unwrap();
    assert_snapshot!(
        output.unwrap(),
        @"PROJECT_CODE like 'test*' and (TAGS eq 'A' or TAGS eq 'B') and AMOUNT gte 10 and AMOUNT lt 20"
    );
}

#[test]
fn filter_of_absent_criteria_prints_nothing() {
    let output = run_args(&["filter", r#"{"code":null}"#]).unwrap();
    assert_eq!(output, None);
}

#[test]
fn filter_reads_stdin() {
    let output = run_with_stdin(&["filter", "-"], r#"{"name":"Bob's"}"#).unwrap();
    assert_snapshot!(output.unwrap(), @"NAME eq 'Bob''s'");
}

#[test]
fn filter_reports_unknown_operator() {
    let err = run_args(&["filter", r#"{"code":{"foo":"x"}}"#]).unwrap_err();
    assert_snapshot!(
        format!("{err:#}"),
        @"failed to parse criteria: unrecognized operator 'foo' on field 'code'"
    );
}

#[test]
fn filter_reports_malformed_json() {
    let err = run_args(&["filter", "{"]).unwrap_err();
    assert!(format!("{err:#}").starts_with("failed to parse criteria"));
}

// ============================================================================
// query
// ============================================================================

#[test]
fn query_without_arguments_is_empty() {
    let output = run_args(&["query"]).unwrap();
    assert_eq!(output.as_deref(), Some(""));
}

#[test]
fn query_encodes_options() {
    let output = run_args(&[
        "query",
        "--options",
        r#"{"limit":10,"offset":0,"sort":"FICHENO"}"#,
    ])
    .unwrap();
    assert_snapshot!(output.unwrap(), @"limit=10&offset=0&sort=FICHENO");
}

#[test]
fn query_combines_options_and_criteria() {
    let output = run_args(&[
        "query",
        "--options",
        r#"{"limit":5,"sort":{"fields":["DATE_","FICHENO"],"dir":"desc"},"count":true}"#,
        "--criteria",
        r#"{"code":"A B"}"#,
    ])
    .unwrap();
    assert_snapshot!(
        output.unwrap(),
        @"limit=5&sort=DATE_%2CFICHENO%20desc&q=CODE%20eq%20%27A%20B%27&count=true"
    );
}

#[test]
fn query_with_path() {
    let output = run_args(&[
        "query",
        "--options",
        r#"{"expandLevel":"full"}"#,
        "--path",
        "/salesInvoices",
    ])
    .unwrap();
    assert_snapshot!(output.unwrap(), @"/salesInvoices?expandLevel=full");

    let output = run_args(&["query", "--path", "/salesInvoices"]).unwrap();
    assert_eq!(output.as_deref(), Some("/salesInvoices"));
}

#[test]
fn query_keeps_filter_from_options() {
    let output = run_args(&[
        "query",
        "--options",
        r#"{"q":"STATUS eq 1"}"#,
        "--criteria",
        r#"{"code":"A"}"#,
    ])
    .unwrap();
    assert_snapshot!(
        output.unwrap(),
        @"q=%28STATUS%20eq%201%29%20and%20CODE%20eq%20%27A%27"
    );

    let output = run_args(&[
        "query",
        "--options",
        r#"{"q":"STATUS eq 1"}"#,
        "--criteria",
        r#"{"code":null}"#,
    ])
    .unwrap();
    assert_snapshot!(output.unwrap(), @"q=STATUS%20eq%201");
}

#[test]
fn query_rejects_malformed_sort_object() {
    let err = run_args(&[
        "query",
        "--options",
        r#"{"sort":{"field":"A","direction":"desc"}}"#,
    ])
    .unwrap_err();
    assert!(format!("{err:#}").contains("invalid sort specification"));
}

#[test]
fn query_reads_criteria_from_stdin() {
    let output = run_with_stdin(
        &["query", "--options", r#"{"limit":1}"#, "--criteria", "-"],
        r#"{"status":[1,2]}"#,
    )
    .unwrap();
    assert_snapshot!(
        output.unwrap(),
        @"limit=1&q=%28STATUS%20eq%201%20or%20STATUS%20eq%202%29"
    );
}

#[test]
fn query_rejects_two_stdin_arguments() {
    let err = run_args(&["query", "--options", "-", "--criteria", "-"]).unwrap_err();
    assert!(format!("{err:#}").contains("only one argument can be read from stdin"));
}

#[test]
fn query_rejects_unknown_option_keys() {
    let err = run_args(&["query", "--options", r#"{"pageSize":10}"#]).unwrap_err();
    assert!(format!("{err:#}").starts_with("failed to parse list options"));
}

#[test]
fn query_rejects_bad_sort() {
    let err = run_args(&["query", "--options", r#"{"sort":"A;B"}"#]).unwrap_err();
    assert!(format!("{err:#}").contains("invalid sort"));
}

// ============================================================================
// Column maps
// ============================================================================

#[test]
fn column_overrides_apply_to_filters() {
    let file = column_file("overrides:\n  date: DATE_\n");
    let path = file.path().to_str().unwrap();

    let output = run_args(&[
        "filter",
        "--columns",
        path,
        r#"{"date":{"gte":"2024-01-01","lte":"2024-01-31"}}"#,
    ])
    .unwrap();
    assert_snapshot!(output.unwrap(), @"DATE_ gte '2024-01-01' and DATE_ lte '2024-01-31'");
}

#[test]
fn strict_columns_reject_unknown_fields() {
    let file = column_file("overrides:\n  date: DATE_\nknown: [DATE_, FICHENO]\n");
    let path = file.path().to_str().unwrap();

    let output = run_args(&[
        "query",
        "--columns",
        path,
        "--options",
        r#"{"sort":"FICHENO"}"#,
        "--criteria",
        r#"{"date":"2024-01-01"}"#,
    ])
    .unwrap();
    assert_snapshot!(output.unwrap(), @"sort=FICHENO&q=DATE_%20eq%20%272024-01-01%27");

    let err = run_args(&["filter", "--columns", path, r#"{"status":1}"#]).unwrap_err();
    assert!(format!("{err:#}").contains("status"));

    let err = run_args(&[
        "query",
        "--columns",
        path,
        "--options",
        r#"{"sort":"STATUS"}"#,
    ])
    .unwrap_err();
    assert!(format!("{err:#}").contains("STATUS"));
}

#[test]
fn column_map_file_errors_have_context() {
    let file = column_file("renames:\n  a: B\n");
    let err = load_column_map(file.path()).unwrap_err();
    assert!(format!("{err:#}").starts_with("invalid column map"));

    let err = load_column_map(std::path::Path::new("/nonexistent/columns.yaml")).unwrap_err();
    assert!(format!("{err:#}").starts_with("failed to read column map"));
}

#[test]
fn verbose_flag_counts() {
    let cli = Cli::try_parse_from(["lobq", "-vv", "filter", "{}"]).unwrap();
    assert_eq!(cli.verbose, 2);
}
