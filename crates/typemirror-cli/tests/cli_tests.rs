use super::*;
use clap::Parser;
use serde_json::{Value, json};
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE: &str = include_str!("../../typemirror/tests/fixtures/types-sample.json");

fn write_doc(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(text.as_bytes()).expect("write fixture");
    file
}

fn run_with(file: &NamedTempFile, argv: &[&str]) -> Outcome {
    let path = file.path().to_str().expect("utf-8 temp path");
    let mut full = vec!["typemirror", path];
    full.extend_from_slice(argv);
    let args = CliArgs::try_parse_from(full).expect("args parse");
    run(&args, false).expect("command runs")
}

fn parse_json(outcome: &Outcome) -> Value {
    serde_json::from_str(&outcome.output).expect("output is JSON")
}

#[test]
fn test_modules_text_lists_sorted_names() {
    let doc = write_doc(SAMPLE);
    let outcome = run_with(&doc, &["modules"]);

    assert_eq!(outcome.exit_code, EXIT_SUCCESS);
    let lines: Vec<&str> = outcome.output.lines().collect();
    assert_eq!(lines[0], "Modules (10)");
    assert_eq!(lines[1], "  Extensions");
    assert_eq!(lines[10], "  support/TruncatingLabel");
}

#[test]
fn test_modules_json() {
    let doc = write_doc(SAMPLE);
    let outcome = run_with(&doc, &["--format", "json", "modules"]);

    let names = parse_json(&outcome);
    let names = names.as_array().expect("array");
    assert_eq!(names.len(), 10);
    assert_eq!(names[0], "Extensions");
    assert!(names.contains(&json!("support/SVG")));
}

#[test]
fn test_module_json_and_quoted_name() {
    let doc = write_doc(SAMPLE);
    let outcome = run_with(&doc, &["--format", "json", "module", "\"PipelineGraphModel\""]);

    assert_eq!(outcome.exit_code, EXIT_SUCCESS);
    let report = parse_json(&outcome);
    assert_eq!(report["name"], "PipelineGraphModel");
    let kinds: Vec<&Value> = report["members"]
        .as_array()
        .expect("members")
        .iter()
        .map(|member| &member["kind"])
        .collect();
    assert!(kinds.contains(&&json!("enum")));
    assert!(kinds.contains(&&json!("interface")));
    assert!(kinds.contains(&&json!("typeAlias")));
}

#[test]
fn test_missing_module_is_not_found() {
    let doc = write_doc(SAMPLE);
    let outcome = run_with(&doc, &["module", "nope"]);

    assert_eq!(outcome.exit_code, EXIT_NOT_FOUND);
    assert_eq!(outcome.output, "no module named nope\n");
}

#[test]
fn test_class_json_reports_properties() {
    let doc = write_doc(SAMPLE);
    let outcome = run_with(&doc, &["--format", "json", "class", "PipelineGraph"]);

    assert_eq!(outcome.exit_code, EXIT_SUCCESS);
    let reports = parse_json(&outcome);
    let reports = reports.as_array().expect("array");
    assert_eq!(reports.len(), 1);

    let class = &reports[0];
    assert_eq!(class["name"], "PipelineGraph");
    assert_eq!(class["kind"], "class");
    assert_eq!(class["extends"], json!(["Component<Props, State>"]));

    let properties = class["properties"].as_array().expect("properties");
    let props = properties
        .iter()
        .find(|property| property["name"] == "props")
        .expect("props reported");
    assert_eq!(props["type"], "Props");
    assert_eq!(props["readonly"], true);
    assert_eq!(props["visibility"], "public");

    let subscriptions = properties
        .iter()
        .find(|property| property["name"] == "subscriptions")
        .expect("subscriptions reported");
    assert_eq!(subscriptions["type"], "SignalBinding[]");
    assert_eq!(subscriptions["visibility"], "private");
}

#[test]
fn test_class_text_rendering() {
    let doc = write_doc(SAMPLE);
    let outcome = run_with(&doc, &["class", "PipelineGraph"]);

    assert!(outcome.output.starts_with("class PipelineGraph\n"));
    assert!(outcome.output.contains("  extends Component<Props, State>\n"));
    assert!(outcome.output.contains("    readonly props: Props\n"));
    assert!(outcome.output.contains("    private subscriptions: SignalBinding[]\n"));
    assert!(outcome.output.contains("    new (props: Props) => PipelineGraph\n"));
}

#[test]
fn test_type_finds_every_named_type() {
    let doc = write_doc(SAMPLE);
    let outcome = run_with(&doc, &["--format", "json", "type", "Props"]);

    assert_eq!(outcome.exit_code, EXIT_SUCCESS);
    let reports = parse_json(&outcome);
    assert_eq!(reports.as_array().expect("array").len(), 2);

    let outcome = run_with(&doc, &["--format", "json", "type", "LayoutInfo"]);
    let reports = parse_json(&outcome);
    assert_eq!(reports[0]["kind"], "typeAlias");
    assert!(
        reports[0]["target"]
            .as_str()
            .expect("alias target")
            .starts_with("{ connectorStrokeWidth: number; ")
    );
}

#[test]
fn test_missing_class_is_not_found() {
    let doc = write_doc(SAMPLE);

    let outcome = run_with(&doc, &["class", "Props"]);
    assert_eq!(outcome.exit_code, EXIT_NOT_FOUND);
    assert_eq!(outcome.output, "no class named Props\n");

    let outcome = run_with(&doc, &["--format", "json", "class", "Nope"]);
    assert_eq!(outcome.exit_code, EXIT_NOT_FOUND);
    assert_eq!(parse_json(&outcome), json!([]));
}

#[test]
fn test_check_passes_on_sample() {
    let doc = write_doc(SAMPLE);
    let outcome = run_with(&doc, &["--format", "json", "check"]);

    assert_eq!(outcome.exit_code, EXIT_SUCCESS);
    let report = parse_json(&outcome);
    assert_eq!(report["ok"], true);
    assert!(report["declarations"].as_u64().expect("count") > 0);
    assert!(report.get("error").is_none());
}

#[test]
fn test_check_reports_schema_error() {
    let doc = write_doc(
        &json!({
            "id": 0, "name": "p", "kind": 0,
            "children": [
                { "id": 1, "name": "Ok", "kind": 128 },
                { "id": 2, "name": "Weird", "kind": 8 }
            ]
        })
        .to_string(),
    );

    let outcome = run_with(&doc, &["--format", "json", "check"]);
    assert_eq!(outcome.exit_code, EXIT_SCHEMA_ERROR);
    let report = parse_json(&outcome);
    assert_eq!(report["ok"], false);
    assert_eq!(report["error"]["declId"], 2);

    let outcome = run_with(&doc, &["check"]);
    assert!(outcome.output.starts_with("error: declaration #2"));
}

#[test]
fn test_check_warns_on_optionality_mismatch() {
    let doc = write_doc(
        &json!({
            "id": 0, "name": "p", "kind": 0,
            "children": [{
                "id": 1, "name": "Opts", "kind": 256,
                "children": [{
                    "id": 2, "name": "loose", "kind": 1024,
                    "flags": { "isOptional": true },
                    "type": { "type": "intrinsic", "name": "string" }
                }]
            }]
        })
        .to_string(),
    );

    let outcome = run_with(&doc, &["check"]);
    assert_eq!(outcome.exit_code, EXIT_SUCCESS);
    assert!(outcome.output.contains("warning: Opts.loose flagged optional"));
}

#[test]
fn test_missing_file_has_context() {
    let args = CliArgs::try_parse_from(["typemirror", "/nonexistent/docs.json", "modules"])
        .expect("args parse");
    let err = run(&args, false).expect_err("missing file");
    assert!(err.to_string().starts_with("failed to read /nonexistent/docs.json"));
}

#[test]
fn test_invalid_json_is_error() {
    let doc = write_doc("{ not json");
    let path = doc.path().to_str().expect("utf-8 temp path");
    let args = CliArgs::try_parse_from(["typemirror", path, "modules"]).expect("args parse");

    let err = run(&args, false).expect_err("invalid JSON");
    assert!(err.to_string().starts_with("failed to load"));
    assert!(format!("{err:#}").contains("failed to parse TypeDoc JSON"));
}
