use super::*;

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["typemirror", "docs.json", "modules"])
        .expect("default args should parse");

    assert_eq!(args.file, PathBuf::from("docs.json"));
    assert_eq!(args.format, OutputFormat::Text);
    assert!(!args.no_color);
    assert_eq!(args.command, Command::Modules);
}

#[test]
fn parses_subcommands_with_names() {
    let args = CliArgs::try_parse_from(["typemirror", "docs.json", "class", "PipelineGraph"])
        .expect("class should parse");
    assert_eq!(
        args.command,
        Command::Class {
            name: "PipelineGraph".to_string()
        }
    );

    let args = CliArgs::try_parse_from(["typemirror", "docs.json", "module", "\"support/SVG\""])
        .expect("module should parse");
    assert_eq!(
        args.command,
        Command::Module {
            name: "\"support/SVG\"".to_string()
        }
    );

    let args = CliArgs::try_parse_from(["typemirror", "docs.json", "type", "Props"])
        .expect("type should parse");
    assert_eq!(
        args.command,
        Command::Type {
            name: "Props".to_string()
        }
    );
}

#[test]
fn parses_format_and_color_flags() {
    let args = CliArgs::try_parse_from([
        "typemirror",
        "--format",
        "JSON",
        "--no-color",
        "docs.json",
        "check",
    ])
    .expect("flagged args should parse");

    assert_eq!(args.format, OutputFormat::Json);
    assert!(args.no_color);
    assert_eq!(args.command, Command::Check);
}

#[test]
fn rejects_missing_command_and_unknown_format() {
    assert!(CliArgs::try_parse_from(["typemirror", "docs.json"]).is_err());
    assert!(CliArgs::try_parse_from(["typemirror", "docs.json", "class"]).is_err());
    assert!(
        CliArgs::try_parse_from(["typemirror", "--format", "yaml", "docs.json", "modules"])
            .is_err()
    );
}
