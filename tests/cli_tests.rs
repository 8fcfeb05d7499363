mod utils;

use clap::Parser;
use std::io;
use test_log::test;
use tmplgroups::cli::{Cli, Runner};
use tmplgroups::{Error, ErrorKind};
use utils::fixtures_dir;

fn run_cli(args: &[&str], stdin: &str) -> (Result<(), Error>, String) {
    let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
    let mut out = Vec::new();
    let result = Runner::new(cli.command).run_with(io::Cursor::new(stdin.to_string()), &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn templates_dir() -> String {
    fixtures_dir().join("templates").to_string_lossy().into_owned()
}

#[test]
fn render_writes_page_to_output() {
    let base = templates_dir();
    let (result, out) = run_cli(
        &["tmplgroups", "render", "app", "index", "-b", &base, "-s", "app", "--data", r#"{"name":"Ann"}"#],
        "",
    );
    result.unwrap();
    assert_eq!(
        out,
        "<header>Site header</header>\n<main>Hello Ann</main>\n<footer>cdn</footer>"
    );
}

#[test]
fn render_reads_data_from_stdin() {
    let base = templates_dir();
    let (result, out) = run_cli(
        &["tmplgroups", "render", "app", "index", "-b", &base, "-s", "app", "-d", "-"],
        r#"{"name": "Bob"}"#,
    );
    result.unwrap();
    assert!(out.contains("<main>Hello Bob</main>"));
}

#[test]
fn render_applies_flags_and_cache_busting() {
    let base = templates_dir();
    let (result, out) = run_cli(
        &[
            "tmplgroups",
            "render",
            "app",
            "assets",
            "-b",
            &base,
            "-s",
            "app",
            "--cache-bust",
            "styles.min.css=F00.styles.min.css",
        ],
        "",
    );
    result.unwrap();
    assert!(out.contains("/static/css/F00.styles.min.css"));

    let (result, out) = run_cli(
        &["tmplgroups", "render", "", "footer", "-b", &base, "--use-local-files"],
        "",
    );
    result.unwrap();
    assert_eq!(out, "<footer>local</footer>");
}

#[test]
fn render_of_skipped_group_fails() {
    let base = templates_dir();
    let (result, out) = run_cli(
        &["tmplgroups", "render", "empty", "report", "-b", &base, "-s", "empty"],
        "",
    );
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lookup);
    assert!(out.is_empty());
}

#[test]
fn render_with_invalid_data_fails_before_building() {
    let (result, _) = run_cli(
        &["tmplgroups", "render", "app", "index", "-b", "does-not-matter", "-d", "{oops"],
        "",
    );
    assert!(matches!(result.unwrap_err(), Error::JsonError(_)));
}

#[test]
fn list_prints_groups_and_templates() {
    let base = templates_dir();
    let (result, out) = run_cli(
        &["tmplgroups", "list", "-b", &base, "-s", "app", "-s", "help", "-s", "empty"],
        "",
    );
    result.unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(&lines[..4], &["(base)", "  banner.html", "  footer.html", "  header.html"]);
    assert!(lines.contains(&"app"));
    assert!(lines.contains(&"help"));
    assert!(lines.contains(&"  help.html"));
    assert!(!lines.contains(&"empty"));
}

#[test]
fn files_lists_every_file_recursively() {
    let base = templates_dir();
    let (result, out) = run_cli(&["tmplgroups", "files", "-b", &base], "");
    result.unwrap();

    assert!(out.lines().any(|line| line.ends_with("templates/app/index.html")));
    assert!(out.lines().any(|line| line.ends_with("templates/empty/report.html.bak")));
    assert!(out.lines().any(|line| line.ends_with("templates/help/help.html")));
}

#[test]
fn config_file_supplies_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let config = tmp.path().join("templates.json");
    std::fs::write(
        &config,
        serde_json::json!({
            "base_path": templates_dir(),
            "sub_dirs": ["app", "help"],
            "development": true,
        })
        .to_string(),
    )
    .unwrap();
    let config = config.to_string_lossy().into_owned();

    let (result, out) = run_cli(&["tmplgroups", "render", "help", "help", "-c", &config], "");
    result.unwrap();
    assert!(out.contains("help page"));
    assert!(out.contains("[dev] Site header"));
}

#[test]
fn missing_base_path_is_reported() {
    let (result, _) = run_cli(&["tmplgroups", "list"], "");
    assert!(matches!(result.unwrap_err(), Error::BasePathMissing));
}
