use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn notecraft(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("notecraft").unwrap();
    cmd.env("NOTECRAFT_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

/// Runs a successful command and returns its stdout.
fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

/// Matches one id line for `code` and `seq`, whatever the current month is.
fn id_line(code: &str, seq: &str) -> impl Predicate<str> {
    predicate::str::is_match(format!(r"^CRG-{}-\d{{4}}-\d{{2}}-{}\n$", code, seq)).unwrap()
}

#[test]
fn test_id_new_increments_and_current_reuses() {
    let temp_dir = tempfile::tempdir().unwrap();

    let first = stdout_of(notecraft(temp_dir.path()).args(["id", "new", "Equity Research"]));
    assert!(id_line("EQ", "001").eval(&first), "{first}");

    let second = stdout_of(notecraft(temp_dir.path()).args(["id", "new", "eq"]));
    assert!(id_line("EQ", "002").eval(&second), "{second}");

    notecraft(temp_dir.path())
        .args(["id", "current", "Equity Research"])
        .assert()
        .success()
        .stdout(second);

    notecraft(temp_dir.path())
        .args(["id", "counters"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("EQ").and(predicate::str::contains("   2")));
}

#[test]
fn test_unknown_category_falls_back_with_warning() {
    let temp_dir = tempfile::tempdir().unwrap();

    notecraft(temp_dir.path())
        .args(["id", "new", "Crypto"])
        .assert()
        .success()
        .stdout(id_line("GEN", "001"))
        .stderr(predicate::str::contains("Unknown category 'Crypto'"));
}

#[test]
fn test_id_clear_forgets_session() {
    let temp_dir = tempfile::tempdir().unwrap();

    notecraft(temp_dir.path())
        .args(["id", "new", "Macro Research"])
        .assert()
        .success();

    notecraft(temp_dir.path())
        .args(["id", "show"])
        .assert()
        .success()
        .stdout(id_line("MACRO", "001"));

    notecraft(temp_dir.path())
        .args(["id", "clear"])
        .assert()
        .success();

    notecraft(temp_dir.path())
        .args(["id", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No session id."));
}

#[test]
fn test_segment_reads_stdin() {
    let temp_dir = tempfile::tempdir().unwrap();

    notecraft(temp_dir.path())
        .args(["segment", "paragraphs"])
        .write_stdin("Hello\nworld\n\nSecond para\n")
        .assert()
        .success()
        .stdout("Hello world\nSecond para\n");

    notecraft(temp_dir.path())
        .args(["segment", "bullets", "--preserve-blank-lines"])
        .write_stdin("- one\ntwo\n\n* three")
        .assert()
        .success()
        .stdout("one\ntwo\n\nthree\n");
}

#[test]
fn test_config_blank_lines_applies_to_segment() {
    let temp_dir = tempfile::tempdir().unwrap();

    notecraft(temp_dir.path())
        .args(["config", "blank-lines", "preserve"])
        .assert()
        .success()
        .stdout(predicate::str::contains("blank-lines set to preserve"));

    notecraft(temp_dir.path())
        .args(["segment", "bullets"])
        .write_stdin("- one\n\ntwo")
        .assert()
        .success()
        .stdout("one\n\ntwo\n");

    notecraft(temp_dir.path())
        .args(["segment", "bullets", "--collapse-blank-lines"])
        .write_stdin("- one\n\ntwo")
        .assert()
        .success()
        .stdout("one\ntwo\n");

    notecraft(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("id-prefix = CRG"));
}

#[test]
fn test_conflicting_blank_line_flags_are_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();

    notecraft(temp_dir.path())
        .args([
            "segment",
            "bullets",
            "--collapse-blank-lines",
            "--preserve-blank-lines",
        ])
        .write_stdin("x")
        .assert()
        .failure();
}

#[test]
fn test_print_writes_escaped_html_with_embedded_figures() {
    let temp_dir = tempfile::tempdir().unwrap();
    let form_dir = temp_dir.path().join("notes");
    let out_dir = temp_dir.path().join("out");
    std::fs::create_dir_all(form_dir.join("charts")).unwrap();
    std::fs::create_dir_all(&out_dir).unwrap();
    std::fs::write(form_dir.join("charts/brent.png"), b"png").unwrap();

    let form_path = form_dir.join("note.json");
    let out_path = out_dir.join("note.html");
    std::fs::write(
        &form_path,
        r#"{
            "category": "Commodity Insights",
            "title": "Oil <spike>",
            "author": {"last_name": "Doe", "first_name": "Jane", "phone": ""},
            "key_takeaways": "- Supply cut\n- Demand steady",
            "analysis": "Brent rallied\nfor a week.\n\nSpreads widened.",
            "images": ["charts/brent.png", "charts/missing.png"]
        }"#,
    )
    .unwrap();

    notecraft(temp_dir.path())
        .arg("print")
        .arg(&form_path)
        .arg("-o")
        .arg(&out_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Figure 2 skipped, could not read"));

    let html = std::fs::read_to_string(&out_path).unwrap();
    assert!(html.contains("<h1>Oil &lt;spike&gt;</h1>"));
    assert!(html.contains("<p>Brent rallied for a week.</p>"));
    assert!(html.contains("Figure 1: brent"));
    assert!(html.contains("data:image&#x2f;png;base64,cG5n"));
    assert!(!html.contains("Figure 2: missing"));
    assert!(predicate::str::is_match(r"CRG-COM-\d{4}-\d{2}-001")
        .unwrap()
        .eval(&html));
}

#[test]
fn test_preview_strict_co_authors_warns() {
    let temp_dir = tempfile::tempdir().unwrap();
    let form_path = temp_dir.path().join("note.json");
    std::fs::write(
        &form_path,
        r#"{"title": "Rates", "co_authors": [{"last_name": "Roe"}]}"#,
    )
    .unwrap();

    notecraft(temp_dir.path())
        .arg("preview")
        .arg(&form_path)
        .arg("--strict-co-authors")
        .assert()
        .success()
        .stdout(predicate::str::contains("DOC ID:     —"))
        .stderr(predicate::str::contains("Co-author 1 is missing"));
}

#[test]
fn test_missing_form_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    notecraft(temp_dir.path())
        .arg("preview")
        .arg(temp_dir.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: IO error"));
}
