use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;
use tempfile::TempDir;

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write test file");
}

#[test]
fn encodes_text_input() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.txt");
    write_file(&input, "a < b & \"c\"");

    cargo_bin_cmd!("tag-content")
        .arg(&input)
        .assert()
        .success()
        .stdout("a &lt; b &amp; &quot;c&quot;");
}

#[test]
fn reads_stdin() {
    cargo_bin_cmd!("tag-content")
        .write_stdin("<p>")
        .assert()
        .success()
        .stdout("&lt;p&gt;");
}

#[test]
fn raw_input_is_verbatim() {
    cargo_bin_cmd!("tag-content")
        .arg("--raw")
        .write_stdin("<b class=\"x\">hi</b>")
        .assert()
        .success()
        .stdout("<b class=\"x\">hi</b>");
}

#[test]
fn json_array_appends_each_element() {
    cargo_bin_cmd!("tag-content")
        .arg("--json")
        .write_stdin(r#"["<a>", 1, null, 2.5, true, 2.0, 1e21]"#)
        .assert()
        .success()
        .stdout("&lt;a&gt;12.5true21000000000000000000000");
}

#[test]
fn ascii_only_and_narrow_charsets_use_references() {
    cargo_bin_cmd!("tag-content")
        .arg("--ascii-only")
        .write_stdin("caf\u{e9}")
        .assert()
        .success()
        .stdout("caf&#xE9;");

    cargo_bin_cmd!("tag-content")
        .args(["--charset", "latin1"])
        .write_stdin("\u{e9}")
        .assert()
        .success()
        .stdout("&#xE9;");
}

#[test]
fn config_file_sets_options() {
    let dir = TempDir::new().expect("tempdir");
    let config = dir.path().join("options.json");
    write_file(&config, r#"{"charset": "utf-8", "escape_quotes": true}"#);

    cargo_bin_cmd!("tag-content")
        .arg("--config")
        .arg(&config)
        .write_stdin("\"")
        .assert()
        .success()
        .stdout("&quot;");
}

#[test]
fn writes_output_file_and_reports() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.html");
    write_file(&input, "<x>");

    cargo_bin_cmd!("tag-content")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Rendered in.txt"));

    assert_eq!(fs::read_to_string(&output).expect("read output"), "&lt;x&gt;");
}

#[test]
fn unknown_charset_is_rejected() {
    cargo_bin_cmd!("tag-content")
        .args(["--charset", "ebcdic"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(contains("unknown charset: ebcdic"));
}

#[test]
fn invalid_json_fails() {
    cargo_bin_cmd!("tag-content")
        .arg("--json")
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(contains("ERROR"));
}

#[test]
fn raw_and_json_conflict() {
    cargo_bin_cmd!("tag-content")
        .args(["--raw", "--json"])
        .write_stdin("x")
        .assert()
        .failure();
}
