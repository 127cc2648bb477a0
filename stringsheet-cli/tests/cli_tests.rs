use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn stringsheet_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("stringsheet"))
}

fn write_tables(dir: &TempDir) -> (String, String) {
    let identifiers = dir.path().join("identifiers.csv");
    let translations = dir.path().join("translations.csv");
    fs::write(
        &identifiers,
        "string_name,english_value\nok,Hello\nmissing,Bye\n",
    )
    .unwrap();
    fs::write(&translations, "english_value,fr,de\nHello,Bonjour,Hallo\nBye,,Tschüss\n").unwrap();
    (
        identifiers.to_string_lossy().to_string(),
        translations.to_string_lossy().to_string(),
    )
}

#[test]
fn test_generate_android() {
    let temp_dir = TempDir::new().unwrap();
    let (identifiers, translations) = write_tables(&temp_dir);
    let out_dir = temp_dir.path().join("out");

    let output = stringsheet_cmd()
        .args([
            "generate",
            "--identifiers",
            &identifiers,
            "--translations",
            &translations,
            "--output-dir",
            out_dir.to_str().unwrap(),
        ])
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        fs::read_to_string(out_dir.join("strings_fr.xml")).unwrap(),
        "<resources>\n    <string name=\"ok\">Bonjour</string>\n    <string name=\"missing\">Bye</string>\n</resources>"
    );
    assert!(out_dir.join("strings_de.xml").exists());

    // The blank French cell is reported once in the aggregated report.
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 empty translation"), "stderr: {}", stderr);
}

#[test]
fn test_generate_ios_single_language_and_row() {
    let temp_dir = TempDir::new().unwrap();
    let (identifiers, translations) = write_tables(&temp_dir);
    let out_dir = temp_dir.path().join("ios");

    let output = stringsheet_cmd()
        .args([
            "generate",
            "--identifiers",
            &identifiers,
            "--translations",
            &translations,
            "--platform",
            "ios",
            "--start",
            "1",
            "--end",
            "1",
            "--lang",
            "de",
            "--output-dir",
            out_dir.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(out_dir.join("de.strings")).unwrap(),
        "\"Bye\" = \"Tschüss\";\n"
    );
    assert!(!out_dir.join("fr.strings").exists());
}

#[test]
fn test_generate_missing_column_fails() {
    let temp_dir = TempDir::new().unwrap();
    let identifiers = temp_dir.path().join("identifiers.csv");
    let translations = temp_dir.path().join("translations.csv");
    fs::write(&identifiers, "name_only\nok\n").unwrap();
    fs::write(&translations, "english_value,fr\nHello,Bonjour\n").unwrap();

    let output = stringsheet_cmd()
        .args([
            "generate",
            "--identifiers",
            identifiers.to_str().unwrap(),
            "--translations",
            translations.to_str().unwrap(),
            "--output-dir",
            temp_dir.path().join("out").to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("schema error"));
    assert!(!temp_dir.path().join("out").exists());
}

#[test]
fn test_generate_start_after_end_fails() {
    let temp_dir = TempDir::new().unwrap();
    let (identifiers, translations) = write_tables(&temp_dir);

    let output = stringsheet_cmd()
        .args([
            "generate",
            "--identifiers",
            &identifiers,
            "--translations",
            &translations,
            "--start",
            "1",
            "--end",
            "0",
            "--output-dir",
            temp_dir.path().join("out").to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid row range"));
}

#[test]
fn test_convert_strings_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("fr.strings");
    fs::write(&input, "\"Hi\" = \"Salut\";\n// comment\n\"Bye\" = \"Au revoir\";").unwrap();

    let output = stringsheet_cmd()
        .args(["convert", "--input", input.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "string_name,value\nHi,Salut\nBye,Au revoir\n"
    );
}

#[test]
fn test_convert_with_malformed_lines_exits_non_zero() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("fr.strings");
    let out = temp_dir.path().join("fr.csv");
    fs::write(&input, "\"Hi\" = \"Salut\";\nnot a pair\n").unwrap();

    let output = stringsheet_cmd()
        .args([
            "convert",
            "-i",
            input.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "string_name,value\nHi,Salut\n"
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("not a pair"));
}

#[test]
fn test_convert_malformed_xml_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("strings.xml");
    fs::write(&input, "<resources><string name=\"a\">x</resources>").unwrap();

    let output = stringsheet_cmd()
        .args(["convert", "-i", input.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_convert_explicit_format_overrides_extension() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("export.txt");
    fs::write(&input, "<resources><string name=\"a\">b</string></resources>").unwrap();

    let output = stringsheet_cmd()
        .args(["convert", "-i", input.to_str().unwrap(), "--format", "xml"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "string_name,value\na,b\n"
    );
}

#[test]
fn test_json_log_format() {
    let temp_dir = TempDir::new().unwrap();
    let (identifiers, translations) = write_tables(&temp_dir);

    let output = stringsheet_cmd()
        .args([
            "--log-format",
            "json",
            "generate",
            "--identifiers",
            &identifiers,
            "--translations",
            &translations,
            "--output-dir",
            temp_dir.path().join("out").to_str().unwrap(),
        ])
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.lines().all(|line| line.starts_with('{')), "stderr: {}", stderr);
    assert!(stderr.contains("\"level\":\"WARN\""));
}
