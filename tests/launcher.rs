use std::fs;
use std::path::Path;

use batwrap::defaults::LauncherProfile;
use batwrap::launcher::{self, ConversionOptions, TempToken};
use tempfile::TempDir;

fn write_script(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn convert(source: &Path, options: &ConversionOptions) -> String {
    let report =
        launcher::convert_with_profile(source, None, options, &LauncherProfile::default()).unwrap();
    fs::read_to_string(report.output).unwrap()
}

/// Lines between the opening "(" and the closing ") > ..." redirect.
fn body_of(artifact: &str) -> Vec<&str> {
    artifact
        .lines()
        .skip_while(|l| *l != "(")
        .skip(1)
        .take_while(|l| !l.starts_with(") > "))
        .collect()
}

#[test]
fn hi_and_bye_scenario() {
    let dir = TempDir::new().unwrap();
    let source = write_script(&dir, "greet.ps1", "Write-Host \"Hi & Bye\"\n\n");

    let artifact = convert(&source, &ConversionOptions::default());

    assert_eq!(
        body_of(&artifact),
        vec!["echo Write-Host ^\"Hi ^& Bye^\"", "echo."]
    );
}

#[test]
fn default_output_is_input_plus_bat() {
    let dir = TempDir::new().unwrap();
    let source = write_script(&dir, "setup.ps1", "Get-Date\n");

    let report = launcher::convert_with_profile(
        &source,
        None,
        &ConversionOptions::default(),
        &LauncherProfile::default(),
    )
    .unwrap();

    assert_eq!(report.output, dir.path().join("setup.ps1.bat").display().to_string());
    assert!(report.written);
    assert_eq!(report.source_lines, 1);
}

#[test]
fn body_line_count_matches_source() {
    let dir = TempDir::new().unwrap();
    let content = "param($Name)\r\n\r\n   \r\nif ($Name) { \"hi $Name\" | Out-Host }\r\n# 50% done <ok>\r\n";
    let source = write_script(&dir, "multi.ps1", content);

    let artifact = convert(&source, &ConversionOptions::default());

    assert_eq!(body_of(&artifact).len(), content.lines().count());
}

#[test]
fn meta_characters_only_appear_escaped() {
    let dir = TempDir::new().unwrap();
    let source = write_script(&dir, "meta.ps1", "a^b|c>d<e%f&g(h)i\"j\n");

    let artifact = convert(&source, &ConversionOptions::default());
    let body = body_of(&artifact);

    assert_eq!(body, vec!["echo a^^b^|c^>d^<e%%f^&g^(h^)i^\"j"]);
}

#[test]
fn bom_is_dropped_and_trailing_newline_adds_no_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bom.ps1");
    fs::write(&path, b"\xEF\xBB\xBFWrite-Output 1\n").unwrap();

    let artifact = convert(&path, &ConversionOptions::default());

    assert_eq!(body_of(&artifact), vec!["echo Write-Output 1"]);
}

#[test]
fn same_input_differs_only_in_temp_token() {
    let dir = TempDir::new().unwrap();
    let source = write_script(&dir, "same.ps1", "Get-Process | Select -First 1\n");
    let options = ConversionOptions {
        admin_check: true,
        self_delete: true,
        ..ConversionOptions::default()
    };

    let first = launcher::prepare(&source, None, &options, &LauncherProfile::default()).unwrap();
    let second = launcher::prepare(&source, None, &options, &LauncherProfile::default()).unwrap();

    let first_text = first.artifact().to_text();
    let second_text = second.artifact().to_text();
    let first_token = first.preview().temp_token;
    let second_token = second.preview().temp_token;

    assert_ne!(first_token, second_token);
    assert_eq!(
        first_text.replace(&first_token, "TOKEN"),
        second_text.replace(&second_token, "TOKEN")
    );
}

#[test]
fn rendering_with_fixed_token_is_deterministic() {
    let token = TempToken::new("fixed");
    let lines = ["a", "b"];
    let profile = LauncherProfile::default();
    let options = ConversionOptions::default();

    assert_eq!(
        launcher::render(&lines, &options, &profile, &token),
        launcher::render(&lines, &options, &profile, &token)
    );
}

#[test]
fn admin_probe_follows_flag() {
    let dir = TempDir::new().unwrap();
    let source = write_script(&dir, "admin.ps1", "whoami\n");

    let plain = convert(&source, &ConversionOptions::default());
    assert!(!plain.contains("net session"));

    let admin = convert(
        &source,
        &ConversionOptions {
            admin_check: true,
            ..ConversionOptions::default()
        },
    );
    assert!(admin.contains("net session >nul 2>&1"));
}

#[test]
fn self_delete_trailer_is_final_instruction() {
    let dir = TempDir::new().unwrap();
    let source = write_script(&dir, "once.ps1", "whoami\n");

    let artifact = convert(
        &source,
        &ConversionOptions {
            self_delete: true,
            ..ConversionOptions::default()
        },
    );
    assert_eq!(artifact.lines().last(), Some("(goto) 2>nul & del \"%~f0\""));

    let plain = convert(&source, &ConversionOptions::default());
    assert!(!plain.contains("del \"%~f0\""));
    assert!(plain.lines().last().unwrap().starts_with("del \"%BATWRAP_TMP%\""));
}

#[test]
fn missing_source_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("absent.ps1");
    let output = dir.path().join("absent.bat");

    let err = launcher::convert_with_profile(
        &source,
        Some(output.as_path()),
        &ConversionOptions::default(),
        &LauncherProfile::default(),
    )
    .unwrap_err();

    assert_eq!(err.code.as_str(), "launcher.source_not_found");
    assert!(!output.exists());
}

#[test]
fn non_utf8_source_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("latin1.ps1");
    fs::write(&path, b"caf\xE9\n").unwrap();

    let err = launcher::convert_with_profile(
        &path,
        None,
        &ConversionOptions::default(),
        &LauncherProfile::default(),
    )
    .unwrap_err();

    assert_eq!(err.code.as_str(), "launcher.source_not_text");
}

#[test]
fn unwritable_output_is_io_error() {
    let dir = TempDir::new().unwrap();
    let source = write_script(&dir, "ok.ps1", "whoami\n");
    let output = dir.path().join("no-such-dir").join("ok.bat");

    let err = launcher::convert_with_profile(
        &source,
        Some(output.as_path()),
        &ConversionOptions::default(),
        &LauncherProfile::default(),
    )
    .unwrap_err();

    assert_eq!(err.code.as_str(), "internal.io_error");
    assert!(!output.exists());
}

#[test]
fn output_equal_to_source_is_rejected() {
    let dir = TempDir::new().unwrap();
    let source = write_script(&dir, "self.bat", "echo hi\n");

    let err = launcher::convert_with_profile(
        &source,
        Some(source.as_path()),
        &ConversionOptions::default(),
        &LauncherProfile::default(),
    )
    .unwrap_err();

    assert_eq!(err.code.as_str(), "validation.invalid_argument");
    assert_eq!(fs::read_to_string(&source).unwrap(), "echo hi\n");
}

#[test]
fn preview_does_not_write() {
    let dir = TempDir::new().unwrap();
    let source = write_script(&dir, "dry.ps1", "whoami\n");

    let prepared = launcher::prepare(
        &source,
        None,
        &ConversionOptions::default(),
        &LauncherProfile::default(),
    )
    .unwrap();
    let report = prepared.preview();

    assert!(!report.written);
    assert!(report.content.unwrap().contains("echo whoami\r\n"));
    assert!(!prepared.output().exists());
}

#[test]
fn source_file_is_not_modified() {
    let dir = TempDir::new().unwrap();
    let content = "Write-Host \"x\" & y\n";
    let source = write_script(&dir, "keep.ps1", content);

    convert(&source, &ConversionOptions::default());

    assert_eq!(fs::read_to_string(&source).unwrap(), content);
}

#[test]
fn convert_entry_point_writes_artifact() {
    let dir = TempDir::new().unwrap();
    let source = write_script(&dir, "entry.ps1", "Write-Host \"Hi & Bye\"\n\n");
    let output = dir.path().join("entry.cmd");

    let report =
        launcher::convert(&source, Some(output.as_path()), &ConversionOptions::default()).unwrap();

    assert_eq!(report.output, output.display().to_string());
    let artifact = fs::read_to_string(&output).unwrap();
    assert_eq!(
        body_of(&artifact),
        vec!["echo Write-Host ^\"Hi ^& Bye^\"", "echo."]
    );
}

#[test]
fn directory_source_is_io_error() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("scripts");
    fs::create_dir(&source).unwrap();
    let output = dir.path().join("scripts.bat");

    let err = launcher::convert_with_profile(
        &source,
        Some(output.as_path()),
        &ConversionOptions::default(),
        &LauncherProfile::default(),
    )
    .unwrap_err();

    assert_eq!(err.code.as_str(), "internal.io_error");
    assert!(!output.exists());
}

#[test]
fn source_named_like_a_temp_file_survives_conversion() {
    let dir = TempDir::new().unwrap();
    let content = "Write-Host deploy\n";
    let source = write_script(&dir, "deploy.bat.tmp", content);
    let output = dir.path().join("deploy.bat");

    launcher::convert_with_profile(
        &source,
        Some(output.as_path()),
        &ConversionOptions::default(),
        &LauncherProfile::default(),
    )
    .unwrap();

    assert_eq!(fs::read_to_string(&source).unwrap(), content);
    assert!(fs::read_to_string(&output)
        .unwrap()
        .contains("echo Write-Host deploy\r\n"));
}

#[test]
fn empty_source_renders_empty_block() {
    let dir = TempDir::new().unwrap();
    let source = write_script(&dir, "empty.ps1", "");

    let report = launcher::convert_with_profile(
        &source,
        None,
        &ConversionOptions::default(),
        &LauncherProfile::default(),
    )
    .unwrap();
    let artifact = fs::read_to_string(&report.output).unwrap();

    assert_eq!(report.source_lines, 0);
    assert!(body_of(&artifact).is_empty());
    assert!(artifact.contains("\r\n(\r\n) > \"%BATWRAP_TMP%\"\r\n"));
    assert!(artifact.ends_with("del \"%BATWRAP_TMP%\" >nul 2>&1\r\n"));
}
