//! Script-to-launcher conversion.
//!
//! A launcher is a batch file that rebuilds the wrapped script line by line
//! into a temp file with `echo`, runs the interpreter on it, then cleans up:
//!
//! ```text
//! @echo off                       header
//! ...                             (admin probe, temp path, "(")
//! echo <escaped line>             body, one per source line
//! ) > "%BATWRAP_TMP%"             footer
//! powershell.exe ... -File "%BATWRAP_TMP%"
//! del "%BATWRAP_TMP%" >nul 2>&1
//! (goto) 2>nul & del "%~f0"       optional self-delete trailer
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::defaults::{self, LauncherProfile};
use crate::error::{Error, Result};
use crate::utils::{io, shell};

/// Batch variable holding the reconstructed script path at run time.
const TEMP_VAR: &str = "BATWRAP_TMP";

const ADMIN_REQUIRED_MESSAGE: &str =
    "Administrator privileges are required. Right-click this file and choose Run as administrator.";

const BLANK_ECHO: &str = "echo.";

const SELF_DELETE_TRAILER: &str = "(goto) 2>nul & del \"%~f0\"";

const LINE_ENDING: &str = "\r\n";

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionOptions {
    pub admin_check: bool,
    pub hide_terminal: bool,
    pub self_delete: bool,
    /// Appended verbatim to the interpreter invocation.
    pub extra_args: Option<String>,
}

/// Random component of the temp script name, fixed at conversion time.
///
/// The launcher also appends `%RANDOM%` when it runs, so two copies of the
/// same launcher running at once do not share a temp file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempToken(String);

impl TempToken {
    pub fn generate() -> Self {
        let first = Uuid::new_v4().simple().to_string();
        let second = Uuid::new_v4().simple().to_string();
        Self(format!("{}-{}", &first[..8], &second[..8]))
    }

    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherArtifact {
    header: Vec<String>,
    body: Vec<String>,
    footer: Vec<String>,
}

impl LauncherArtifact {
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// One instruction per source line, in source order.
    pub fn body(&self) -> &[String] {
        &self.body
    }

    pub fn footer(&self) -> &[String] {
        &self.footer
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.header
            .iter()
            .chain(&self.body)
            .chain(&self.footer)
            .map(String::as_str)
    }

    /// CRLF-terminated batch text.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for line in self.lines() {
            text.push_str(line);
            text.push_str(LINE_ENDING);
        }
        text
    }
}

/// Build the launcher for already-split source lines.
pub fn render<S: AsRef<str>>(
    source_lines: &[S],
    options: &ConversionOptions,
    profile: &LauncherProfile,
    token: &TempToken,
) -> LauncherArtifact {
    let mut header = vec![
        "@echo off".to_string(),
        format!("color {}", profile.color),
        "cls".to_string(),
        format!("cd /d {}", shell::quote_cmd_path("%~dp0")),
    ];

    if options.admin_check {
        header.extend(admin_probe());
    }

    header.push(format!(
        "set \"{}=%TEMP%\\batwrap-{}-%RANDOM%{}\"",
        TEMP_VAR,
        token.as_str(),
        profile.temp_extension
    ));
    header.push("(".to_string());

    let body = source_lines
        .iter()
        .map(|line| body_line(line.as_ref()))
        .collect();

    let temp_ref = shell::quote_cmd_path(&format!("%{}%", TEMP_VAR));
    let mut footer = vec![
        format!(") > {}", temp_ref),
        interpreter_line(options, profile, &temp_ref),
        format!("del {} >nul 2>&1", temp_ref),
    ];

    if options.self_delete {
        footer.push(SELF_DELETE_TRAILER.to_string());
    }

    LauncherArtifact {
        header,
        body,
        footer,
    }
}

fn body_line(line: &str) -> String {
    if shell::is_blank_line(line) {
        BLANK_ECHO.to_string()
    } else {
        format!("echo {}", shell::escape_cmd_echo(line))
    }
}

fn admin_probe() -> Vec<String> {
    vec![
        "net session >nul 2>&1".to_string(),
        "if errorlevel 1 (".to_string(),
        format!("    echo {}", shell::escape_cmd_echo(ADMIN_REQUIRED_MESSAGE)),
        "    pause".to_string(),
        "    exit /b 1".to_string(),
        ")".to_string(),
    ]
}

fn interpreter_line(options: &ConversionOptions, profile: &LauncherProfile, temp_ref: &str) -> String {
    let mut parts = vec![profile.interpreter.as_str(), profile.unrestricted_flag.as_str()];

    if options.hide_terminal {
        parts.push(profile.hidden_flag.as_str());
    }

    parts.push(profile.file_flag.as_str());
    parts.push(temp_ref);

    if let Some(extra) = options.extra_args.as_deref().map(str::trim) {
        if !extra.is_empty() {
            parts.push(extra);
        }
    }

    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Read a script as ordered lines.
///
/// Accepts LF or CRLF, drops a leading UTF-8 BOM, and does not produce an
/// extra line for a trailing newline.
pub fn read_source(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(Error::launcher_source_not_found(path.display().to_string()));
    }

    if path.is_dir() {
        return Err(Error::internal_io(
            format!("Source path is a directory: {}", path.display()),
            Some(format!("read {}", path.display())),
        ));
    }

    let bytes = io::read_bytes(path, &format!("read {}", path.display()))?;
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);

    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::launcher_source_not_text(path.display().to_string(), e.to_string()))?;

    Ok(text.lines().map(str::to_string).collect())
}

/// Default artifact path: the input path with the profile suffix appended.
pub fn default_output_path(source: &Path, profile: &LauncherProfile) -> PathBuf {
    let mut raw = source.as_os_str().to_os_string();
    raw.push(&profile.output_suffix);
    PathBuf::from(raw)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    pub source: String,
    pub output: String,
    pub source_lines: usize,
    pub admin_check: bool,
    pub hide_terminal: bool,
    pub self_delete: bool,
    pub temp_token: String,
    pub bytes: usize,
    pub written: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A rendered launcher that has not been written yet.
#[derive(Debug)]
pub struct PreparedLauncher {
    source: PathBuf,
    output: PathBuf,
    options: ConversionOptions,
    token: TempToken,
    artifact: LauncherArtifact,
}

impl PreparedLauncher {
    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn artifact(&self) -> &LauncherArtifact {
        &self.artifact
    }

    /// Report without writing; includes the artifact text.
    pub fn preview(&self) -> ConversionReport {
        let text = self.artifact.to_text();
        let mut report = self.report(text.len(), false);
        report.content = Some(text);
        report
    }

    pub fn write(self) -> Result<ConversionReport> {
        let text = self.artifact.to_text();
        io::write_file_atomic(
            &self.output,
            &text,
            &format!("write {}", self.output.display()),
        )?;

        log_status!(
            "convert",
            "Wrote {} ({} script lines)",
            self.output.display(),
            self.artifact.body().len()
        );

        Ok(self.report(text.len(), true))
    }

    fn report(&self, bytes: usize, written: bool) -> ConversionReport {
        ConversionReport {
            source: self.source.display().to_string(),
            output: self.output.display().to_string(),
            source_lines: self.artifact.body().len(),
            admin_check: self.options.admin_check,
            hide_terminal: self.options.hide_terminal,
            self_delete: self.options.self_delete,
            temp_token: self.token.as_str().to_string(),
            bytes,
            written,
            content: None,
        }
    }
}

/// Read the source and render its launcher without touching the output path.
pub fn prepare(
    source: &Path,
    output: Option<&Path>,
    options: &ConversionOptions,
    profile: &LauncherProfile,
) -> Result<PreparedLauncher> {
    let lines = read_source(source)?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(source, profile));

    if same_file(source, &output) {
        return Err(Error::validation_invalid_argument(
            "output",
            "Output path must differ from the input script",
            Some(output.display().to_string()),
            None,
        ));
    }

    let token = TempToken::generate();
    let artifact = render(&lines, options, profile, &token);

    Ok(PreparedLauncher {
        source: source.to_path_buf(),
        output,
        options: options.clone(),
        token,
        artifact,
    })
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Convert `source` into a launcher using the configured profile.
pub fn convert(
    source: &Path,
    output: Option<&Path>,
    options: &ConversionOptions,
) -> Result<ConversionReport> {
    let profile = defaults::load_defaults().launcher;
    convert_with_profile(source, output, options, &profile)
}

pub fn convert_with_profile(
    source: &Path,
    output: Option<&Path>,
    options: &ConversionOptions,
    profile: &LauncherProfile,
) -> Result<ConversionReport> {
    prepare(source, output, options, profile)?.write()
}
