use clap::Args;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use batwrap::defaults::{self, LauncherProfile};
use batwrap::launcher::{self, ConversionOptions, ConversionReport};
use batwrap::{tty, validation};

use super::CmdResult;

#[derive(Args, Debug, Default, Clone)]
pub struct ConvertArgs {
    /// Script to wrap (prompted for when omitted on a terminal)
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Launcher path [default: <input>.bat]
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Abort at run time unless launched with administrator rights
    #[arg(long)]
    pub admin: bool,

    /// Delete the launcher after it runs
    #[arg(long)]
    pub self_delete: bool,

    /// Hide the interpreter window
    #[arg(long)]
    pub hide_terminal: bool,

    /// Extra arguments appended verbatim to the interpreter command line
    #[arg(long = "args", value_name = "ARGS", allow_hyphen_values = true)]
    pub extra_args: Option<String>,
}

impl ConvertArgs {
    fn options(&self) -> ConversionOptions {
        ConversionOptions {
            admin_check: self.admin,
            hide_terminal: self.hide_terminal,
            self_delete: self.self_delete,
            extra_args: self.extra_args.clone(),
        }
    }
}

pub fn run(args: ConvertArgs, global: &crate::commands::GlobalArgs) -> CmdResult<ConversionReport> {
    let profile = defaults::load_defaults().launcher;

    let interactive = args.input.is_none();
    let args = if !interactive {
        args
    } else if tty::require_tty_for_interactive() {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        prompt_args(&mut input, &mut std::io::stderr(), &profile)?
    } else {
        return Err(
            batwrap::Error::validation_missing_argument(vec!["--input".to_string()])
                .with_hint("batwrap convert --input script.ps1 [--output launcher.bat]"),
        );
    };

    let source = validation::require_with_hints(
        args.input.clone(),
        "input",
        "No script to convert",
        vec!["batwrap convert --input script.ps1".to_string()],
    )?;

    let prepared = launcher::prepare(&source, args.output.as_deref(), &args.options(), &profile)?;

    if global.dry_run {
        return Ok((prepared.preview(), 0));
    }

    let report = prepared.write()?;

    if interactive {
        eprintln!("Launcher written to {}", report.output);
    }

    Ok((report, 0))
}

/// Strip the quotes terminals add around dragged-in paths.
fn unquote_path(raw: &str) -> &str {
    raw.trim()
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or_else(|| raw.trim())
}

/// Expand `~` in prompted paths; no shell has done it for us.
fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Collect conversion settings from a terminal session.
fn prompt_args<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    profile: &LauncherProfile,
) -> batwrap::Result<ConvertArgs> {
    let source = loop {
        let answer = tty::prompt_from(input, out, "Script to convert: ")?;
        match validation::require_non_empty(unquote_path(&answer), "input", "Script path is required") {
            Ok(path) => break expand_path(path),
            Err(_) => {
                writeln!(out, "Please enter a path.").ok();
            }
        }
    };

    let default_output = launcher::default_output_path(&source, profile);
    let output = tty::prompt_from(
        input,
        out,
        &format!("Launcher path [{}]: ", default_output.display()),
    )?;
    let output = unquote_path(&output);

    let admin = tty::confirm_from(input, out, "Require administrator rights?", false)?;
    let hide_terminal = tty::confirm_from(input, out, "Hide the interpreter window?", false)?;
    let self_delete = tty::confirm_from(input, out, "Delete the launcher after it runs?", false)?;
    let extra = tty::prompt_from(input, out, "Extra interpreter arguments (blank for none): ")?;

    Ok(ConvertArgs {
        input: Some(source),
        output: if output.is_empty() {
            None
        } else {
            Some(expand_path(output))
        },
        admin,
        self_delete,
        hide_terminal,
        extra_args: if extra.is_empty() { None } else { Some(extra) },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn unquote_path_strips_wrapping_quotes() {
        assert_eq!(unquote_path("\"C:\\My Scripts\\a.ps1\""), "C:\\My Scripts\\a.ps1");
        assert_eq!(unquote_path("  plain.ps1 "), "plain.ps1");
        assert_eq!(unquote_path("\"half.ps1"), "\"half.ps1");
    }

    #[test]
    fn expand_path_leaves_plain_paths() {
        assert_eq!(expand_path("dir/a.ps1"), PathBuf::from("dir/a.ps1"));
    }

    #[test]
    fn prompt_args_collects_every_field() {
        let mut input = Cursor::new("\n\"setup.ps1\"\nout.bat\ny\nn\nyes\n-Force\n");
        let mut out = Vec::new();

        let args = prompt_args(&mut input, &mut out, &LauncherProfile::default()).unwrap();

        assert_eq!(args.input, Some(PathBuf::from("setup.ps1")));
        assert_eq!(args.output, Some(PathBuf::from("out.bat")));
        assert!(args.admin);
        assert!(!args.hide_terminal);
        assert!(args.self_delete);
        assert_eq!(args.extra_args.as_deref(), Some("-Force"));

        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("Please enter a path."));
        assert!(transcript.contains("Launcher path [setup.ps1.bat]: "));
    }

    #[test]
    fn prompt_args_blank_answers_take_defaults() {
        let mut input = Cursor::new("a.ps1\n\n\n\n\n\n");
        let mut out = Vec::new();

        let args = prompt_args(&mut input, &mut out, &LauncherProfile::default()).unwrap();

        assert_eq!(args.output, None);
        assert!(!args.admin && !args.hide_terminal && !args.self_delete);
        assert_eq!(args.extra_args, None);
    }

    #[test]
    fn args_map_to_options() {
        let args = ConvertArgs {
            admin: true,
            extra_args: Some("-Verbose".to_string()),
            ..ConvertArgs::default()
        };
        let options = args.options();
        assert!(options.admin_check);
        assert!(!options.self_delete);
        assert_eq!(options.extra_args.as_deref(), Some("-Verbose"));
    }
}
