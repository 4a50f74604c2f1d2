use crate::error::{Error, Result};
use std::io::{self, BufRead, IsTerminal, Write};

pub fn is_stdin_tty() -> bool {
    io::stdin().is_terminal()
}

pub fn is_stderr_tty() -> bool {
    io::stderr().is_terminal()
}

pub fn require_tty_for_interactive() -> bool {
    is_stdin_tty() && is_stderr_tty()
}

/// Prompt on `out` and read one trimmed line from `input`.
pub fn prompt_from<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<String> {
    write!(out, "{}", message).ok();
    out.flush().ok();

    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(|e| {
        Error::internal_io(
            format!("Failed to read input: {}", e),
            Some("prompt".to_string()),
        )
    })?;

    if read == 0 {
        return Err(Error::validation_invalid_argument(
            "stdin",
            "Input closed before an answer was given",
            None,
            None,
        ));
    }

    Ok(line.trim().to_string())
}

pub fn confirm_from<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
    default: bool,
) -> Result<bool> {
    let suffix = if default { "[Y/n]" } else { "[y/N]" };
    loop {
        let answer = prompt_from(input, out, &format!("{} {} ", message, suffix))?;
        match answer.to_ascii_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => {
                writeln!(out, "Please answer y or n.").ok();
            }
        }
    }
}
