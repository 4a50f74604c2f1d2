//! cmd.exe escaping for text emitted through `echo`.

/// Ordered `(pattern, replacement)` pairs for cmd.exe meta-characters.
///
/// The caret pair must stay first: every later replacement inserts carets
/// that must not be doubled again.
pub const CMD_ECHO_ESCAPES: &[(char, &str)] = &[
    ('^', "^^"),
    ('|', "^|"),
    ('>', "^>"),
    ('<', "^<"),
    ('%', "%%"),
    ('&', "^&"),
    ('(', "^("),
    (')', "^)"),
    ('"', "^\""),
];

/// Escape a single line so `echo <line>` prints it literally inside a
/// parenthesized block.
///
/// Applies [`CMD_ECHO_ESCAPES`] in order, one full pass per pair.
pub fn escape_cmd_echo(line: &str) -> String {
    CMD_ECHO_ESCAPES
        .iter()
        .fold(line.to_string(), |acc, (pattern, replacement)| {
            acc.replace(*pattern, replacement)
        })
}

/// True for lines `echo` cannot print as-is (empty or whitespace-only).
pub fn is_blank_line(line: &str) -> bool {
    line.trim().is_empty()
}

/// Quote a path for cmd.exe. Paths cannot contain `"` on Windows, so no
/// inner escaping is needed.
pub fn quote_cmd_path(path: &str) -> String {
    format!("\"{}\"", path)
}
