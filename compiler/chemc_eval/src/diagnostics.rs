use crate::error::EvalError;

/// Render an evaluation error against the formula line it came from.
///
/// ```text
/// error: unknown element symbol 'Xx' at column 3
///  --> line 7, col 3
/// 7 | MgXx(OH)2
///   |   ~~
/// ```
///
/// Errors without a column (limits on the whole line) get the message and
/// location header only.
pub fn render_snippet(err: &EvalError, line: &str, line_number: usize) -> String {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(column) = err.column() else {
        return format!("error: {err}\n --> line {line_number}\n");
    };

    let gutter = line_number.to_string();
    let pad = " ".repeat(gutter.len());
    let width = err.width().max(1);
    let underline = if width == 1 {
        "^".to_string()
    } else {
        "~".repeat(width)
    };
    let indent = " ".repeat(column.saturating_sub(1));

    format!(
        "error: {err}\n --> line {line_number}, col {column}\n{gutter} | {line}\n{pad} | {indent}{underline}\n"
    )
}
