use crate::Position;

/// Renders `message` pointing at `position` inside `source`.
///
/// The output is two lines, each preceded by a newline: the full source line
/// the position is on, then a caret under the column immediately followed by
/// the message:
///
/// ```text
///
/// let x = ;
///         ^Expected Number
/// ```
///
/// A line number outside `source` renders an empty source line. Without a
/// position the message is returned as is.
pub fn render_pointer(source: &str, position: Option<Position>, message: &str) -> String {
    let Some(position) = position else {
        return message.to_string();
    };

    let line_content = position
        .line
        .checked_sub(1)
        .and_then(|index| source.lines().nth(index))
        .unwrap_or("");
    let indent = " ".repeat(position.column.saturating_sub(1));

    format!("\n{line_content}\n{indent}^{message}")
}
