//! Markdown rendering for outline results.

use crate::model::OutlineResult;

/// Convert an outline result to Markdown.
///
/// The title becomes a level-one heading and the outline a nested bullet
/// list, one indentation step per heading level.
pub fn to_markdown(result: &OutlineResult) -> String {
    let mut output = format!("# {}\n", escape_markdown(&result.title));

    if !result.outline.is_empty() {
        output.push('\n');
    }

    for entry in &result.outline {
        let indent = "  ".repeat(entry.level.depth());
        output.push_str(&format!(
            "{}- {} (p. {})\n",
            indent,
            escape_markdown(&entry.text),
            entry.page
        ));
    }

    output
}

fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
