//! Plain text rendering for outline results.

use crate::model::OutlineResult;

/// Convert an outline result to an indented plain-text tree.
pub fn to_text(result: &OutlineResult) -> String {
    let mut output = String::new();
    output.push_str(&result.title);
    output.push('\n');

    for entry in &result.outline {
        output.push_str(&"    ".repeat(entry.level.depth() + 1));
        output.push_str(&format!("[{}] {} .... {}\n", entry.level, entry.text, entry.page));
    }

    output
}
