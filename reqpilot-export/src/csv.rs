//! Spreadsheet-import rendering: one row per story, fixed header, RFC 4180
//! quoting for fields that embed delimiters, quotes, or line breaks.

use reqpilot_core::UserStorySet;

/// Column order is part of the import contract; tools map by header name.
pub const CSV_HEADER: &str = "Code,Title,Story,Priority,Story Points,Dependencies";

pub fn stories_csv(set: &UserStorySet) -> String {
    let mut lines = vec![CSV_HEADER.to_string()];

    for story in &set.stories {
        let fields = [
            csv_field(&story.code),
            csv_field(&story.title),
            csv_field(&story.narrative),
            csv_field(story.priority.label()),
            story.story_points.to_string(),
            csv_field(&story.dependencies),
        ];
        lines.push(fields.join(","));
    }

    lines.join("\n")
}

/// Quote a field when it contains a comma, quote, or line break; double any
/// embedded quotes. Fields without those characters pass through unchanged.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Split one CSV row back into fields, honoring the quoting rules of
/// [`stories_csv`]. Used by import tooling and the round-trip tests.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
