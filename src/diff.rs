use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// One line added in the new version of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// Path from the `+++ b/` marker
    pub file: String,
    /// 1-based line number in the post-change file
    pub line: u32,
    /// Line content with the leading `+` stripped
    pub content: String,
}

// New-file start line from a hunk header like `@@ -1,2 +10,4 @@`.
static HUNK_NEW_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+([0-9]+)").expect("valid hunk pattern"));

/// Walk a unified diff and emit every added line with its file and line
/// number in the new version.
///
/// Single pass with two counters: `+++ b/` resets the current file, `@@`
/// resets the line counter to the hunk's declared start, context lines
/// advance the counter, removed lines are invisible to it. A malformed
/// hunk header leaves the counter alone.
pub fn index_added_lines(diff: &str) -> Vec<DiffLine> {
    let mut lines = Vec::new();
    let mut current_file = String::new();
    let mut current_line: u32 = 0;

    for raw in diff.split('\n') {
        if let Some(path) = raw.strip_prefix("+++ b/") {
            current_file = path.to_string();
        } else if raw.starts_with("@@") {
            if let Some(caps) = HUNK_NEW_START.captures(raw) {
                if let Ok(start) = caps[1].parse::<u32>() {
                    current_line = start.saturating_sub(1);
                }
            }
        } else if raw.starts_with('+') && !raw.starts_with("+++") {
            current_line += 1;
            lines.push(DiffLine {
                file: current_file.clone(),
                line: current_line,
                content: raw[1..].to_string(),
            });
        } else if !raw.starts_with('-') {
            current_line += 1;
        }
    }

    trace!("Indexed {} added lines", lines.len());
    lines
}
