use crate::rule::Rule;
use crate::types::Violation;

const REPORT_HEADER: &str = "### 🛡️ Architecture Guard Detailed Report";

/// Render violations as a Markdown table, one row per violation in matcher
/// output order. Returns None when there is nothing to report so the caller
/// takes the clean path instead of posting an empty comment.
pub fn render_table(violations: &[Violation]) -> Option<String> {
    if violations.is_empty() {
        return None;
    }

    let mut report = format!("{REPORT_HEADER}\n\n");
    report.push_str("| File | Line | Rule | Violation | Guidance |\n");
    report.push_str("| :--- | :--- | :--- | :--- | :--- |\n");
    for v in violations {
        report.push_str(&format!(
            "| `{}` | {} | **{}** | {} | {} |\n",
            v.file, v.line, v.rule_name, v.message, v.guidance
        ));
    }
    Some(report)
}

/// Render triggered whole-diff rules as a sectioned list, one block per
/// rule. No per-line detail; whole-diff matches carry no attribution.
pub fn render_sections(triggered: &[&Rule]) -> Option<String> {
    if triggered.is_empty() {
        return None;
    }

    let mut report = format!("{REPORT_HEADER}\n");
    for rule in triggered {
        report.push_str(&format!(
            "\n#### ⚠️ {}\n\n{}\n\n**Guidance:** {}\n",
            rule.name, rule.message, rule.guidance
        ));
    }
    Some(report)
}
