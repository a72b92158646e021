use crate::diff::DiffLine;
use crate::rule::Rule;
use crate::types::Violation;
use tracing::debug;

/// Apply every rule to every indexed line.
///
/// Deterministic and order-preserving: lines in emission order, rules in
/// declaration order, no short-circuit. A single line may produce several
/// violations.
pub fn match_lines(lines: &[DiffLine], rules: &[Rule]) -> Vec<Violation> {
    let mut violations = Vec::new();
    for line in lines {
        for rule in rules {
            if rule.pattern.is_match(&line.content) {
                violations.push(Violation {
                    rule_id: rule.id.to_string(),
                    rule_name: rule.name.to_string(),
                    message: rule.message.to_string(),
                    guidance: rule.guidance.to_string(),
                    file: line.file.clone(),
                    line: line.line,
                    snippet: line.content.trim().to_string(),
                });
            }
        }
    }
    debug!(
        "Matched {} rules against {} lines: {} violations",
        rules.len(),
        lines.len(),
        violations.len()
    );
    violations
}

/// Test each rule once against the entire diff text.
///
/// Returns triggered rules in declaration order. No file/line attribution;
/// this is the coarse mode used for rules whose pattern can span lines.
pub fn match_whole<'a>(diff: &str, rules: &'a [Rule]) -> Vec<&'a Rule> {
    let triggered: Vec<&Rule> = rules.iter().filter(|r| r.pattern.is_match(diff)).collect();
    debug!(
        "Whole-diff match: {} of {} rules triggered",
        triggered.len(),
        rules.len()
    );
    triggered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::index_added_lines;
    use crate::rule::{BUILTIN_RULES, WHOLE_DIFF_RULES};

    #[test]
    fn flags_secret_and_db_import_with_line_numbers() {
        let diff = "+++ b/src/controller.js\n@@ -1,2 +1,3 @@\n context\n+const password = \"abc123\";\n+import db from 'db-driver';\n";
        let lines = index_added_lines(diff);
        let violations = match_lines(&lines, &BUILTIN_RULES);

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].rule_id, "ARCH-002");
        assert_eq!(violations[0].file, "src/controller.js");
        assert_eq!(violations[0].line, 2);
        assert_eq!(violations[0].snippet, "const password = \"abc123\";");
        assert_eq!(violations[1].rule_id, "ARCH-001");
        assert_eq!(violations[1].line, 3);
    }

    #[test]
    fn one_line_can_trigger_several_rules() {
        let secret = "p".repeat(520);
        let line = DiffLine {
            file: "src/api.ts".into(),
            line: 7,
            content: format!("interface Cfg {{ token = \"{secret}\" }}"),
        };
        let violations = match_lines(&[line], &BUILTIN_RULES);

        // Hardcoded secret plus fat interface, both on the same line,
        // reported in rule declaration order.
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].rule_id, "ARCH-002");
        assert_eq!(violations[1].rule_id, "ARCH-004");
        assert!(violations.iter().all(|v| v.line == 7));
    }

    #[test]
    fn clean_lines_produce_no_violations() {
        let diff = "+++ b/src/ui.tsx\n@@ -1 +1,2 @@\n+import { Button } from './components';\n+export const label = 'Save';\n";
        let lines = index_added_lines(diff);
        assert!(match_lines(&lines, &BUILTIN_RULES).is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let line = DiffLine {
            file: "f.js".into(),
            line: 1,
            content: "THIS.INSTANCE = NEW Cache();".into(),
        };
        let violations = match_lines(&[line], &BUILTIN_RULES);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_id, "ARCH-003");
    }

    #[test]
    fn whole_diff_fat_interface_triggers_once_across_lines() {
        let body = "  method(): void;\n".repeat(40);
        let diff = format!("+++ b/src/big.ts\n@@ -0,0 +1,42 @@\n+interface Huge {{\n{}+}}\n",
            body.lines().map(|l| format!("+{l}\n")).collect::<String>());
        let triggered = match_whole(&diff, &WHOLE_DIFF_RULES);
        assert_eq!(triggered.len(), 1);
        assert_eq!(triggered[0].id, "ARCH-004");
    }

    #[test]
    fn whole_diff_flags_upward_imports() {
        let diff = "+import { helper } from '../../shared/utils';\n";
        let triggered = match_whole(diff, &WHOLE_DIFF_RULES);
        assert_eq!(triggered.len(), 1);
        assert_eq!(triggered[0].id, "ARCH-005");
    }

    #[test]
    fn whole_diff_preserves_declaration_order() {
        let diff = "+import db from 'mysql';\n+const secret = \"hunter2\";\n+import { x } from '../helpers';\n";
        let ids: Vec<&str> = match_whole(diff, &WHOLE_DIFF_RULES)
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, ["ARCH-001", "ARCH-002", "ARCH-005"]);
    }
}
