use regex::Regex;
use std::sync::LazyLock;

/// An architecture rule: a pattern plus the text reported when it matches.
///
/// Rules are declared once at startup and never mutated; declaration order
/// determines report order when several rules match the same line.
pub struct Rule {
    /// Stable identifier (e.g. "ARCH-001")
    pub id: &'static str,
    /// Human-readable rule name
    pub name: &'static str,
    /// Pattern applied to one added line, or to the whole diff in whole-diff scan
    pub pattern: Regex,
    /// What the violation is
    pub message: &'static str,
    /// How to fix it
    pub guidance: &'static str,
}

fn rule(
    id: &'static str,
    name: &'static str,
    pattern: &str,
    message: &'static str,
    guidance: &'static str,
) -> Rule {
    Rule {
        id,
        name,
        // Patterns are fixed literals; a failure here is a programming error.
        pattern: Regex::new(pattern).unwrap_or_else(|e| panic!("invalid pattern for {id}: {e}")),
        message,
        guidance,
    }
}

fn core_rules() -> Vec<Rule> {
    vec![
        rule(
            "ARCH-001",
            "Layering Violation: Direct DB Access",
            r#"(?i)(import|require).*from.*(['"])(db|mysql|pg|prisma|mongoose|sql)"#,
            "Controller/UI layers must not reach into database drivers directly.",
            "Route persistence through a Service or Repository layer to keep business logic clean.",
        ),
        rule(
            "ARCH-002",
            "Security: Hardcoded Secret",
            r#"(?i)(password|secret|api_key|token|access_key)\s*[:=]\s*['"][a-zA-Z0-9_-]+['"]"#,
            "Suspected hardcoded credential committed to source.",
            "Move the value to GitHub Secrets and inject it through an environment variable.",
        ),
        rule(
            "ARCH-003",
            "Pattern: Dangerous Singleton",
            r"(?i)this\.instance\s*=\s*new",
            "Non-atomic singleton instantiation detected.",
            "Export a module-level constant or make the initialization idempotent.",
        ),
        rule(
            "ARCH-004",
            "Maintainability: Fat Interface",
            r"(?i)interface.*\{[\s\S]{500,}\}",
            "Interface declaration is far too large.",
            "This violates interface segregation; split it into fine-grained interfaces per responsibility.",
        ),
    ]
}

/// Rules applied per added line (line scan).
pub static BUILTIN_RULES: LazyLock<Vec<Rule>> = LazyLock::new(core_rules);

/// Rules applied once against the full diff text (whole-diff scan).
/// Superset of the line rules; the upward-import hint only makes sense here
/// because it has no per-line attribution.
pub static WHOLE_DIFF_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let mut rules = core_rules();
    rules.push(rule(
        "ARCH-005",
        "Dependency Smell: Upward Relative Import",
        r#"(?i)(import|require).*['"]\.\./"#,
        "Import reaches upward through parent directories.",
        "Deep relative imports often signal circular dependencies; prefer package-level entry points.",
    ));
    rules
});
