/// A materialized rule match against one added line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Rule identifier (e.g. "ARCH-002")
    pub rule_id: String,
    /// Rule name shown in the report
    pub rule_name: String,
    /// What the violation is
    pub message: String,
    /// How to fix it
    pub guidance: String,
    /// File path from the diff
    pub file: String,
    /// 1-based line number in the new version of the file
    pub line: u32,
    /// Offending line content, trimmed
    pub snippet: String,
}
