use crate::ai::AiReviewer;
use crate::cli::ReviewArgs;
use crate::config::{Engine, EnginePlan, Scan};
use crate::github::{GithubClient, PrContext};
use crate::{diff, matcher, report, rule};
use anyhow::Result;
use tracing::{debug, error, info, warn};

/// Terminal state of a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No findings; nothing posted
    Pass,
    /// Findings posted, advisory only (ai/hybrid)
    Warn,
    /// Findings posted, run must fail (builtin)
    Fail,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Pass | Self::Warn => 0,
            Self::Fail => 1,
        }
    }
}

/// Run one gatekeeper check: resolve the PR context, fetch the diff, run
/// the enabled engines in order, and post at most one comment. Fails
/// closed: any configuration or upstream error aborts the run before a
/// partial report can go out.
pub async fn run(args: &ReviewArgs) -> Result<Outcome> {
    let plan = EnginePlan::resolve(args.engine, args.ai_api_key.is_some())?;
    debug!("Engine plan: {:?}", plan);

    let ctx = PrContext::from_env()?;
    info!(
        "Reviewing {}/{} PR #{}",
        ctx.owner, ctx.repo, ctx.number
    );

    let github = GithubClient::new(&args.github_token);
    let diff_text = github.fetch_diff(&ctx).await?;

    let mut sections = Vec::new();
    let mut builtin_count = 0usize;

    if plan.builtin {
        let (section, count) = builtin_section(&diff_text, args.scan);
        builtin_count = count;
        info!("Builtin engine: {} findings", count);
        sections.extend(section);
    }

    let mut ai_reported = false;
    if plan.ai {
        // resolve() guarantees the key is present when ai is enabled
        let api_key = args.ai_api_key.as_deref().unwrap_or_default();
        let reviewer = AiReviewer::new(&args.ai_base_url, api_key, &args.ai_model);
        if let Some(findings) = reviewer
            .review(&diff_text, &args.architecture_rules)
            .await?
        {
            ai_reported = true;
            sections.push(ai_section(&findings));
        }
    }

    let Some(body) = merge_report(sections) else {
        info!("Clean architecture! Well done.");
        return Ok(Outcome::Pass);
    };

    if args.dry_run {
        info!("Dry run - skipping PR comment:");
        for line in body.lines() {
            info!("{}", line);
        }
    } else {
        github.post_comment(&ctx, &body).await?;
    }

    match args.engine {
        Engine::Builtin => {
            error!("Detected {} architecture violations.", builtin_count);
            Ok(Outcome::Fail)
        }
        Engine::Ai | Engine::Hybrid => {
            warn!(
                "Architecture review reported {} builtin violations{} (advisory)",
                builtin_count,
                if ai_reported { " and AI findings" } else { "" }
            );
            Ok(Outcome::Warn)
        }
    }
}

/// Run the builtin engine over the fetched diff text. Returns the report
/// section (None when clean) and the finding count.
fn builtin_section(diff_text: &str, scan: Scan) -> (Option<String>, usize) {
    match scan {
        Scan::Line => {
            let lines = diff::index_added_lines(diff_text);
            let violations = matcher::match_lines(&lines, &rule::BUILTIN_RULES);
            let count = violations.len();
            (report::render_table(&violations), count)
        }
        Scan::Whole => {
            let triggered = matcher::match_whole(diff_text, &rule::WHOLE_DIFF_RULES);
            let count = triggered.len();
            (report::render_sections(&triggered), count)
        }
    }
}

fn ai_section(findings: &str) -> String {
    format!("### 🤖 AI Architecture Review\n\n{findings}")
}

/// Merge engine sections into one comment body, blank-line separated.
/// No sections means nothing to post and a clean run.
fn merge_report(sections: Vec<String>) -> Option<String> {
    if sections.is_empty() {
        None
    } else {
        Some(sections.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET_DIFF: &str =
        "+++ b/src/controller.js\n@@ -1,2 +1,3 @@\n context\n+const password = \"abc123\";\n";
    const CLEAN_DIFF: &str =
        "+++ b/src/ui.tsx\n@@ -1 +1,2 @@\n+import { Button } from './components';\n+export const label = 'Save';\n";

    #[test]
    fn pass_and_warn_exit_zero_fail_exits_one() {
        assert_eq!(Outcome::Pass.exit_code(), 0);
        assert_eq!(Outcome::Warn.exit_code(), 0);
        assert_eq!(Outcome::Fail.exit_code(), 1);
    }

    #[test]
    fn builtin_line_scan_yields_a_table_section() {
        let (section, count) = builtin_section(SECRET_DIFF, Scan::Line);
        assert_eq!(count, 1);
        let section = section.unwrap();
        assert!(section.starts_with("### 🛡️ Architecture Guard Detailed Report"));
        assert!(section.contains("| `src/controller.js` | 2 |"));
    }

    #[test]
    fn builtin_whole_scan_yields_a_sectioned_report() {
        let diff = "+import { x } from '../helpers';\n";
        let (section, count) = builtin_section(diff, Scan::Whole);
        assert_eq!(count, 1);
        assert!(section.unwrap().contains("#### ⚠️ Dependency Smell: Upward Relative Import"));
    }

    #[test]
    fn clean_diff_yields_no_section() {
        let (section, count) = builtin_section(CLEAN_DIFF, Scan::Line);
        assert_eq!(count, 0);
        assert!(section.is_none());
        let (section, count) = builtin_section(CLEAN_DIFF, Scan::Whole);
        assert_eq!(count, 0);
        assert!(section.is_none());
    }

    #[test]
    fn hybrid_sections_merge_with_a_blank_line() {
        let (builtin, _) = builtin_section(SECRET_DIFF, Scan::Line);
        let sections = vec![builtin.unwrap(), ai_section("- `src/controller.js`: leaked key")];
        let body = merge_report(sections).unwrap();

        let (first, second) = body.split_once("\n\n### 🤖 AI Architecture Review\n\n").unwrap();
        assert!(first.starts_with("### 🛡️ Architecture Guard Detailed Report"));
        assert_eq!(second, "- `src/controller.js`: leaked key");
    }

    #[test]
    fn no_sections_means_nothing_to_post() {
        assert!(merge_report(vec![]).is_none());
    }

    #[test]
    fn single_section_body_is_unchanged() {
        let body = merge_report(vec!["### report".into()]).unwrap();
        assert_eq!(body, "### report");
    }
}
