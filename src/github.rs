use anyhow::{Context as _, Result, bail};
use serde::Deserialize;
use std::fs;
use tracing::{debug, info};

const DEFAULT_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("archguard/", env!("CARGO_PKG_VERSION"));

/// Repository coordinates and PR number for the event being checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrContext {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

#[derive(Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequest>,
}

#[derive(Deserialize)]
struct PullRequest {
    number: u64,
}

impl PrContext {
    /// Resolve the PR context from the Actions runtime environment:
    /// `GITHUB_REPOSITORY` (owner/repo) and the event payload at
    /// `GITHUB_EVENT_PATH`. A missing or non-PR payload is a fatal
    /// configuration error, raised before any network call.
    pub fn from_env() -> Result<Self> {
        let repository = std::env::var("GITHUB_REPOSITORY")
            .context("GITHUB_REPOSITORY is not set; must run inside a GitHub Actions job")?;
        let (owner, repo) = repository
            .split_once('/')
            .with_context(|| format!("GITHUB_REPOSITORY is not owner/repo: {repository}"))?;

        let event_path = std::env::var("GITHUB_EVENT_PATH")
            .context("GITHUB_EVENT_PATH is not set; must run inside a GitHub Actions job")?;
        let payload = fs::read_to_string(&event_path)
            .with_context(|| format!("Failed to read event payload at {event_path}"))?;
        let event: EventPayload =
            serde_json::from_str(&payload).context("Failed to parse event payload")?;

        let Some(pr) = event.pull_request else {
            bail!("Must run on a pull_request event");
        };

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number: pr.number,
        })
    }
}

/// Thin GitHub REST client: one diff fetch, one comment post, no retries.
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl GithubClient {
    pub fn new(token: &str) -> Self {
        let api_base =
            std::env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self {
            http: reqwest::Client::new(),
            api_base,
            token: token.to_string(),
        }
    }

    /// Fetch the unified diff for the PR via the diff media type.
    pub async fn fetch_diff(&self, ctx: &PrContext) -> Result<String> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}",
            self.api_base, ctx.owner, ctx.repo, ctx.number
        );
        debug!("Fetching diff from {}", url);

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github.v3.diff")
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .context("Failed to fetch PR diff")?;

        let status = response.status();
        let body = response.text().await.context("Failed to read diff body")?;
        if !status.is_success() {
            bail!("Diff fetch returned {status}: {body}");
        }

        debug!("Fetched diff: {} bytes", body.len());
        Ok(body)
    }

    /// Post the report as a single PR comment.
    pub async fn post_comment(&self, ctx: &PrContext, body: &str) -> Result<()> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.api_base, ctx.owner, ctx.repo, ctx.number
        );
        debug!("Posting comment to {}", url);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await
            .context("Failed to post PR comment")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            bail!("Comment post returned {status}: {text}");
        }

        info!("Posted review comment on PR #{}", ctx.number);
        Ok(())
    }
}
