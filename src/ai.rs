use anyhow::{Context as _, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Literal response the model must return when the diff is compliant.
const CLEAN_SENTINEL: &str = "CLEAN";

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

/// Second-opinion reviewer backed by an OpenAI-compatible
/// chat-completions endpoint. One synchronous call per run, no retries;
/// any failure here is fatal for the whole check.
pub struct AiReviewer {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl AiReviewer {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    /// Send the diff and the user-supplied rule text to the model.
    /// Returns None when the model answers with the CLEAN sentinel,
    /// otherwise the model's Markdown findings.
    pub async fn review(&self, diff: &str, user_rules: &str) -> Result<Option<String>> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: build_prompt(diff, user_rules),
            }],
            temperature: 0.0,
        };

        debug!("Requesting AI review with model {}", self.model);
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("AI review request failed")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            bail!("AI review returned {status}: {text}");
        }

        let chat: ChatResponse = response
            .json()
            .await
            .context("Failed to parse AI review response")?;
        let Some(choice) = chat.choices.into_iter().next() else {
            bail!("AI review response contained no choices");
        };

        let answer = choice.message.content.trim().to_string();
        if answer == CLEAN_SENTINEL {
            info!("AI reviewer found no violations");
            Ok(None)
        } else {
            info!("AI reviewer reported findings ({} bytes)", answer.len());
            Ok(Some(answer))
        }
    }
}

/// Fixed instruction template: architect role, user rules verbatim, diff
/// verbatim, and the CLEAN contract.
fn build_prompt(diff: &str, user_rules: &str) -> String {
    format!(
        "You are a senior software architect reviewing a pull request.\n\n\
        Check the following code changes against these architecture rules:\n\n\
        <rules>\n{user_rules}\n</rules>\n\n\
        <diff>\n{diff}\n</diff>\n\n\
        If the changes comply with every rule, respond with the single word CLEAN.\n\
        Otherwise respond with Markdown describing each violation: the file, the \
        problem, and how to fix it."
    )
}
