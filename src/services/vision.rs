//! Roster-photo import: sends a schedule photo to an OpenAI-compatible
//! vision endpoint and turns the reply into `day:shift` tokens.

use anyhow::{anyhow, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;

/// Instruction sent with every roster photo. The model must answer with
/// tokens the normal parser understands, nothing else.
const ROSTER_PROMPT: &str = "התמונה היא סידור משמרות שבועי. הוצא ממנה את המשמרות \
והחזר שורה אחת בלבד של אסימונים בפורמט יום:משמרת, מופרדים ברווחים. \
ימים: ראשון שני שלישי רביעי חמישי שישי שבת. \
משמרות: בוקר צהריים לילה כפולה_בוקר כפולה_לילה. \
דוגמה: ראשון:בוקר שלישי:לילה שישי:כפולה_בוקר. \
אל תוסיף טקסט אחר.";

#[derive(Debug, Deserialize)]
struct ChatCompletionReply {
    choices: Vec<ReplyChoice>,
}

#[derive(Debug, Deserialize)]
struct ReplyChoice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

struct VisionClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

/// Reads weekly rosters out of photos. Disabled (every call errors) when no
/// API key is configured.
pub struct RosterReader {
    inner: Option<VisionClient>,
}

impl RosterReader {
    pub fn from_config(config: &Config) -> Self {
        let inner = config.openai_api_key.as_ref().map(|key| VisionClient {
            http: reqwest::Client::new(),
            api_key: key.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.roster_model.clone(),
        });
        Self { inner }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Sends the photo to the vision endpoint and returns a normalized
    /// token line ready for the shift parser.
    pub async fn read_roster(&self, image: &[u8]) -> Result<String> {
        let client = self
            .inner
            .as_ref()
            .ok_or_else(|| anyhow!("roster reading is not configured"))?;

        let encoded = BASE64.encode(image);
        let payload = json!({
            "model": client.model,
            "messages": [
                { "role": "system", "content": ROSTER_PROMPT },
                {
                    "role": "user",
                    "content": [{
                        "type": "image_url",
                        "image_url": { "url": format!("data:image/jpeg;base64,{encoded}") }
                    }]
                }
            ],
            "max_tokens": 200
        });

        let response = client
            .http
            .post(format!("{}/chat/completions", client.base_url))
            .bearer_auth(&client.api_key)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        let reply: ChatCompletionReply = response.json().await?;
        let content = reply
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow!("model returned no content"))?;

        tracing::debug!("Roster model replied: {}", content);
        Ok(normalize_roster_reply(&content))
    }
}

/// Flattens a model reply into one token line: code fences stripped,
/// newlines collapsed to spaces.
fn normalize_roster_reply(content: &str) -> String {
    content
        .lines()
        .map(|line| line.trim().trim_matches('`'))
        .filter(|line| !line.is_empty() && !line.starts_with("```"))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
