pub mod prompt;

use serde_json::json;

use crate::config::ChatConfig;

/// Thin proxy to the generative text backend. Wire format follows the
/// common `generateContent` shape: the prompt goes out as
/// `contents[0].parts[0].text`, the reply comes back at
/// `candidates[0].content.parts[0].text`.
pub struct ChatBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl ChatBackend {
    pub fn new(config: &ChatConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, String> {
        let body = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ]
        });

        let resp = self
            .client
            .post(&self.api_url)
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("Chat backend unreachable: {e}"))?;

        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| format!("Invalid chat backend response: {e}"))?;

        data["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                let detail = data["error"]["message"].as_str().unwrap_or("no candidates");
                format!("Chat backend error: {detail}")
            })
    }
}
