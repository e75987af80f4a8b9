//! HTTP client for the hosted tutor model (Gemini `generateContent`).

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use super::{ChatMessage, ChatRole};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Fixed system instruction: the tutor only talks trigonometry.
const SYSTEM_INSTRUCTION: &str = "You are a friendly and helpful math tutor specializing in \
    trigonometry. Your goal is to help students understand concepts related to the unit circle \
    and mathematics. Only answer questions about math and trigonometry. If a user asks about \
    anything else, politely decline and steer the conversation back to math.";

#[derive(Debug, Error)]
pub enum TutorError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("response contained no text")]
    EmptyResponse,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

pub struct TutorClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl TutorClient {
    /// Build a client from the `GEMINI_API_KEY` environment variable.
    /// `None` means the tutor runs in degraded mode (feature disabled).
    pub fn from_env(model: &str) -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        Some(Self {
            http: reqwest::Client::new(),
            api_key,
            model: model.to_string(),
        })
    }

    /// Send one conversation turn: the prior history plus the new user
    /// message. Returns the assistant's text.
    pub async fn send_turn(
        &self,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, TutorError> {
        let mut contents: Vec<serde_json::Value> = history
            .iter()
            .map(|msg| {
                let role = match msg.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "model",
                };
                json!({ "role": role, "parts": [{ "text": msg.text }] })
            })
            .collect();
        contents.push(json!({ "role": "user", "parts": [{ "text": message }] }));

        let body = json!({
            "system_instruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
            "contents": contents,
        });

        let url = format!("{}/{}:generateContent", API_BASE, self.model);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TutorError::Status(response.status()));
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .filter(|text| !text.is_empty())
            .ok_or(TutorError::EmptyResponse)?;

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parsing_extracts_the_first_candidate() {
        let raw = r#"{
            "candidates": [
                { "content": { "parts": [{ "text": "sin is the y-coordinate" }], "role": "model" } }
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap();
        assert_eq!(text, "sin is the y-coordinate");
    }

    #[test]
    fn empty_candidates_parse_cleanly() {
        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }
}
