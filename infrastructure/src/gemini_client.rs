use domain::generator::SqlGenerator;
use domain::schema::SQL_PROMPT;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::types::Result;
use std::sync::Arc;

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Client for the Gemini generateContent endpoint. One request per question,
/// no streaming, no retry; any failure surfaces as a single error the caller
/// reports and moves on from.
#[derive(Clone)]
pub struct GeminiClient {
    client: Arc<Client>,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Self {
        Self {
            client: Arc::new(Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn generate(&self, question: &str) -> Result<String> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: SQL_PROMPT.to_string(),
                    },
                    Part {
                        text: question.to_string(),
                    },
                ],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(anyhow::anyhow!("Gemini API error {}: {}", status, text));
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)?;
        let mut output = String::new();
        if let Some(candidate) = parsed.candidates.into_iter().next() {
            for part in candidate.content.parts {
                output.push_str(&part.text);
            }
        }
        Ok(clean_sql_output(&output))
    }
}

impl SqlGenerator for GeminiClient {
    fn generate_sql(
        &self,
        question: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send {
        self.generate(question)
    }
}

/// Strip surrounding whitespace, markdown fences, and a leading `sql` language
/// tag. The prompt tells the model not to emit any of these; models do anyway.
fn clean_sql_output(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("```") && trimmed.ends_with("```") && trimmed.len() > 6 {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() >= 3 && lines.last().map(|l| l.trim()) == Some("```") {
            return lines[1..lines.len() - 1].join("\n").trim().to_string();
        }
    }
    let stripped = trimmed
        .strip_prefix("```sql")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let stripped = stripped.strip_suffix("```").unwrap_or(stripped).trim();
    stripped
        .strip_prefix("sql\n")
        .unwrap_or(stripped)
        .trim()
        .to_string()
}
