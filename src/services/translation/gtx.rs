// Translation over the public translate endpoint (gtx client protocol)

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::core::config::TranslateConfig;
use crate::core::errors::{TranslateError, TranslateResult};
use crate::core::types::TranslationRequest;
use crate::services::translation::TranslationProvider;

/// The endpoint rejects clients without a browser-looking agent.
const USER_AGENT: &str = "Mozilla/5.0";

pub struct GtxTranslator {
    http: reqwest::Client,
    endpoint: String,
}

impl GtxTranslator {
    pub fn new(config: &TranslateConfig) -> TranslateResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl TranslationProvider for GtxTranslator {
    async fn translate(&self, request: &TranslationRequest) -> TranslateResult<String> {
        let url = format!(
            "{}?client=gtx&sl={}&tl={}&dt=t&q={}",
            self.endpoint,
            request.source,
            request.target,
            urlencoding::encode(&request.text)
        );

        let response = self
            .http
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::Endpoint { status, body });
        }

        let body: Value = response.json().await?;
        let translated = collect_segments(&body);
        if translated.is_empty() {
            return Err(TranslateError::Empty);
        }

        debug!(
            source = %request.source,
            target = %request.target,
            chars = translated.len(),
            "translation received"
        );
        Ok(translated)
    }
}

/// The response is positional: element 0 is the sentence list, each
/// sentence's element 0 the translated segment.
fn collect_segments(body: &Value) -> String {
    let mut out = String::new();
    if let Some(sentences) = body.get(0).and_then(Value::as_array) {
        for sentence in sentences {
            if let Some(segment) = sentence.get(0).and_then(Value::as_str) {
                out.push_str(segment);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenates_sentence_segments() {
        let body: Value = serde_json::from_str(
            r#"[[["Hola ","Hello ",null,null],["Mundo","World",null,null]],null,"en"]"#,
        )
        .unwrap();
        assert_eq!(collect_segments(&body), "Hola Mundo");
    }

    #[test]
    fn non_positional_body_collects_nothing() {
        let body: Value = serde_json::from_str(r#"{"error": "nope"}"#).unwrap();
        assert_eq!(collect_segments(&body), "");
    }
}
