// OCR Service Module - cloud text detection over the vision annotate endpoint

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::core::config::OcrConfig;
use crate::core::errors::{OcrError, OcrResult};

/// Feature requested on every annotate call.
const FEATURE_TEXT_DETECTION: &str = "TEXT_DETECTION";

/// Header used by the endpoint to attribute traffic to a client build.
const BUNDLE_ID_HEADER: &str = "X-Ios-Bundle-Identifier";

/// Text recognition seam: the photo pipeline only needs "base64 image in,
/// recognized text out", so tests and alternative backends can stand in
/// for the cloud client.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Recognize text in a base64-encoded image payload.
    ///
    /// Recognizing no text is success with an empty string.
    async fn recognize(&self, image_base64: &str) -> OcrResult<String>;
}

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateEntry>,
}

#[derive(Debug, Serialize)]
struct AnnotateEntry {
    image: ImageContent,
    features: Feature,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    responses: Vec<AnnotateResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateResult {
    #[serde(default)]
    full_text_annotation: Option<FullTextAnnotation>,
}

#[derive(Debug, Deserialize)]
struct FullTextAnnotation {
    text: String,
}

/// HTTP client for the vision annotate endpoint.
///
/// One POST per user action, no retries; auth is the API key as a URL
/// query parameter.
pub struct VisionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    bundle_id: String,
}

impl VisionClient {
    pub fn new(config: &OcrConfig) -> OcrResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            bundle_id: config.bundle_id.clone(),
        })
    }
}

#[async_trait]
impl TextRecognizer for VisionClient {
    async fn recognize(&self, image_base64: &str) -> OcrResult<String> {
        let url = format!("{}?key={}", self.endpoint, self.api_key);
        let body = AnnotateRequest {
            requests: vec![AnnotateEntry {
                image: ImageContent {
                    content: image_base64.to_string(),
                },
                features: Feature {
                    kind: FEATURE_TEXT_DETECTION,
                },
            }],
        };

        let response = self
            .http
            .post(&url)
            .header(BUNDLE_ID_HEADER, &self.bundle_id)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(OcrError::Endpoint { status, body });
        }

        let body = response.text().await?;
        let text = extract_text(&body)?;
        debug!(chars = text.len(), "annotate response parsed");
        Ok(text)
    }
}

/// Pull `responses[0].fullTextAnnotation.text` out of the vendor JSON.
///
/// A body without a first response entry (or that is not valid JSON) is
/// malformed. A present entry with no annotation is the endpoint's
/// "no text found" and yields an empty string.
fn extract_text(body: &str) -> OcrResult<String> {
    let parsed: AnnotateResponse =
        serde_json::from_str(body).map_err(|e| OcrError::Parse(e.to_string()))?;

    let first = parsed
        .responses
        .into_iter()
        .next()
        .ok_or_else(|| OcrError::Parse("response contained no annotation entries".to_string()))?;

    Ok(first
        .full_text_annotation
        .map(|annotation| annotation.text)
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_wire_format() {
        let body = AnnotateRequest {
            requests: vec![AnnotateEntry {
                image: ImageContent {
                    content: "AAAA".to_string(),
                },
                features: Feature {
                    kind: FEATURE_TEXT_DETECTION,
                },
            }],
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "requests": [{
                    "image": {"content": "AAAA"},
                    "features": {"type": "TEXT_DETECTION"}
                }]
            })
        );
    }

    #[test]
    fn extracts_full_text_annotation() {
        let body = r#"{
            "responses": [{
                "fullTextAnnotation": {"text": "Hello World", "pages": []},
                "textAnnotations": []
            }]
        }"#;
        assert_eq!(extract_text(body).unwrap(), "Hello World");
    }

    #[test]
    fn missing_annotation_is_no_text_found() {
        let body = r#"{"responses": [{}]}"#;
        assert_eq!(extract_text(body).unwrap(), "");
    }

    #[test]
    fn empty_response_list_is_malformed() {
        assert!(matches!(
            extract_text(r#"{"responses": []}"#),
            Err(OcrError::Parse(_))
        ));
    }

    #[test]
    fn missing_responses_field_is_malformed() {
        assert!(matches!(extract_text(r#"{}"#), Err(OcrError::Parse(_))));
    }

    #[test]
    fn invalid_json_is_malformed() {
        assert!(matches!(
            extract_text("not json at all"),
            Err(OcrError::Parse(_))
        ));
    }
}
