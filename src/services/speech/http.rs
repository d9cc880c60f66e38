// HTTP client implementation for a streaming transcription service
//
// The engine re-transcribes the accumulated capture on each audio chunk
// and publishes the full text as the running best transcription.

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::warn;

use crate::core::config::SpeechConfig;
use crate::core::errors::{SpeechError, SpeechResult};
use crate::core::types::LanguageTag;
use crate::services::speech::{RecognitionStream, SpeechRecognizer};

/// Audio buffers queued between the capture session and the upload task.
const AUDIO_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Serialize)]
struct TranscribeRequest {
    audio_b64: String,
    language: String,
}

#[derive(Debug, Deserialize)]
struct TranscribeResponse {
    text: String,
}

/// HTTP transcription client.
pub struct HttpRecognizer {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpRecognizer {
    pub fn new(config: &SpeechConfig) -> SpeechResult<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or(SpeechError::NotConfigured)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { http, endpoint })
    }
}

#[async_trait]
impl SpeechRecognizer for HttpRecognizer {
    async fn start(&self, language: &LanguageTag) -> SpeechResult<RecognitionStream> {
        let (audio_tx, mut audio_rx) = mpsc::channel::<Vec<i16>>(AUDIO_CHANNEL_CAPACITY);
        let (text_tx, text_rx) = watch::channel(String::new());

        let http = self.http.clone();
        let url = format!("{}/transcribe", self.endpoint.trim_end_matches('/'));
        let language = language.to_string();

        tokio::spawn(async move {
            let mut pcm: Vec<i16> = Vec::new();
            while let Some(chunk) = audio_rx.recv().await {
                pcm.extend_from_slice(&chunk);
                match transcribe(&http, &url, &pcm, &language).await {
                    Ok(text) if !text.is_empty() => {
                        let _ = text_tx.send(text);
                    }
                    Ok(_) => {}
                    Err(err) => warn!(%err, "transcription update failed"),
                }
            }
            // audio channel closed: capture stopped, task exits
        });

        Ok(RecognitionStream {
            audio: audio_tx,
            transcripts: text_rx,
        })
    }
}

async fn transcribe(
    http: &reqwest::Client,
    url: &str,
    pcm: &[i16],
    language: &str,
) -> SpeechResult<String> {
    let mut bytes = Vec::with_capacity(pcm.len() * 2);
    for sample in pcm {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }

    let request = TranscribeRequest {
        audio_b64: general_purpose::STANDARD.encode(&bytes),
        language: language.to_string(),
    };

    let response = http.post(url).json(&request).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(SpeechError::Endpoint { status, body });
    }

    let parsed: TranscribeResponse = response
        .json()
        .await
        .map_err(|e| SpeechError::Parse(e.to_string()))?;

    Ok(parsed.text)
}
