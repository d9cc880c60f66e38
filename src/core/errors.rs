// Custom error types for better error handling and debugging
//
// Using thiserror for ergonomic error definitions with:
// - Context preservation
// - Type-safe error matching
// - Automatic Display/Error trait implementations
// - Source error chaining

use reqwest::StatusCode;
use thiserror::Error;

/// Image encoding errors
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("image produced no data ({width}x{height})")]
    NoData { width: u32, height: u32 },

    #[error("image serialization failed: {0}")]
    Serialize(#[from] image::ImageError),

    #[error("encoding task failed: {0}")]
    Task(String),
}

/// OCR client errors
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("OCR endpoint returned {status}: {body}")]
    Endpoint { status: StatusCode, body: String },

    #[error("malformed OCR response: {0}")]
    Parse(String),
}

/// Translation client errors
///
/// These never abort the pipeline: the caller logs them and falls back to
/// the original text.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("translation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("translation endpoint returned {status}: {body}")]
    Endpoint { status: StatusCode, body: String },

    #[error("translation response contained no text")]
    Empty,
}

/// Speech recognition errors
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("transcription request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("transcription endpoint returned {status}: {body}")]
    Endpoint { status: StatusCode, body: String },

    #[error("malformed transcription response: {0}")]
    Parse(String),

    #[error("no transcription endpoint configured (set ASR_ENDPOINT)")]
    NotConfigured,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no vision API key configured (set VISION_API_KEY)")]
    MissingApiKey,

    #[error("JPEG quality must be in [0.0, 1.0], got {0}")]
    InvalidQuality(f32),
}

/// Pipeline orchestration errors
///
/// Only terminal failures live here; a failed translation or an
/// undetermined language takes the fail-open path instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no image uploaded")]
    NoInput,

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Ocr(#[from] OcrError),

    #[error("image analysis task failed: {0}")]
    AnalysisFailed(String),
}

impl PipelineError {
    /// Short description for the user-visible alert dialog.
    pub fn alert_text(&self) -> String {
        match self {
            PipelineError::NoInput => "No Image Uploaded".to_string(),
            other => other.to_string(),
        }
    }
}

// Convenience type aliases for Results
pub type EncodeResult<T> = Result<T, EncodeError>;
pub type OcrResult<T> = Result<T, OcrError>;
pub type TranslateResult<T> = Result<T, TranslateError>;
pub type SpeechResult<T> = Result<T, SpeechError>;
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_input_alert_matches_dialog_copy() {
        assert_eq!(PipelineError::NoInput.alert_text(), "No Image Uploaded");
    }

    #[test]
    fn terminal_errors_render_a_diagnostic() {
        let err = PipelineError::Encode(EncodeError::NoData {
            width: 0,
            height: 0,
        });
        assert!(err.alert_text().contains("no data"));
    }
}
