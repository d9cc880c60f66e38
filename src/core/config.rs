use crate::core::errors::ConfigError;
use std::env;

/// OCR endpoint configuration
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub endpoint: String,
    pub api_key: String,
    /// Sent as the client-attribution header on every annotate request.
    pub bundle_id: String,
    pub timeout_secs: u64,
}

/// Translation endpoint configuration
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

/// Streaming transcription service configuration
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    /// Absent means the speech flow is unavailable on this install.
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

/// Image encoding configuration
#[derive(Debug, Clone)]
pub struct EncodeConfig {
    pub jpeg_quality: f32,
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub ocr: OcrConfig,
    pub translate: TranslateConfig,
    pub speech: SpeechConfig,
    pub encode: EncodeConfig,
}

impl Config {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let config = Self::load_from_env();
        config.validate()?;
        Ok(config)
    }

    fn load_from_env() -> Self {
        let timeout_secs = env::var("HTTP_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Self {
            ocr: OcrConfig {
                endpoint: env::var("VISION_ENDPOINT")
                    .unwrap_or_else(|_| "https://vision.googleapis.com/v1/images:annotate".to_string()),
                api_key: env::var("VISION_API_KEY").unwrap_or_default(),
                bundle_id: env::var("CLIENT_BUNDLE_ID")
                    .unwrap_or_else(|_| "app.lingosnap.mobile".to_string()),
                timeout_secs,
            },
            translate: TranslateConfig {
                endpoint: env::var("TRANSLATE_ENDPOINT")
                    .unwrap_or_else(|_| "https://translate.googleapis.com/translate_a/single".to_string()),
                timeout_secs,
            },
            speech: SpeechConfig {
                endpoint: env::var("ASR_ENDPOINT").ok().filter(|s| !s.is_empty()),
                timeout_secs,
            },
            encode: EncodeConfig {
                jpeg_quality: env::var("JPEG_QUALITY")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1.0),
            },
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.ocr.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        if !(0.0..=1.0).contains(&self.encode.jpeg_quality) {
            return Err(ConfigError::InvalidQuality(self.encode.jpeg_quality));
        }

        Ok(())
    }
}

// Note: No Default implementation because Config::new() can fail
// Users should explicitly call Config::new()? and handle errors

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_rejected() {
        let mut config = Config::load_from_env();
        config.ocr.api_key = String::new();
        assert!(matches!(config.validate(), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn quality_outside_unit_interval_is_rejected() {
        let mut config = Config::load_from_env();
        config.ocr.api_key = "test-key".to_string();
        config.encode.jpeg_quality = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidQuality(_))
        ));
    }
}
