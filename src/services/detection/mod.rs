// Language identification over recognized text
//
// On-device: whatlang's trigram classifier, mapped down to two-letter tags.
// Identification never fails the pipeline; anything inconclusive collapses
// to the undetermined sentinel and translation is skipped.

use tracing::debug;

use crate::core::types::{DetectedLanguage, LanguageTag};

#[derive(Debug, Default, Clone)]
pub struct LanguageDetector;

impl LanguageDetector {
    pub fn new() -> Self {
        Self
    }

    /// Identify the dominant language of `text`.
    pub fn detect(&self, text: &str) -> DetectedLanguage {
        if text.trim().is_empty() {
            return DetectedLanguage::Undetermined;
        }

        let Some(info) = whatlang::detect(text) else {
            debug!("language identification returned nothing");
            return DetectedLanguage::Undetermined;
        };

        // whatlang reports ISO 639-3; the translation endpoint wants 639-1
        match isolang::Language::from_639_3(info.lang().code()).and_then(|lang| lang.to_639_1()) {
            Some(code) => DetectedLanguage::Tag(LanguageTag::new(code)),
            None => {
                debug!(lang = info.lang().code(), "no two-letter tag for detected language");
                DetectedLanguage::Undetermined
            }
        }
    }
}
