// Speech flow orchestration: toggle-driven capture, then translation of
// whatever transcription is currently displayed.
//
// The source language is the user-selected input tag, never auto-detected:
// the user already told us what they are speaking.

use std::sync::Arc;
use tracing::debug;

use crate::core::errors::SpeechResult;
use crate::core::types::{LanguageSelection, PipelineOutput, TranslationRequest};
use crate::orchestration::translate_or_original;
use crate::services::speech::{CaptureState, SpeechCapture, SpeechRecognizer};
use crate::services::translation::TranslationProvider;

pub struct DictationSession {
    capture: SpeechCapture,
    translator: Arc<dyn TranslationProvider>,
    languages: Arc<dyn LanguageSelection>,
}

impl DictationSession {
    pub fn new(
        recognizer: Arc<dyn SpeechRecognizer>,
        translator: Arc<dyn TranslationProvider>,
        languages: Arc<dyn LanguageSelection>,
    ) -> Self {
        Self {
            capture: SpeechCapture::new(recognizer),
            translator,
            languages,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.capture.state()
    }

    /// Start or stop recording with the currently selected input language.
    pub async fn toggle_recording(&mut self) -> SpeechResult<CaptureState> {
        let (source, _) = self.languages.selected_languages();
        self.capture.toggle(&source).await
    }

    /// Forward a captured audio buffer to the live recognition stream.
    pub fn push_audio(&self, samples: &[i16]) {
        self.capture.push_audio(samples);
    }

    /// Current best transcription.
    pub fn transcript(&self) -> String {
        self.capture.transcript()
    }

    /// Translate the currently displayed transcription.
    pub async fn translate_transcript(&self) -> PipelineOutput {
        let text = self.capture.transcript();
        if text.is_empty() {
            debug!("empty input; nothing to translate");
            return PipelineOutput::original(text);
        }

        let (source, target) = self.languages.selected_languages();
        if source == target {
            return PipelineOutput::original(text);
        }

        let request = TranslationRequest {
            text,
            source,
            target,
        };
        translate_or_original(self.translator.as_ref(), request).await
    }
}
