// Photo flow orchestration: encode -> OCR -> detect -> translate
//
// Image analysis starts as soon as an image is picked; the translate
// action awaits that analysis instead of reading display state that may
// not be populated yet.

use image::DynamicImage;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::core::errors::{PipelineError, PipelineResult};
use crate::core::types::{DetectedLanguage, LanguageTag, PipelineOutput, TranslationRequest};
use crate::orchestration::translate_or_original;
use crate::services::detection::LanguageDetector;
use crate::services::ocr::TextRecognizer;
use crate::services::translation::TranslationProvider;
use crate::utils::image_ops;

/// The full photo pipeline over injected service seams.
pub struct PhotoPipeline {
    recognizer: Arc<dyn TextRecognizer>,
    detector: LanguageDetector,
    translator: Arc<dyn TranslationProvider>,
    jpeg_quality: f32,
}

impl PhotoPipeline {
    pub fn new(
        recognizer: Arc<dyn TextRecognizer>,
        translator: Arc<dyn TranslationProvider>,
        jpeg_quality: f32,
    ) -> Self {
        Self {
            recognizer,
            detector: LanguageDetector::new(),
            translator,
            jpeg_quality,
        }
    }

    /// Encoder + OCR stages: image in, recognized text out.
    ///
    /// Empty text is success; terminal failures abort here and surface as
    /// an alert.
    pub async fn recognize(&self, image: DynamicImage) -> PipelineResult<String> {
        let payload = image_ops::jpeg_base64_payload(image, self.jpeg_quality).await?;
        let text = self.recognizer.recognize(&payload).await?;
        debug!(chars = text.len(), "image text recognized");
        Ok(text)
    }

    /// Detection + translation stages over already-recognized text.
    ///
    /// Short-circuits on empty text, undetermined language, or a source
    /// that already matches the target; falls back to the original text
    /// when the provider fails.
    pub async fn translate_recognized(
        &self,
        text: String,
        target: &LanguageTag,
    ) -> PipelineOutput {
        if text.is_empty() {
            return PipelineOutput::original(text);
        }

        let source = match self.detector.detect(&text) {
            DetectedLanguage::Undetermined => {
                debug!("language undetermined; skipping translation");
                return PipelineOutput::original(text);
            }
            DetectedLanguage::Tag(tag) if tag == *target => {
                debug!(%tag, "text already in target language");
                return PipelineOutput::original(text);
            }
            DetectedLanguage::Tag(tag) => tag,
        };

        let request = TranslationRequest {
            text,
            source,
            target: target.clone(),
        };
        translate_or_original(self.translator.as_ref(), request).await
    }

    /// Whole chain in one call, for callers that don't need the
    /// pick-then-translate split.
    pub async fn run(
        &self,
        image: DynamicImage,
        target: &LanguageTag,
    ) -> PipelineResult<PipelineOutput> {
        let text = self.recognize(image).await?;
        Ok(self.translate_recognized(text, target).await)
    }
}

enum Recognition {
    Pending(JoinHandle<PipelineResult<String>>),
    Ready(String),
    /// A terminal analysis failure consumed the picked image; the user
    /// must pick again.
    Spent,
}

/// One picked image and its in-flight analysis.
///
/// Created at pick time so recognition runs while the user is still
/// choosing a language; `translate` chains onto the analysis task rather
/// than blocking on a latch.
pub struct PhotoSession {
    pipeline: Arc<PhotoPipeline>,
    recognition: Recognition,
}

impl PhotoSession {
    pub fn begin(pipeline: Arc<PhotoPipeline>, image: DynamicImage) -> Self {
        let task = {
            let pipeline = pipeline.clone();
            tokio::spawn(async move { pipeline.recognize(image).await })
        };
        Self {
            pipeline,
            recognition: Recognition::Pending(task),
        }
    }

    /// Wait for image analysis to resolve and return the recognized text.
    pub async fn recognized(&mut self) -> PipelineResult<String> {
        match std::mem::replace(&mut self.recognition, Recognition::Spent) {
            Recognition::Pending(task) => {
                let text = task
                    .await
                    .map_err(|e| PipelineError::AnalysisFailed(e.to_string()))??;
                self.recognition = Recognition::Ready(text.clone());
                Ok(text)
            }
            Recognition::Ready(text) => {
                self.recognition = Recognition::Ready(text.clone());
                Ok(text)
            }
            Recognition::Spent => Err(PipelineError::NoInput),
        }
    }

    pub async fn translate(&mut self, target: &LanguageTag) -> PipelineResult<PipelineOutput> {
        let text = self.recognized().await?;
        Ok(self.pipeline.translate_recognized(text, target).await)
    }
}

/// Holds the image most recently handed over by the picker collaborator.
///
/// Translating with nothing picked is the "No Image Uploaded" alert and
/// never reaches the network.
pub struct PhotoWorkspace {
    pipeline: Arc<PhotoPipeline>,
    session: Option<PhotoSession>,
}

impl PhotoWorkspace {
    pub fn new(pipeline: Arc<PhotoPipeline>) -> Self {
        Self {
            pipeline,
            session: None,
        }
    }

    /// A new pick replaces any previous session and starts analysis
    /// immediately.
    pub fn pick_image(&mut self, image: DynamicImage) {
        self.session = Some(PhotoSession::begin(self.pipeline.clone(), image));
    }

    pub async fn translate(&mut self, target: &LanguageTag) -> PipelineResult<PipelineOutput> {
        match self.session.as_mut() {
            None => Err(PipelineError::NoInput),
            Some(session) => session.translate(target).await,
        }
    }
}
