// Library exports for the capture-and-translate workflow

// Core modules
pub mod core;
pub mod orchestration;
pub mod services;
pub mod utils;

// Re-export commonly used types and functions
pub use crate::core::{
    config::Config,
    errors::{ConfigError, EncodeError, OcrError, PipelineError, SpeechError, TranslateError},
    types::{
        DetectedLanguage, LanguageSelection, LanguageTag, PickedLanguages, PipelineOutput,
        TranslationRequest,
    },
};

pub use orchestration::{DictationSession, PhotoPipeline, PhotoSession, PhotoWorkspace};

pub use services::{
    CaptureState, GtxTranslator, HttpRecognizer, LanguageDetector, SpeechCapture,
    SpeechRecognizer, TextRecognizer, TranslationProvider, VisionClient,
};

pub use utils::jpeg_base64_payload;
