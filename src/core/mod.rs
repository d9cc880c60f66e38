pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items for convenience
pub use config::Config;
pub use errors::{
    ConfigError, EncodeError, OcrError, PipelineError, SpeechError, TranslateError,
};
pub use types::{
    DetectedLanguage, LanguageSelection, LanguageTag, PickedLanguages, PipelineOutput,
    TranslationRequest,
};
