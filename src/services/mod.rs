pub mod detection;
pub mod ocr;
pub mod speech;
pub mod translation;

// Re-export commonly used services
pub use detection::LanguageDetector;
pub use ocr::{TextRecognizer, VisionClient};
pub use speech::{CaptureState, HttpRecognizer, SpeechCapture, SpeechRecognizer};
pub use translation::{GtxTranslator, TranslationProvider};
