// Core types shared across the capture-and-translate workflow

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Short language code ("en", "es", "zh").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageTag {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

/// Outcome of language identification.
///
/// `Undetermined` is a valid result, not a failure: it tells the pipeline
/// to skip translation and surface the recognized text verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectedLanguage {
    Tag(LanguageTag),
    Undetermined,
}

/// One translation call.
///
/// Built only once the source language is known, not undetermined, and
/// different from the target; otherwise the pipeline short-circuits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source: LanguageTag,
    pub target: LanguageTag,
}

/// Final text handed to the display collaborator.
///
/// `translated == false` covers every fall-back: empty recognition,
/// undetermined language, source == target, and translation failure. The
/// text is then the original input, so the user always sees something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub text: String,
    pub translated: bool,
}

impl PipelineOutput {
    pub fn original(text: String) -> Self {
        Self {
            text,
            translated: false,
        }
    }

    pub fn translated(text: String) -> Self {
        Self {
            text,
            translated: true,
        }
    }
}

/// Source/target language pair provider, decoupled from any UI toolkit.
pub trait LanguageSelection: Send + Sync {
    /// Returns (source, target) as currently selected by the user.
    fn selected_languages(&self) -> (LanguageTag, LanguageTag);
}

/// Picker-backed language pair: the two wheels of the original UI, as
/// explicit state with setters instead of ambient mutable fields.
pub struct PickedLanguages {
    source: RwLock<LanguageTag>,
    target: RwLock<LanguageTag>,
}

impl PickedLanguages {
    pub fn new(source: LanguageTag, target: LanguageTag) -> Self {
        Self {
            source: RwLock::new(source),
            target: RwLock::new(target),
        }
    }

    pub fn set_source(&self, tag: LanguageTag) {
        *self.source.write() = tag;
    }

    pub fn set_target(&self, tag: LanguageTag) {
        *self.target.write() = tag;
    }
}

impl LanguageSelection for PickedLanguages {
    fn selected_languages(&self) -> (LanguageTag, LanguageTag) {
        (self.source.read().clone(), self.target.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picked_languages_reflect_latest_selection() {
        let picked = PickedLanguages::new("en".into(), "en".into());
        picked.set_target("es".into());

        let (source, target) = picked.selected_languages();
        assert_eq!(source, LanguageTag::new("en"));
        assert_eq!(target, LanguageTag::new("es"));
    }

    #[test]
    fn language_tags_compare_by_code() {
        assert_eq!(LanguageTag::new("en"), LanguageTag::from("en"));
        assert_ne!(LanguageTag::new("en"), LanguageTag::new("es"));
    }
}
