pub mod gtx;

pub use gtx::GtxTranslator;

use async_trait::async_trait;

use crate::core::errors::TranslateResult;
use crate::core::types::TranslationRequest;

/// Pluggable translation vendor seam.
///
/// The pipeline never inspects vendor transport details; it only sees
/// translated text or an error it can fall back from.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> TranslateResult<String>;
}
