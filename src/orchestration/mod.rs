pub mod photo;
pub mod speech;

pub use photo::{PhotoPipeline, PhotoSession, PhotoWorkspace};
pub use speech::DictationSession;

use tracing::warn;

use crate::core::types::{PipelineOutput, TranslationRequest};
use crate::services::translation::TranslationProvider;

/// One translation attempt with the fail-open fallback shared by both
/// capture flows: on any provider error the original text is displayed
/// and the cause only logged.
pub(crate) async fn translate_or_original(
    translator: &dyn TranslationProvider,
    request: TranslationRequest,
) -> PipelineOutput {
    match translator.translate(&request).await {
        Ok(translated) => PipelineOutput::translated(translated),
        Err(err) => {
            warn!(%err, "translation failed; showing original text");
            PipelineOutput::original(request.text)
        }
    }
}
