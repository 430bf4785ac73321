use crate::engine::llm_client::{GenerationConfig, TextGenerator};
use crate::engine::prompt_builder::PromptBuilder;
use crate::error::GenerationError;
use crate::model::request::GenerationRequest;
use crate::model::safety::SafetyPolicy;

pub const ANALYSIS_UNAVAILABLE: &str = "Analysis unavailable";
pub const EXTRACTION_FAILED: &str = "Extraction failed";
pub const SEQUEL_UNAVAILABLE: &str = "Could not generate sequel hook";

/// Turns story requests into model calls.
///
/// Owns the model client and the safety table for the lifetime of the
/// process. Every operation is a single blocking exchange with no retry.
pub struct PromptDispatcher {
    generator: Box<dyn TextGenerator>,
    policy: SafetyPolicy,
}

impl PromptDispatcher {
    pub fn new(generator: Box<dyn TextGenerator>, policy: SafetyPolicy) -> Self {
        Self { generator, policy }
    }

    /// The story itself. Sends fixed sampling parameters and the tier's
    /// safety thresholds; failures propagate.
    pub fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let prompt = PromptBuilder::story(request);
        let config = GenerationConfig::story(request.temperature());
        let safety = self.policy.settings_for(request.safety());

        tracing::info!(
            genre = %request.genre(),
            mood = %request.mood(),
            safety = %request.safety(),
            temperature = request.temperature(),
            keywords = request.keywords().len(),
            "generating story"
        );

        self.generator
            .generate(&prompt, Some(&config), safety)
            .inspect_err(|err| tracing::error!(%err, "story generation failed"))
    }

    /// Thematic analysis. Failure collapses to a placeholder.
    pub fn analyze(&self, story: &str) -> String {
        self.generator
            .generate(&PromptBuilder::analysis(story), None, &[])
            .unwrap_or_else(|err| {
                tracing::warn!(%err, "story analysis failed");
                ANALYSIS_UNAVAILABLE.to_string()
            })
    }

    /// Element extraction. The model is asked for JSON but the reply is
    /// passed through untouched. Failure collapses to a placeholder.
    pub fn extract_elements(&self, story: &str) -> String {
        self.generator
            .generate(&PromptBuilder::extraction(story), None, &[])
            .unwrap_or_else(|err| {
                tracing::warn!(%err, "element extraction failed");
                EXTRACTION_FAILED.to_string()
            })
    }

    pub fn sequel_hook(&self, story: &str) -> Result<String, GenerationError> {
        self.generator
            .generate(&PromptBuilder::sequel_hook(story), None, &[])
            .inspect_err(|err| tracing::warn!(%err, "sequel hook failed"))
    }

    pub fn check_connection(&self) -> Result<usize, GenerationError> {
        self.generator.list_models()
    }
}
