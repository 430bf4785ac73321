use crate::model::request::GenerationRequest;

pub enum EngineCommand {
    Submit(GenerationRequest),
    CheckConnection,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineResponse {
    StoryReady { story: String },
    StoryFailed { message: String },

    AnalysisReady(String),
    ElementsReady(String),
    SequelReady(String),
    SequelFailed { message: String },

    /// The submission is done; no more responses follow for it.
    Finished,

    ConnectionChecked(Result<String, String>),
}
