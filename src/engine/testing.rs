use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::engine::llm_client::{GenerationConfig, TextGenerator};
use crate::error::GenerationError;
use crate::model::safety::SafetySetting;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub config: Option<GenerationConfig>,
    pub safety: Vec<SafetySetting>,
}

/// Replays canned replies in order and records every call it receives.
/// `Err(msg)` entries become a 500 status error.
#[derive(Clone, Default)]
pub struct ScriptedGenerator {
    replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Result<&str, &str>>) -> Self {
        let replies = replies
            .into_iter()
            .map(|r| r.map(str::to_string).map_err(str::to_string))
            .collect();

        Self {
            replies: Arc::new(Mutex::new(replies)),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate(
        &self,
        prompt: &str,
        config: Option<&GenerationConfig>,
        safety: &[SafetySetting],
    ) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            config: config.copied(),
            safety: safety.to_vec(),
        });

        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(GenerationError::Status { status: 500, message }),
            None => Err(GenerationError::EmptyResponse),
        }
    }

    fn list_models(&self) -> Result<usize, GenerationError> {
        Ok(1)
    }
}
