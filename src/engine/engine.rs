use std::sync::mpsc::{Receiver, Sender};

use crate::engine::dispatcher::{PromptDispatcher, SEQUEL_UNAVAILABLE};
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::model::request::GenerationRequest;

/// Background worker. Runs one command at a time, in arrival order,
/// so model calls never overlap.
pub struct Engine {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    dispatcher: PromptDispatcher,
}

impl Engine {
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        dispatcher: PromptDispatcher,
    ) -> Self {
        Self { rx, tx, dispatcher }
    }

    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            match cmd {
                EngineCommand::Submit(request) => self.submit(&request),

                EngineCommand::CheckConnection => {
                    let result = self
                        .dispatcher
                        .check_connection()
                        .map(|n| format!("Connected ({n} models available)"))
                        .map_err(|e| e.to_string());
                    self.send(EngineResponse::ConnectionChecked(result));
                }
            }
        }

        tracing::debug!("engine channel closed, stopping");
    }

    fn submit(&self, request: &GenerationRequest) {
        let story = match self.dispatcher.generate(request) {
            Ok(story) => story,
            Err(err) => {
                self.send(EngineResponse::StoryFailed {
                    message: format!("Error generating story: {err}"),
                });
                self.send(EngineResponse::Finished);
                return;
            }
        };

        self.send(EngineResponse::StoryReady {
            story: story.clone(),
        });

        let options = request.options();

        if options.analysis {
            let analysis = self.dispatcher.analyze(&story);
            self.send(EngineResponse::AnalysisReady(analysis));
        }

        if options.extraction {
            let elements = self.dispatcher.extract_elements(&story);
            self.send(EngineResponse::ElementsReady(elements));
        }

        if options.sequel {
            match self.dispatcher.sequel_hook(&story) {
                Ok(hook) => self.send(EngineResponse::SequelReady(hook)),
                Err(_) => self.send(EngineResponse::SequelFailed {
                    message: SEQUEL_UNAVAILABLE.to_string(),
                }),
            }
        }

        self.send(EngineResponse::Finished);
    }

    fn send(&self, resp: EngineResponse) {
        // The UI may already be gone during shutdown.
        let _ = self.tx.send(resp);
    }
}
