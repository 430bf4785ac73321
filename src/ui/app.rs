use std::sync::mpsc;
use std::time::Duration;

use crate::engine::dispatcher::PromptDispatcher;
use crate::engine::engine::Engine;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::model::request::{parse_keywords, GenerationRequest};
use crate::model::story::{FormDefaults, Genre, Mood};
use crate::ui::center_panel::draw_center_panel;
use crate::ui::left_panel::draw_left_panel;
use crate::ui::settings::UiSettings;
use crate::ui::settings_io::{load_settings, save_settings};

/* =========================
   Story Run
   ========================= */

/// Everything produced for one submission. Genre and mood are captured at
/// submit time so later sidebar edits don't rename the result.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryRun {
    pub genre: Genre,
    pub mood: Mood,
    pub story: Option<String>,
    pub error: Option<String>,
    pub analysis: Option<String>,
    pub elements: Option<String>,
    pub sequel: Option<String>,
    pub sequel_warning: Option<String>,
}

impl StoryRun {
    pub fn new(genre: Genre, mood: Mood) -> Self {
        Self {
            genre,
            mood,
            story: None,
            error: None,
            analysis: None,
            elements: None,
            sequel: None,
            sequel_warning: None,
        }
    }
}

/* =========================
   UI State
   ========================= */

#[derive(Default)]
pub struct UiState {
    pub settings: UiSettings,

    pub keywords: String,
    pub prompt: String,

    /// A submission is in flight; the submit button is disabled.
    pub pending: bool,
    pub run: Option<StoryRun>,

    pub form_warning: Option<String>,
    pub download_status: Option<Result<String, String>>,

    pub checking_connection: bool,
    pub connection_status: Option<Result<String, String>>,

    pub model_name: String,
}

impl UiState {
    pub fn new(settings: UiSettings, model_name: String) -> Self {
        let defaults = FormDefaults::for_genre(settings.genre);

        Self {
            keywords: defaults.keywords.to_string(),
            prompt: defaults.prompt.to_string(),
            settings,
            model_name,
            ..Default::default()
        }
    }

    /// Swap the seeded form text when the genre changes, unless the user
    /// already typed their own.
    pub fn genre_changed(&mut self, previous: Genre) {
        let old = FormDefaults::for_genre(previous);
        let new = FormDefaults::for_genre(self.settings.genre);

        if self.keywords == old.keywords {
            self.keywords = new.keywords.to_string();
        }
        if self.prompt == old.prompt {
            self.prompt = new.prompt.to_string();
        }
    }

    pub fn begin_run(&mut self) {
        self.pending = true;
        self.form_warning = None;
        self.download_status = None;
        self.run = Some(StoryRun::new(self.settings.genre, self.settings.mood));
    }

    /// Validate the form and open a new run. A rejected form leaves the
    /// previous run on screen and only sets `form_warning`.
    pub fn take_submission(&mut self) -> Option<EngineCommand> {
        let s = &self.settings;
        let request = GenerationRequest::new(
            self.prompt.clone(),
            parse_keywords(&self.keywords),
            s.mood,
            s.genre,
            s.temperature,
            s.safety,
            s.options,
        );

        match request {
            Ok(request) => {
                self.begin_run();
                Some(EngineCommand::Submit(request))
            }
            Err(err) => {
                tracing::debug!(%err, "submission rejected");
                self.form_warning = Some(err.to_string());
                None
            }
        }
    }

    pub fn apply_response(&mut self, resp: EngineResponse) {
        if let EngineResponse::ConnectionChecked(result) = resp {
            self.checking_connection = false;
            self.connection_status = Some(result);
            return;
        }

        if let EngineResponse::Finished = resp {
            self.pending = false;
            return;
        }

        let Some(run) = self.run.as_mut() else {
            return;
        };

        match resp {
            EngineResponse::StoryReady { story } => run.story = Some(story),
            EngineResponse::StoryFailed { message } => run.error = Some(message),
            EngineResponse::AnalysisReady(text) => run.analysis = Some(text),
            EngineResponse::ElementsReady(text) => run.elements = Some(text),
            EngineResponse::SequelReady(text) => run.sequel = Some(text),
            EngineResponse::SequelFailed { message } => run.sequel_warning = Some(message),
            EngineResponse::Finished | EngineResponse::ConnectionChecked(_) => {}
        }
    }
}

/* =========================
   App
   ========================= */

pub struct StoryCrafterApp {
    pub ui: UiState,
    saved_settings: UiSettings,

    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
}

impl StoryCrafterApp {
    pub fn new(dispatcher: PromptDispatcher, model_name: String) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        std::thread::spawn(move || {
            let mut engine = Engine::new(cmd_rx, resp_tx, dispatcher);
            engine.run();
        });

        let settings = load_settings();

        Self {
            ui: UiState::new(settings.clone(), model_name),
            saved_settings: settings,
            cmd_tx,
            resp_rx,
        }
    }

    fn persist_settings_if_changed(&mut self, pointer_down: bool) {
        if should_persist(&self.ui.settings, &self.saved_settings, pointer_down) {
            save_settings(&self.ui.settings);
            self.saved_settings = self.ui.settings.clone();
        }
    }
}

impl eframe::App for StoryCrafterApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.ui.settings.ui_scale);

        while let Ok(resp) = self.resp_rx.try_recv() {
            self.ui.apply_response(resp);
        }

        draw_left_panel(ctx, &mut self.ui, &self.cmd_tx);
        draw_center_panel(ctx, &mut self.ui, &self.cmd_tx);

        if self.ui.pending || self.ui.checking_connection {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        let pointer_down = ctx.input(|i| i.pointer.any_down());
        self.persist_settings_if_changed(pointer_down);
    }
}

/// Wait for the pointer to come up so a slider drag is written once.
fn should_persist(current: &UiSettings, saved: &UiSettings, pointer_down: bool) -> bool {
    !pointer_down && current != saved
}

/* =========================
   Startup failure
   ========================= */

/// Shown instead of the app when configuration fails. Nothing else runs.
pub struct StartupErrorApp {
    message: String,
}

impl StartupErrorApp {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

impl eframe::App for StartupErrorApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("StoryCrafter");
            ui.separator();
            ui.colored_label(egui::Color32::from_rgb(200, 60, 60), &self.message);
        });
    }
}
