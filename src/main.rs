mod config;
mod engine;
mod error;
mod model;
mod ui;

use tracing_subscriber::EnvFilter;

use crate::config::GeminiConfig;
use crate::engine::dispatcher::PromptDispatcher;
use crate::engine::llm_client::GeminiClient;
use crate::model::safety::SafetyPolicy;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("StoryCrafter")
            .with_inner_size([1100.0, 760.0]),
        ..Default::default()
    };

    let config = match GeminiConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "startup failed");
            return eframe::run_native(
                "StoryCrafter",
                options,
                Box::new(move |_cc| Ok(Box::new(ui::app::StartupErrorApp::new(err.to_string())))),
            );
        }
    };

    let client = GeminiClient::new(config);
    let model_name = client.model().to_string();
    tracing::info!(model = %model_name, "starting StoryCrafter");

    let dispatcher = PromptDispatcher::new(Box::new(client), SafetyPolicy::default());

    eframe::run_native(
        "StoryCrafter",
        options,
        Box::new(move |_cc| Ok(Box::new(ui::app::StoryCrafterApp::new(dispatcher, model_name)))),
    )
}
