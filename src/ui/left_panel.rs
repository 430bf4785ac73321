use std::sync::mpsc::Sender;

use crate::engine::protocol::EngineCommand;
use crate::model::safety::SafetyTier;
use crate::model::story::{Genre, Mood};
use crate::ui::app::UiState;

pub fn draw_left_panel(ctx: &egui::Context, ui_state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    egui::SidePanel::left("configuration")
        .resizable(false)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Configuration");
            ui.separator();

            let previous_genre = ui_state.settings.genre;
            draw_story_choices(ui, ui_state);
            if ui_state.settings.genre != previous_genre {
                ui_state.genre_changed(previous_genre);
            }

            ui.separator();
            draw_connection(ui, ui_state, cmd_tx);

            ui.separator();
            ui.label("UI Scale");
            ui.add(egui::Slider::new(&mut ui_state.settings.ui_scale, 0.75..=2.0));
        });
}

fn draw_story_choices(ui: &mut egui::Ui, ui_state: &mut UiState) {
    let s = &mut ui_state.settings;

    egui::ComboBox::from_label("Genre")
        .selected_text(s.genre.label())
        .show_ui(ui, |ui| {
            for genre in Genre::ALL {
                ui.selectable_value(&mut s.genre, genre, genre.label());
            }
        });

    egui::ComboBox::from_label("Mood")
        .selected_text(s.mood.label())
        .show_ui(ui, |ui| {
            for mood in Mood::ALL {
                ui.selectable_value(&mut s.mood, mood, mood.label());
            }
        });

    egui::ComboBox::from_label("Content Safety Level")
        .selected_text(s.safety.label())
        .show_ui(ui, |ui| {
            for tier in SafetyTier::ALL {
                ui.selectable_value(&mut s.safety, tier, tier.label());
            }
        });

    ui.add_space(4.0);
    ui.add(
        egui::Slider::new(&mut s.temperature, 0.0..=1.0)
            .step_by(0.1)
            .text("Creativity"),
    )
    .on_hover_text("Lower: more predictable, Higher: more creative");
}

fn draw_connection(ui: &mut egui::Ui, ui_state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    ui.label(format!("Model: {}", ui_state.model_name));

    ui.horizontal(|ui| {
        let button = egui::Button::new("Check connection");
        if ui.add_enabled(!ui_state.checking_connection, button).clicked()
            && cmd_tx.send(EngineCommand::CheckConnection).is_ok()
        {
            ui_state.checking_connection = true;
            ui_state.connection_status = None;
        }

        if ui_state.checking_connection {
            ui.spinner();
        }
    });

    match &ui_state.connection_status {
        Some(Ok(text)) => {
            ui.colored_label(egui::Color32::from_rgb(60, 160, 90), text);
        }
        Some(Err(err)) => {
            ui.colored_label(egui::Color32::from_rgb(200, 60, 60), err);
        }
        None => {}
    }
}
