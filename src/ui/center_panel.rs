use egui::Color32;
use std::sync::mpsc::Sender;

use crate::engine::protocol::EngineCommand;
use crate::model::story::story_heading;
use crate::model::story_elements::{decode_story_elements, StoryElements};
use crate::ui::app::{StoryRun, UiState};
use crate::ui::export::download_story;

const SUCCESS: Color32 = Color32::from_rgb(60, 160, 90);
const WARNING: Color32 = Color32::from_rgb(220, 160, 40);
const ERROR: Color32 = Color32::from_rgb(200, 60, 60);

pub fn draw_center_panel(ctx: &egui::Context, ui_state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("StoryCrafter");
            ui.label(format!("Powered by {}", ui_state.model_name));
            ui.separator();

            draw_story_form(ui, ui_state, cmd_tx);

            if let Some(run) = ui_state.run.as_ref() {
                let mut status = None;
                draw_run(ui, run, ui_state.pending, &mut status);
                if status.is_some() {
                    ui_state.download_status = status;
                }
            }

            match &ui_state.download_status {
                Some(Ok(text)) => {
                    ui.colored_label(SUCCESS, text);
                }
                Some(Err(err)) => {
                    ui.colored_label(ERROR, err);
                }
                None => {}
            }
        });
    });
}

/* =========================
   Form
   ========================= */

fn draw_story_form(ui: &mut egui::Ui, ui_state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    let mut submit = false;

    ui.columns(2, |cols| {
        cols[0].label("Keywords (comma separated)");
        cols[0].text_edit_singleline(&mut ui_state.keywords);

        cols[0].label("Story Prompt");
        cols[0].add(
            egui::TextEdit::multiline(&mut ui_state.prompt)
                .desired_rows(6)
                .desired_width(f32::INFINITY),
        );

        cols[1].strong("Advanced Options");
        let options = &mut ui_state.settings.options;
        cols[1].checkbox(&mut options.analysis, "Include story analysis");
        cols[1].checkbox(&mut options.extraction, "Extract story elements");
        cols[1].checkbox(&mut options.sequel, "Generate sequel hook");
    });

    ui.horizontal(|ui| {
        let button = egui::Button::new("Craft My Story");
        submit = ui.add_enabled(!ui_state.pending, button).clicked();

        if ui_state.pending {
            ui.spinner();
            ui.label("Weaving your story...");
        }
    });

    if submit {
        submit_story(ui_state, cmd_tx);
    }

    if let Some(warning) = &ui_state.form_warning {
        ui.colored_label(WARNING, warning);
    }
}

fn submit_story(ui_state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    let Some(cmd) = ui_state.take_submission() else {
        return;
    };

    if cmd_tx.send(cmd).is_err() {
        tracing::error!("engine thread is gone");
        ui_state.pending = false;
        ui_state.form_warning = Some("The story engine stopped unexpectedly".into());
    }
}

/* =========================
   Output
   ========================= */

fn draw_run(
    ui: &mut egui::Ui,
    run: &StoryRun,
    pending: bool,
    download_status: &mut Option<Result<String, String>>,
) {
    ui.add_space(8.0);

    if let Some(error) = &run.error {
        ui.colored_label(ERROR, error);
        return;
    }

    let Some(story) = &run.story else {
        return;
    };

    ui.colored_label(SUCCESS, "Your Story is Ready!");
    ui.separator();

    ui.heading(story_heading(run.genre, run.mood));
    egui::CollapsingHeader::new("Read Your Story")
        .default_open(true)
        .show(ui, |ui| {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.label(story);
            });
        });

    if let Some(analysis) = &run.analysis {
        ui.separator();
        ui.heading("Story Analysis");
        ui.label(analysis);
    }

    if let Some(elements) = &run.elements {
        ui.separator();
        ui.heading("Key Story Elements");
        draw_elements(ui, elements);
    }

    if run.sequel.is_some() || run.sequel_warning.is_some() {
        ui.separator();
        ui.heading("Sequel Hook");
        if let Some(sequel) = &run.sequel {
            ui.label(sequel);
        }
        if let Some(warning) = &run.sequel_warning {
            ui.colored_label(WARNING, warning);
        }
    }

    if pending {
        return;
    }

    ui.separator();
    if ui.button("Download Story").clicked() {
        *download_status = match download_story(run.genre, run.mood, story) {
            Ok(Some(path)) => Some(Ok(format!("Saved to {}", path.display()))),
            Ok(None) => None,
            Err(err) => Some(Err(format!("{err:#}"))),
        };
    }
}

fn draw_elements(ui: &mut egui::Ui, raw: &str) {
    let Some(elements) = decode_story_elements(raw) else {
        ui.label(raw);
        return;
    };

    draw_element_grid(ui, &elements);

    ui.collapsing("Raw output", |ui| {
        ui.monospace(raw);
    });
}

fn draw_element_grid(ui: &mut egui::Ui, e: &StoryElements) {
    egui::Grid::new("story_elements")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            list_row(ui, "Characters", &e.characters);
            list_row(ui, "Locations", &e.locations);
            ui.strong("Conflict");
            ui.label(&e.conflict);
            ui.end_row();
            ui.strong("Resolution");
            ui.label(&e.resolution);
            ui.end_row();
            list_row(ui, "Symbols", &e.symbols);
        });
}

fn list_row(ui: &mut egui::Ui, label: &str, items: &[String]) {
    ui.strong(label);
    if items.is_empty() {
        ui.label("None");
    } else {
        ui.vertical(|ui| {
            for i in items {
                ui.label(format!("• {i}"));
            }
        });
    }
    ui.end_row();
}
