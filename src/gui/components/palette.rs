use eframe::egui;

use crate::gui::constants::*;
use crate::palette::{CategoryPalette, PaletteInput, PaletteOutcome};

/// Window state for the category palette
pub struct PaletteWindowState {
    query: String,
    anchor: egui::Pos2,
    focus_pending: bool,
}

impl PaletteWindowState {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            anchor: egui::Pos2::ZERO,
            focus_pending: false,
        }
    }

    /// Prepare for a freshly opened palette shown at `anchor`
    pub fn reset(&mut self, anchor: egui::Pos2) {
        self.query.clear();
        self.anchor = anchor;
        self.focus_pending = true;
    }

    /// Render the palette if it is open. Returns the first non-trivial
    /// outcome of this frame and the window rect for outside-click checks.
    pub fn ui(
        &mut self,
        ctx: &egui::Context,
        palette: &mut CategoryPalette,
    ) -> (PaletteOutcome, Option<egui::Rect>) {
        if !palette.is_open() {
            return (PaletteOutcome::None, None);
        }

        let mut inputs = Vec::new();
        let highlighted = palette.highlighted();
        let labels: Vec<String> = palette
            .visible()
            .iter()
            .map(|category| category.label.clone())
            .collect();

        let response = egui::Window::new("Categories")
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .fixed_pos(self.anchor)
            .default_width(PALETTE_WIDTH)
            .show(ctx, |ui| {
                ui.spacing_mut().item_spacing.y = ITEM_SPACING / 2.0;

                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Go to").strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("Close").clicked() {
                            inputs.push(PaletteInput::Close);
                        }
                    });
                });

                let search = ui.add(
                    egui::TextEdit::singleline(&mut self.query)
                        .hint_text("Search...")
                        .desired_width(f32::INFINITY),
                );
                if self.focus_pending {
                    search.request_focus();
                    self.focus_pending = false;
                }
                if search.changed() {
                    inputs.push(PaletteInput::Query(self.query.clone()));
                }

                ui.separator();

                if labels.is_empty() {
                    ui.weak("No matches");
                }
                for (index, label) in labels.iter().enumerate() {
                    let row = ui.selectable_label(highlighted == Some(index), label.as_str());
                    if row.hovered() && highlighted != Some(index) {
                        inputs.push(PaletteInput::Highlight(index));
                    }
                    if row.clicked() {
                        inputs.push(PaletteInput::Select(index));
                    }
                }
            });

        let (enter, escape) = ctx.input(|i| (i.key_pressed(egui::Key::Enter), i.key_pressed(egui::Key::Escape)));
        if escape {
            inputs.push(PaletteInput::Close);
        } else if enter {
            inputs.push(PaletteInput::Activate);
        }

        let mut outcome = PaletteOutcome::None;
        for input in inputs {
            let result = palette.handle(input);
            if outcome == PaletteOutcome::None {
                outcome = result;
            }
        }

        (outcome, response.map(|inner| inner.response.rect))
    }
}

impl Default for PaletteWindowState {
    fn default() -> Self {
        Self::new()
    }
}
