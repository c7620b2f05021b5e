//! eframe host for the mascot widget
//!
//! Each frame converts egui's raw pointer events into [`WidgetEvent`]s, applies
//! the resulting [`WidgetEffect`]s and paints the current view. The central
//! panel has no margin, so panel coordinates are viewport coordinates.

use anyhow::{Result, anyhow};
use eframe::{NativeOptions, egui};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::gui::components::mascot;
use crate::gui::components::palette::PaletteWindowState;
use crate::gui::constants::*;
use crate::palette::{CategoryPalette, PaletteInput, PaletteOutcome};
use crate::persistence::{FileStore, WidgetStore};
use crate::types::{Dimensions, Position};
use crate::widget::{Widget, WidgetEffect, WidgetEvent};

struct StatusMessage {
    text: String,
    color: egui::Color32,
}

pub struct MascotApp {
    widget: Widget,
    store: WidgetStore<FileStore>,
    palette: CategoryPalette,
    palette_window: PaletteWindowState,
    palette_rect: Option<egui::Rect>,
    status_message: Option<StatusMessage>,
}

impl MascotApp {
    pub fn new(config: &Config, store: WidgetStore<FileStore>) -> Self {
        let restored = store.load();
        if restored.is_none() {
            info!("No saved widget state, starting from defaults");
        }

        Self {
            widget: Widget::new(config.widget_settings(), restored),
            store,
            palette: CategoryPalette::new(config.categories.clone()),
            palette_window: PaletteWindowState::new(),
            palette_rect: None,
            status_message: None,
        }
    }

    fn dispatch(&mut self, now: Duration, event: WidgetEvent) {
        for effect in self.widget.handle(now, event) {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: WidgetEffect) {
        match effect {
            WidgetEffect::Persist(record) => {
                if let Err(err) = self.store.save(&record) {
                    error!(error = ?err, "Failed to persist widget state");
                    self.status_message = Some(StatusMessage {
                        text: format!("Could not save state: {err}"),
                        color: STATUS_ERROR,
                    });
                }
            }
            WidgetEffect::ExpressionChanged(expression) => {
                debug!(expression = ?expression, "Expression effect");
            }
            WidgetEffect::ModeChanged(mode) => {
                debug!(mode = ?mode, "Mode effect");
            }
            WidgetEffect::OpenPalette => {
                let view = self.widget.view();
                let anchor = mascot::to_pos2(view.center)
                    + egui::vec2(view.body_radius + PADDING, -view.body_radius);
                self.palette.open();
                self.palette_window.reset(anchor);
                self.palette_rect = None;
            }
        }
    }

    /// Route one raw egui event. Button events belong to the palette while it is open.
    fn route(&mut self, now: Duration, event: &egui::Event) {
        match event {
            egui::Event::PointerMoved(pos) => {
                self.dispatch(now, WidgetEvent::PointerMoved(to_position(*pos)));
            }
            egui::Event::PointerGone => self.dispatch(now, WidgetEvent::PointerLeft),
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed,
                ..
            } => {
                if self.palette.is_open() {
                    let outside = self.palette_rect.is_some_and(|rect| !rect.contains(*pos));
                    if *pressed && outside {
                        self.palette.handle(PaletteInput::ClickOutside);
                    }
                    return;
                }
                let pointer = to_position(*pos);
                let event = if *pressed {
                    WidgetEvent::PointerDown(pointer)
                } else {
                    WidgetEvent::PointerUp(pointer)
                };
                self.dispatch(now, event);
            }
            _ => {}
        }
    }

    fn show_palette(&mut self, ctx: &egui::Context) {
        let (outcome, rect) = self.palette_window.ui(ctx, &mut self.palette);
        self.palette_rect = rect;
        match outcome {
            PaletteOutcome::Chosen(category) => {
                info!(key = %category.key, label = %category.label, "Category selected");
                self.status_message = Some(StatusMessage {
                    text: format!("Selected: {}", category.label),
                    color: STATUS_OK,
                });
            }
            PaletteOutcome::Dismissed => debug!("Category palette dismissed"),
            PaletteOutcome::None => {}
        }
    }

    fn update_cursor(&self, ctx: &egui::Context) {
        if self.widget.state().dragging {
            ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
            return;
        }
        let hovering = ctx
            .input(|i| i.pointer.hover_pos())
            .is_some_and(|pos| self.widget.contains(to_position(pos)));
        if hovering && !self.palette.is_open() {
            ctx.set_cursor_icon(egui::CursorIcon::Grab);
        }
    }
}

impl eframe::App for MascotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Duration::from_secs_f64(ctx.input(|i| i.time));
        let events = ctx.input(|i| i.events.clone());

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(BACKGROUND))
            .show(ctx, |ui| {
                let area = ui.max_rect();
                self.dispatch(now, WidgetEvent::Resized(Dimensions::new(area.width(), area.height())));

                for event in &events {
                    self.route(now, event);
                }
                self.dispatch(now, WidgetEvent::Tick);

                mascot::paint(ui.painter(), &self.widget.view());

                if let Some(message) = &self.status_message {
                    ui.add_space(PADDING);
                    ui.horizontal(|ui| {
                        ui.add_space(PADDING);
                        ui.colored_label(message.color, &message.text);
                    });
                }
            });

        self.show_palette(ctx);
        self.update_cursor(ctx);

        if self.widget.is_animating() || self.widget.state().dragging {
            ctx.request_repaint();
        } else if let Some(due) = self.widget.next_wakeup() {
            ctx.request_repaint_after(due.saturating_sub(now));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        let state = self.widget.state();
        info!(x = state.position.x, y = state.position.y, mode = ?state.mode, "Mascot exiting");
    }
}

fn to_position(pos: egui::Pos2) -> Position {
    Position::new(pos.x, pos.y)
}

pub fn run_gui(config: Config, store: WidgetStore<FileStore>) -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title(APP_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(MascotApp::new(&config, store)))),
    )
    .map_err(|err| anyhow!("Failed to launch mascot window: {err}"))
}
