//! GUI-specific constants for layout and colors

use egui;

pub const APP_TITLE: &str = "M.I.S.O.";

/// Host window dimensions
pub const WINDOW_WIDTH: f32 = 900.0;
pub const WINDOW_HEIGHT: f32 = 640.0;
pub const WINDOW_MIN_WIDTH: f32 = 320.0;
pub const WINDOW_MIN_HEIGHT: f32 = 240.0;

/// Layout spacing
pub const PADDING: f32 = 12.0;
pub const ITEM_SPACING: f32 = 8.0;
pub const PALETTE_WIDTH: f32 = 220.0;

/// Mascot colors
pub const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(246, 246, 248);
pub const BODY_FILL: egui::Color32 = egui::Color32::WHITE;
pub const BODY_BORDER: egui::Color32 = egui::Color32::from_rgb(0xdd, 0xdd, 0xdd);
pub const EYE: egui::Color32 = egui::Color32::BLACK;
pub const TOGGLE_NORMAL: egui::Color32 = egui::Color32::from_rgb(0x9a, 0xc8, 0xf0);
pub const TOGGLE_MINI: egui::Color32 = egui::Color32::from_rgb(0xf0, 0xb4, 0x6a);

/// Shadow alpha at rest and while dragging (motion trail)
pub const SHADOW_ALPHA: u8 = 50;
pub const SHADOW_ALPHA_DRAGGING: u8 = 30;

/// Status colors
pub const STATUS_OK: egui::Color32 = egui::Color32::from_rgb(0, 150, 0);
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);
