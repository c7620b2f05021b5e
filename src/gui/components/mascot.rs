//! Mascot painter

use eframe::egui;

use crate::gui::constants::*;
use crate::types::{Expression, Mode, Position};
use crate::widget::geometry::MascotView;

pub fn to_pos2(position: Position) -> egui::Pos2 {
    egui::pos2(position.x, position.y)
}

/// Paint the mascot described by `view`
pub fn paint(painter: &egui::Painter, view: &MascotView) {
    let center = to_pos2(view.center);
    let radius = view.body_radius;

    // Softer, wider shadow while dragging reads as a motion trail
    let (shadow_alpha, shadow_spread) = if view.dragging {
        (SHADOW_ALPHA_DRAGGING, 10.0)
    } else {
        (SHADOW_ALPHA, 4.0)
    };
    painter.circle_filled(
        center + egui::vec2(0.0, 6.0),
        radius + shadow_spread,
        egui::Color32::from_black_alpha(shadow_alpha),
    );

    painter.circle(
        center,
        radius,
        BODY_FILL,
        egui::Stroke::new(crate::constants::mascot::BORDER_WIDTH, BODY_BORDER),
    );

    for eye in view.eye_centers() {
        paint_eye(painter, to_pos2(eye), view);
    }

    if view.expression == Expression::Angry && !view.blinking {
        paint_brows(painter, view);
    }

    let toggle_fill = match view.mode {
        Mode::Normal => TOGGLE_NORMAL,
        Mode::Mini => TOGGLE_MINI,
    };
    painter.circle(
        to_pos2(view.toggle_center),
        view.toggle_radius,
        toggle_fill,
        egui::Stroke::new(1.5, BODY_BORDER),
    );
}

fn paint_eye(painter: &egui::Painter, center: egui::Pos2, view: &MascotView) {
    let r = view.eye_radius;
    if view.blinking {
        painter.line_segment(
            [center - egui::vec2(r, 0.0), center + egui::vec2(r, 0.0)],
            egui::Stroke::new((r * 0.35).max(1.5), EYE),
        );
        return;
    }

    match view.expression {
        Expression::Normal | Expression::Angry => {
            painter.circle_filled(center, r, EYE);
        }
        Expression::Surprised => {
            painter.circle_filled(center, r * 1.1, EYE);
            painter.circle_filled(center + egui::vec2(-r * 0.35, -r * 0.35), r * 0.3, egui::Color32::WHITE);
        }
        Expression::Sleepy => {
            let lid = egui::Rect::from_center_size(center + egui::vec2(0.0, r * 0.3), egui::vec2(r * 2.0, r * 0.7));
            painter.rect_filled(lid, r * 0.35, EYE);
        }
    }
}

fn paint_brows(painter: &egui::Painter, view: &MascotView) {
    let r = view.eye_radius;
    let stroke = egui::Stroke::new((r * 0.3).max(1.5), EYE);
    let [left, right] = view.eye_centers().map(to_pos2);
    let lift = r * 1.3;
    // Both brows slope down toward the middle
    painter.line_segment(
        [left + egui::vec2(-r, -lift - r * 0.4), left + egui::vec2(r, -lift + r * 0.2)],
        stroke,
    );
    painter.line_segment(
        [right + egui::vec2(-r, -lift + r * 0.2), right + egui::vec2(r, -lift - r * 0.4)],
        stroke,
    );
}
