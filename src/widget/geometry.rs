//! Mascot layout and hit testing
//!
//! Positions are top-left corners; everything else is derived from them and
//! the current mode.

use crate::constants::mascot;
use crate::types::{Expression, Mode, Position};

/// Center of a mascot whose top-left corner is at `origin`
pub fn body_center(origin: Position, mode: Mode) -> Position {
    let half = mode.body_size() / 2.0;
    origin + Position::new(half, half)
}

/// Center of the mode toggle knob, sitting on the upper-right rim
pub fn toggle_center(origin: Position, mode: Mode) -> Position {
    let radius = mode.body_size() / 2.0;
    let rim = radius * std::f32::consts::FRAC_1_SQRT_2;
    body_center(origin, mode) + Position::new(rim, -rim)
}

pub fn hits_body(origin: Position, mode: Mode, pointer: Position) -> bool {
    body_center(origin, mode).distance(pointer) <= mode.body_size() / 2.0
}

pub fn hits_toggle(origin: Position, mode: Mode, pointer: Position) -> bool {
    toggle_center(origin, mode).distance(pointer) <= mascot::TOGGLE_RADIUS
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MascotView {
    pub center: Position,
    pub body_radius: f32,
    pub eye_radius: f32,
    pub toggle_center: Position,
    pub toggle_radius: f32,
    pub mode: Mode,
    pub expression: Expression,
    pub blinking: bool,
    pub dragging: bool,
}

impl MascotView {
    pub fn new(origin: Position, mode: Mode, expression: Expression, blinking: bool, dragging: bool) -> Self {
        let scale = expression.body_scale();
        Self {
            center: body_center(origin, mode),
            body_radius: mode.body_size() / 2.0 * scale,
            eye_radius: mode.eye_size() / 2.0,
            toggle_center: toggle_center(origin, mode),
            toggle_radius: mascot::TOGGLE_RADIUS,
            mode,
            expression,
            blinking,
            dragging,
        }
    }

    /// Eye centers (left, right) relative to the body
    pub fn eye_centers(&self) -> [Position; 2] {
        let spread = self.body_radius * 0.38;
        let lift = self.body_radius * 0.08;
        [
            self.center + Position::new(-spread, -lift),
            self.center + Position::new(spread, -lift),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_hit_is_circular() {
        let origin = Position::new(100.0, 100.0);
        assert!(hits_body(origin, Mode::Normal, Position::new(130.0, 130.0)));
        assert!(hits_body(origin, Mode::Normal, Position::new(159.0, 130.0)));
        // Bounding-box corner is outside the circle
        assert!(!hits_body(origin, Mode::Normal, Position::new(101.0, 101.0)));
    }

    #[test]
    fn test_mini_mode_shrinks_hit_area() {
        let origin = Position::new(0.0, 0.0);
        let pointer = Position::new(45.0, 30.0);
        assert!(hits_body(origin, Mode::Normal, pointer));
        assert!(!hits_body(origin, Mode::Mini, pointer));
    }

    #[test]
    fn test_toggle_sits_on_upper_right_rim() {
        let origin = Position::new(0.0, 0.0);
        let knob = toggle_center(origin, Mode::Normal);
        assert!(knob.x > 30.0);
        assert!(knob.y < 30.0);
        assert!(hits_toggle(origin, Mode::Normal, knob));
        assert!(!hits_toggle(origin, Mode::Normal, Position::new(30.0, 30.0)));
    }

    #[test]
    fn test_view_scales_eyes_with_mode() {
        let normal = MascotView::new(Position::ZERO, Mode::Normal, Expression::Normal, false, false);
        let mini = MascotView::new(Position::ZERO, Mode::Mini, Expression::Normal, false, false);
        assert_eq!(normal.eye_radius, 12.5);
        assert_eq!(mini.eye_radius, 6.0);
        assert!(mini.body_radius < normal.body_radius);
    }

    #[test]
    fn test_expression_scales_body_but_not_eyes() {
        let surprised = MascotView::new(Position::ZERO, Mode::Normal, Expression::Surprised, false, false);
        let sleepy = MascotView::new(Position::ZERO, Mode::Normal, Expression::Sleepy, false, false);
        assert_eq!(surprised.body_radius, 36.0);
        assert_eq!(sleepy.body_radius, 24.0);
        assert_eq!(surprised.eye_radius, 12.5);
        assert_eq!(sleepy.eye_radius, 12.5);
    }
}
