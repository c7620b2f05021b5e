//! Position controller: drag, proximity avoidance and patrol motion
//!
//! The base position is what gets persisted. Avoidance never touches it;
//! it only produces a transient visual offset that the renderer layers on
//! top. Patrol does move the base position, but only while not dragging.

use rand::Rng;

use crate::constants::patrol;
use crate::types::{Dimensions, Position};

#[derive(Debug, Clone, Copy)]
struct DragState {
    /// Pointer position relative to the widget origin at press time
    grab_offset: Position,
}

#[derive(Debug, Clone)]
pub struct PositionController {
    position: Position,
    drag: Option<DragState>,
    visual_offset: Position,
    patrol_target: Option<Position>,
    avoid_radius: f32,
    avoid_max_offset: f32,
    smoothing: f32,
}

/// Repulsion offset for a pointer near `center`
///
/// Zero when the pointer is outside `radius`, and zero when it sits exactly
/// on the center (no direction to push in).
pub fn avoidance_offset(center: Position, pointer: Position, radius: f32, max_offset: f32) -> Position {
    let away = center - pointer;
    let distance = away.length();
    if distance >= radius || distance == 0.0 {
        return Position::ZERO;
    }
    let strength = (1.0 - distance / radius) * max_offset;
    away * (strength / distance)
}

impl PositionController {
    pub fn new(position: Position, avoid_radius: f32, avoid_max_offset: f32, smoothing: f32) -> Self {
        Self {
            position,
            drag: None,
            visual_offset: Position::ZERO,
            patrol_target: None,
            avoid_radius,
            avoid_max_offset,
            smoothing,
        }
    }

    /// Base (persisted) position
    pub fn position(&self) -> Position {
        self.position
    }

    #[cfg(test)]
    /// Transient avoidance offset
    pub fn visual_offset(&self) -> Position {
        self.visual_offset
    }

    /// Where the widget is drawn: base position plus avoidance offset
    pub fn rendered_position(&self) -> Position {
        self.position + self.visual_offset
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn patrol_target(&self) -> Option<Position> {
        self.patrol_target
    }

    pub fn begin_drag(&mut self, pointer: Position) {
        self.drag = Some(DragState {
            grab_offset: pointer - self.position,
        });
        // Grabbing the widget snaps it back under the pointer and stops wandering
        self.visual_offset = Position::ZERO;
        self.patrol_target = None;
    }

    /// Follow the pointer. No-op unless dragging. No bounds clamping.
    pub fn update_drag(&mut self, pointer: Position) {
        if let Some(drag) = self.drag {
            self.position = pointer - drag.grab_offset;
        }
    }

    /// Leave the dragging state. Returns whether a drag was in progress.
    pub fn end_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Recompute the avoidance offset for an idle pointer
    pub fn update_idle(&mut self, pointer: Position, size: f32) {
        if self.is_dragging() {
            return;
        }
        let center = self.position + Position::new(size / 2.0, size / 2.0);
        self.visual_offset = avoidance_offset(center, pointer, self.avoid_radius, self.avoid_max_offset);
    }

    /// Pointer left the viewport; nothing to avoid
    pub fn clear_avoidance(&mut self) {
        self.visual_offset = Position::ZERO;
    }

    /// Pick a new patrol target uniformly inside `viewport` minus the widget size
    pub fn pick_patrol_target<R: Rng>(
        &mut self,
        rng: &mut R,
        viewport: Dimensions,
        size: f32,
    ) -> Option<Position> {
        if self.is_dragging() {
            return None;
        }
        let max_x = (viewport.width - size).max(0.0);
        let max_y = (viewport.height - size).max(0.0);
        let target = Position::new(rng.gen_range(0.0..=max_x), rng.gen_range(0.0..=max_y));
        self.patrol_target = Some(target);
        Some(target)
    }

    /// One animation tick of exponential smoothing toward the patrol target.
    /// Returns whether the position changed.
    pub fn patrol_step(&mut self) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(target) = self.patrol_target else {
            return false;
        };
        let remaining = target - self.position;
        if remaining.length() <= patrol::ARRIVE_EPSILON {
            self.position = target;
            self.patrol_target = None;
        } else {
            self.position += remaining * self.smoothing;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn controller_at(x: f32, y: f32) -> PositionController {
        PositionController::new(Position::new(x, y), 100.0, 40.0, 0.1)
    }

    #[test]
    fn test_drag_follows_pointer_minus_grab_offset() {
        let mut controller = controller_at(100.0, 100.0);
        let p0 = Position::new(120.0, 110.0);
        controller.begin_drag(p0);
        controller.update_drag(Position::new(300.0, 50.0));
        let p2 = Position::new(-40.0, 700.0);
        controller.update_drag(p2);

        let initial = Position::new(100.0, 100.0);
        assert_eq!(controller.position(), p2 - (p0 - initial));
        // Offscreen positions are allowed
        assert!(controller.position().x < 0.0);
    }

    #[test]
    fn test_update_drag_ignored_when_not_dragging() {
        let mut controller = controller_at(10.0, 10.0);
        controller.update_drag(Position::new(500.0, 500.0));
        assert_eq!(controller.position(), Position::new(10.0, 10.0));
    }

    #[test]
    fn test_end_drag_reports_previous_state() {
        let mut controller = controller_at(0.0, 0.0);
        assert!(!controller.end_drag());
        controller.begin_drag(Position::new(5.0, 5.0));
        assert!(controller.is_dragging());
        assert!(controller.end_drag());
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_avoidance_zero_outside_radius() {
        let center = Position::new(0.0, 0.0);
        assert_eq!(avoidance_offset(center, Position::new(100.0, 0.0), 100.0, 40.0), Position::ZERO);
        assert_eq!(avoidance_offset(center, Position::new(0.0, 250.0), 100.0, 40.0), Position::ZERO);
    }

    #[test]
    fn test_avoidance_zero_at_center() {
        let center = Position::new(50.0, 50.0);
        let offset = avoidance_offset(center, center, 100.0, 40.0);
        assert_eq!(offset, Position::ZERO);
        assert!(offset.is_finite());
    }

    #[test]
    fn test_avoidance_pushes_away_from_pointer() {
        let center = Position::new(0.0, 0.0);
        // Pointer 50px to the left: strength (1 - 0.5) * 40 = 20, pushed right
        let offset = avoidance_offset(center, Position::new(-50.0, 0.0), 100.0, 40.0);
        assert!((offset.x - 20.0).abs() < 1e-4);
        assert!(offset.y.abs() < 1e-4);
    }

    #[test]
    fn test_avoidance_does_not_move_base_position() {
        let mut controller = controller_at(100.0, 100.0);
        // Widget center is (130, 130)
        controller.update_idle(Position::new(110.0, 130.0), 60.0);
        assert_eq!(controller.position(), Position::new(100.0, 100.0));
        assert!(controller.visual_offset().x > 0.0);
        assert!(controller.rendered_position().x > 100.0);

        // Pointer moves away, offset resets exactly
        controller.update_idle(Position::new(900.0, 900.0), 60.0);
        assert_eq!(controller.visual_offset(), Position::ZERO);
    }

    #[test]
    fn test_avoidance_suppressed_while_dragging() {
        let mut controller = controller_at(100.0, 100.0);
        controller.begin_drag(Position::new(130.0, 130.0));
        controller.update_idle(Position::new(125.0, 130.0), 60.0);
        assert_eq!(controller.visual_offset(), Position::ZERO);
    }

    #[test]
    fn test_patrol_target_within_viewport() {
        let mut controller = controller_at(0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let target = controller
                .pick_patrol_target(&mut rng, Dimensions::new(800.0, 600.0), 60.0)
                .unwrap();
            assert!((0.0..=740.0).contains(&target.x));
            assert!((0.0..=540.0).contains(&target.y));
        }
    }

    #[test]
    fn test_patrol_target_in_tiny_viewport() {
        let mut controller = controller_at(0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(1);
        let target = controller
            .pick_patrol_target(&mut rng, Dimensions::new(20.0, 20.0), 60.0)
            .unwrap();
        assert_eq!(target, Position::ZERO);
    }

    #[test]
    fn test_patrol_step_eases_toward_target() {
        let mut controller = controller_at(0.0, 0.0);
        controller.patrol_target = Some(Position::new(100.0, 0.0));

        assert!(controller.patrol_step());
        assert!((controller.position().x - 10.0).abs() < 1e-4);
        assert!(controller.patrol_step());
        assert!((controller.position().x - 19.0).abs() < 1e-4);

        // Eventually arrives and stops
        for _ in 0..200 {
            controller.patrol_step();
        }
        assert_eq!(controller.position(), Position::new(100.0, 0.0));
        assert_eq!(controller.patrol_target(), None);
        assert!(!controller.patrol_step());
    }

    #[test]
    fn test_patrol_suppressed_while_dragging() {
        let mut controller = controller_at(0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(3);
        controller.begin_drag(Position::new(10.0, 10.0));
        assert_eq!(
            controller.pick_patrol_target(&mut rng, Dimensions::new(800.0, 600.0), 60.0),
            None
        );
        controller.patrol_target = Some(Position::new(500.0, 500.0));
        assert!(!controller.patrol_step());
        assert_eq!(controller.position(), Position::ZERO);
    }

    #[test]
    fn test_begin_drag_cancels_patrol() {
        let mut controller = controller_at(0.0, 0.0);
        controller.patrol_target = Some(Position::new(500.0, 500.0));
        controller.begin_drag(Position::new(10.0, 10.0));
        controller.end_drag();
        assert!(!controller.patrol_step());
    }
}
