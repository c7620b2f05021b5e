//! The mascot widget: one owned state object driven by explicit events
//!
//! The host translates its raw input into [`WidgetEvent`]s and feeds them to
//! [`Widget::handle`] together with a monotonic timestamp. Everything the
//! host must act on comes back as [`WidgetEffect`]s: store writes, palette
//! requests and change notifications. No callbacks, no globals.

pub mod click;
pub mod expression;
pub mod geometry;
pub mod position;

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::WidgetSettings;
use crate::persistence::WidgetRecord;
use crate::timer::{Scheduler, TaskHandle};
use crate::types::{Dimensions, Expression, Mode, Position};

use click::{ClickDisambiguator, ClickKind};
use expression::ExpressionState;
use geometry::MascotView;
use position::PositionController;

/// Snapshot of the widget's logical state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetState {
    pub position: Position,
    pub mode: Mode,
    pub expression: Expression,
    /// Transient; never persisted
    pub dragging: bool,
}

/// Input delivered by the host, one at a time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetEvent {
    PointerMoved(Position),
    /// Pointer left the viewport
    PointerLeft,
    PointerDown(Position),
    PointerUp(Position),
    Resized(Dimensions),
    /// Animation frame
    Tick,
}

/// Work for the host resulting from an event
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEffect {
    /// Write this record to the widget's store slot
    Persist(WidgetRecord),
    ExpressionChanged(Expression),
    ModeChanged(Mode),
    /// A double click asked for the category palette
    OpenPalette,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    PendingClick,
    BlinkEnd,
    Patrol,
}

/// What the current pointer press landed on
#[derive(Debug, Clone, Copy)]
enum Press {
    Body { origin: Position, dragging: bool },
    Toggle,
}

pub struct Widget {
    settings: WidgetSettings,
    position: PositionController,
    expression: ExpressionState,
    clicks: ClickDisambiguator,
    scheduler: Scheduler<Timer>,
    press: Option<Press>,
    blink: Option<TaskHandle>,
    viewport: Option<Dimensions>,
    /// Last known pointer inside the viewport
    pointer: Option<Position>,
    rng: StdRng,
}

impl Widget {
    /// Build the widget from a restored record, or defaults when there is none
    pub fn new(settings: WidgetSettings, restored: Option<WidgetRecord>) -> Self {
        Self::with_rng(settings, restored, StdRng::from_entropy())
    }

    pub fn with_rng(settings: WidgetSettings, restored: Option<WidgetRecord>, rng: StdRng) -> Self {
        let start = settings.start_position;
        let (position, mode, expression) = match restored {
            Some(record) => (record.position_or(start), record.mode, record.expression),
            None => (start, Mode::default(), Expression::default()),
        };

        let mut scheduler = Scheduler::new();
        if settings.patrol_enabled {
            scheduler.schedule(settings.patrol_interval, Timer::Patrol);
        }

        Self {
            position: PositionController::new(
                position,
                settings.avoid_radius,
                settings.avoid_max_offset,
                settings.patrol_smoothing,
            ),
            expression: ExpressionState::new(settings.expression_cycle.clone(), expression, mode),
            clicks: ClickDisambiguator::new(settings.double_click_window),
            scheduler,
            press: None,
            blink: None,
            viewport: None,
            pointer: None,
            rng,
            settings,
        }
    }

    pub fn state(&self) -> WidgetState {
        WidgetState {
            position: self.position.position(),
            mode: self.expression.mode(),
            expression: self.expression.expression(),
            dragging: self.position.is_dragging(),
        }
    }

    /// The record that would be persisted right now
    pub fn record(&self) -> WidgetRecord {
        WidgetRecord::new(
            self.position.position(),
            self.expression.mode(),
            self.expression.expression(),
        )
    }

    pub fn is_blinking(&self) -> bool {
        self.blink.is_some()
    }

    /// Render description for the current frame
    pub fn view(&self) -> MascotView {
        MascotView::new(
            self.position.rendered_position(),
            self.expression.mode(),
            self.expression.expression(),
            self.is_blinking(),
            self.position.is_dragging(),
        )
    }

    /// Whether `pointer` is over the mascot or its toggle knob
    pub fn contains(&self, pointer: Position) -> bool {
        let mode = self.expression.mode();
        let rendered = self.position.rendered_position();
        geometry::hits_toggle(rendered, mode, pointer)
            || geometry::hits_body(rendered, mode, pointer)
            || geometry::hits_body(self.position.position(), mode, pointer)
    }

    /// True while a patrol leg is in flight and needs per-frame ticks
    pub fn is_animating(&self) -> bool {
        self.position.patrol_target().is_some()
    }

    /// Earliest pending timer, so the host can schedule a wakeup
    pub fn next_wakeup(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    /// Process one event at host time `now`
    pub fn handle(&mut self, now: Duration, event: WidgetEvent) -> Vec<WidgetEffect> {
        let mut effects = Vec::new();
        self.fire_due(now, &mut effects);

        match event {
            WidgetEvent::PointerMoved(pointer) => self.pointer_moved(pointer),
            WidgetEvent::PointerLeft => {
                self.pointer = None;
                if !self.position.is_dragging() {
                    self.position.clear_avoidance();
                }
            }
            WidgetEvent::PointerDown(pointer) => self.pointer_down(pointer),
            WidgetEvent::PointerUp(pointer) => self.pointer_up(now, pointer, &mut effects),
            WidgetEvent::Resized(viewport) => {
                if self.viewport != Some(viewport) {
                    debug!(width = viewport.width, height = viewport.height, "Viewport resized");
                    self.viewport = Some(viewport);
                }
            }
            WidgetEvent::Tick => {
                if self.position.patrol_step() && self.press.is_none() {
                    // The body moved under a still pointer
                    if let Some(pointer) = self.pointer {
                        self.position.update_idle(pointer, self.expression.mode().body_size());
                    }
                }
            }
        }

        effects
    }

    fn fire_due(&mut self, now: Duration, effects: &mut Vec<WidgetEffect>) {
        for (handle, timer) in self.scheduler.take_due(now) {
            match timer {
                Timer::PendingClick => {
                    if self.clicks.expired(handle) == Some(ClickKind::Single) {
                        self.single_click(now, effects);
                    }
                }
                Timer::BlinkEnd => {
                    if self.blink == Some(handle) {
                        self.blink = None;
                    }
                }
                Timer::Patrol => {
                    self.start_patrol_leg();
                    self.scheduler.schedule(now + self.settings.patrol_interval, Timer::Patrol);
                }
            }
        }
    }

    fn start_patrol_leg(&mut self) {
        let Some(viewport) = self.viewport else {
            return;
        };
        let size = self.expression.mode().body_size();
        if let Some(target) = self.position.pick_patrol_target(&mut self.rng, viewport, size) {
            debug!(x = target.x, y = target.y, "New patrol target");
        }
    }

    fn pointer_moved(&mut self, pointer: Position) {
        self.pointer = Some(pointer);
        match self.press {
            Some(Press::Body { origin, dragging }) => {
                let started = !dragging && origin.distance(pointer) > self.settings.drag_threshold;
                if started && self.clicks.cancel(&mut self.scheduler) {
                    debug!("Drag started, pending click dropped");
                }
                let dragging = dragging || started;
                if dragging {
                    self.press = Some(Press::Body { origin, dragging });
                    self.position.update_drag(pointer);
                }
            }
            Some(Press::Toggle) => {}
            None => self.position.update_idle(pointer, self.expression.mode().body_size()),
        }
    }

    fn pointer_down(&mut self, pointer: Position) {
        if self.press.is_some() {
            return;
        }
        let mode = self.expression.mode();
        let rendered = self.position.rendered_position();
        if geometry::hits_toggle(rendered, mode, pointer) {
            self.press = Some(Press::Toggle);
        } else if self.contains(pointer) {
            self.position.begin_drag(pointer);
            self.press = Some(Press::Body {
                origin: pointer,
                dragging: false,
            });
        }
    }

    fn pointer_up(&mut self, now: Duration, pointer: Position, effects: &mut Vec<WidgetEffect>) {
        match self.press.take() {
            None => {}
            Some(Press::Toggle) => {
                let rendered = self.position.rendered_position();
                if geometry::hits_toggle(rendered, self.expression.mode(), pointer) {
                    self.toggle_mode(effects);
                }
            }
            Some(Press::Body { dragging: true, .. }) => {
                self.position.end_drag();
                let position = self.position.position();
                info!(x = position.x, y = position.y, "Drag finished");
                effects.push(WidgetEffect::Persist(self.record()));
            }
            Some(Press::Body { dragging: false, .. }) => {
                self.position.end_drag();
                if self.clicks.click(now, &mut self.scheduler, Timer::PendingClick) == Some(ClickKind::Double) {
                    debug!("Double click");
                    effects.push(WidgetEffect::OpenPalette);
                }
            }
        }
    }

    fn single_click(&mut self, now: Duration, effects: &mut Vec<WidgetEffect>) {
        let expression = self.expression.advance();
        if let Some(previous) = self.blink.take() {
            self.scheduler.cancel(previous);
        }
        self.blink = Some(self.scheduler.schedule(now + self.settings.blink, Timer::BlinkEnd));
        info!(expression = ?expression, "Expression changed");
        effects.push(WidgetEffect::ExpressionChanged(expression));
        effects.push(WidgetEffect::Persist(self.record()));
    }

    fn toggle_mode(&mut self, effects: &mut Vec<WidgetEffect>) {
        let mode = self.expression.toggle_mode();
        info!(mode = ?mode, "Mode toggled");
        effects.push(WidgetEffect::ModeChanged(mode));
        effects.push(WidgetEffect::Persist(self.record()));
    }
}
