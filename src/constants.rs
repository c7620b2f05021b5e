//! Application-wide constants
//!
//! Default tunables and fixed identifiers, kept in one place so the widget
//! core, the config layer and the host window agree on them.

/// Mascot geometry (pixels)
pub mod mascot {
    /// Body diameter in normal mode
    pub const BODY_SIZE_NORMAL: f32 = 60.0;

    /// Body diameter in mini mode
    pub const BODY_SIZE_MINI: f32 = 40.0;

    /// Eye diameter in normal mode
    pub const EYE_SIZE_NORMAL: f32 = 25.0;

    /// Eye diameter in mini mode
    pub const EYE_SIZE_MINI: f32 = 12.0;

    /// Border stroke width around the body
    pub const BORDER_WIDTH: f32 = 5.0;

    /// Radius of the mode toggle knob
    pub const TOGGLE_RADIUS: f32 = 7.0;

    /// Default starting coordinate when nothing has been persisted
    pub const START_X: f32 = 100.0;
    pub const START_Y: f32 = 100.0;
}

/// Proximity avoidance
pub mod avoid {
    /// Pointer distance below which the mascot shies away
    pub const RADIUS: f32 = 100.0;

    /// Largest visual offset applied when the pointer sits on the mascot
    pub const MAX_OFFSET: f32 = 40.0;
}

/// Idle patrol motion
pub mod patrol {
    /// Delay between picking new patrol targets
    pub const INTERVAL_MS: u64 = 5_000;

    /// Fraction of the remaining distance covered per animation tick
    pub const SMOOTHING: f32 = 0.1;

    /// Distance at which the mascot counts as having arrived
    pub const ARRIVE_EPSILON: f32 = 0.5;
}

/// Click and drag classification
pub mod clicks {
    /// Window in which a second click turns into a double click
    pub const DOUBLE_CLICK_WINDOW_MS: u64 = 220;

    /// Pointer travel that turns a press into a drag
    pub const DRAG_THRESHOLD: f32 = 4.0;

    /// Length of the blink played on a single click
    pub const BLINK_MS: u64 = 150;
}

/// Persistence identifiers
pub mod storage {
    /// Key of the single widget record in the key-value store
    pub const WIDGET_KEY: &str = "miso-bot-state";

    /// Store file name inside the data directory
    pub const STORE_FILENAME: &str = "store.json";
}

/// Config file location
pub mod config {
    /// Application directory under the user's config/data dirs
    pub const APP_DIR: &str = "miso-bot";

    /// Config file name
    pub const FILENAME: &str = "config.json";
}

/// Validation bounds applied to config values
pub mod validation {
    pub const MAX_AVOID_RADIUS: f32 = 1_000.0;
    pub const MAX_AVOID_OFFSET: f32 = 500.0;
    pub const MIN_PATROL_INTERVAL_MS: u64 = 250;
    pub const MIN_SMOOTHING: f32 = 0.01;
    pub const MAX_SMOOTHING: f32 = 1.0;
    pub const MIN_DOUBLE_CLICK_WINDOW_MS: u64 = 50;
    pub const MAX_DOUBLE_CLICK_WINDOW_MS: u64 = 1_000;
    pub const MAX_DRAG_THRESHOLD: f32 = 50.0;
    pub const MAX_BLINK_MS: u64 = 2_000;
}
