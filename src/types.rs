//! Shared value types for the mascot widget

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

use crate::constants::mascot;

/// Viewport-relative coordinate (top-left of the mascot, or a pointer location)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ZERO: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Position) -> f32 {
        (self - other).length()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Position {
    fn add_assign(&mut self, rhs: Position) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Position {
    type Output = Position;

    fn mul(self, rhs: f32) -> Position {
        Position::new(self.x * rhs, self.y * rhs)
    }
}

/// Width/height pair for the viewport
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Rendering size of the mascot. Never affects position semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Normal,
    Mini,
}

impl Mode {
    pub fn toggled(self) -> Mode {
        match self {
            Mode::Normal => Mode::Mini,
            Mode::Mini => Mode::Normal,
        }
    }

    /// Body diameter
    pub fn body_size(self) -> f32 {
        match self {
            Mode::Normal => mascot::BODY_SIZE_NORMAL,
            Mode::Mini => mascot::BODY_SIZE_MINI,
        }
    }

    /// Eye diameter, scaled with the body
    pub fn eye_size(self) -> f32 {
        match self {
            Mode::Normal => mascot::EYE_SIZE_NORMAL,
            Mode::Mini => mascot::EYE_SIZE_MINI,
        }
    }
}

/// Visual mood, cycled by single clicks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expression {
    #[default]
    Normal,
    Surprised,
    Sleepy,
    Angry,
}

impl Expression {
    pub const ALL: [Expression; 4] = [
        Expression::Normal,
        Expression::Surprised,
        Expression::Sleepy,
        Expression::Angry,
    ];

    /// Body scale applied on top of the mode size
    pub fn body_scale(self) -> f32 {
        match self {
            Expression::Surprised => 1.2,
            Expression::Sleepy => 0.8,
            Expression::Normal | Expression::Angry => 1.0,
        }
    }
}
