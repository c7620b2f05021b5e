//! Expression state machine
//!
//! Two independent pieces of state: the expression, stepped through a
//! configured cycle by single clicks, and the size mode, flipped by the
//! toggle knob. Neither transition touches the other.

use crate::types::{Expression, Mode};

#[derive(Debug, Clone)]
pub struct ExpressionState {
    cycle: Vec<Expression>,
    expression: Expression,
    mode: Mode,
}

impl ExpressionState {
    /// `cycle` must be non-empty; config validation guarantees it
    pub fn new(cycle: Vec<Expression>, expression: Expression, mode: Mode) -> Self {
        let cycle = if cycle.is_empty() {
            Expression::ALL.to_vec()
        } else {
            cycle
        };
        Self {
            cycle,
            expression,
            mode,
        }
    }

    pub fn expression(&self) -> Expression {
        self.expression
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[cfg(test)]
    pub fn cycle_len(&self) -> usize {
        self.cycle.len()
    }

    /// Step to the next expression, wrapping at the end of the cycle.
    /// An expression missing from the cycle restarts it from the top.
    pub fn advance(&mut self) -> Expression {
        let next = match self.cycle.iter().position(|e| *e == self.expression) {
            Some(index) => (index + 1) % self.cycle.len(),
            None => 0,
        };
        self.expression = self.cycle[next];
        self.expression
    }

    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = self.mode.toggled();
        self.mode
    }
}
