//! Category palette opened by double-clicking the mascot
//!
//! A small filterable list. Typing narrows the entries by case-insensitive
//! substring match on either the label or the key; Enter activates the
//! highlighted entry (or the first visible one when nothing is highlighted).
//! Choosing an entry emits exactly one [`PaletteOutcome::Chosen`] and closes
//! the palette. Dismissing it emits nothing.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One selectable palette entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    pub label: String,
}

impl Category {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }

    fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.label.to_lowercase().contains(needle)
            || self.key.to_lowercase().contains(needle)
    }
}

/// Input the host feeds into an open palette
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteInput {
    /// Replace the filter text
    Query(String),
    /// Highlight the visible entry at this index
    Highlight(usize),
    /// Activation key (Enter)
    Activate,
    /// Pick the visible entry at this index directly (mouse click)
    Select(usize),
    /// Pointer pressed outside the palette
    ClickOutside,
    /// Explicit close control or Escape
    Close,
}

/// What happened as a result of a [`PaletteInput`]
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteOutcome {
    None,
    Chosen(Category),
    Dismissed,
}

#[derive(Debug, Clone)]
pub struct CategoryPalette {
    categories: Vec<Category>,
    query: String,
    highlighted: Option<usize>,
    open: bool,
}

impl CategoryPalette {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            query: String::new(),
            highlighted: None,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    #[cfg(test)]
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Open with an empty filter. Reopening resets the filter.
    pub fn open(&mut self) {
        self.open = true;
        self.query.clear();
        self.highlighted = None;
        debug!("Category palette opened");
    }

    /// Entries matching the current filter, in configured order
    pub fn visible(&self) -> Vec<&Category> {
        let needle = self.query.trim().to_lowercase();
        self.categories
            .iter()
            .filter(|category| category.matches(&needle))
            .collect()
    }

    pub fn handle(&mut self, input: PaletteInput) -> PaletteOutcome {
        if !self.open {
            return PaletteOutcome::None;
        }

        match input {
            PaletteInput::Query(query) => {
                self.query = query;
                // Indices refer to the visible list, which just changed
                self.highlighted = None;
                PaletteOutcome::None
            }
            PaletteInput::Highlight(index) => {
                if index < self.visible().len() {
                    self.highlighted = Some(index);
                }
                PaletteOutcome::None
            }
            PaletteInput::Activate => {
                let index = self.highlighted.unwrap_or(0);
                self.choose(index)
            }
            PaletteInput::Select(index) => self.choose(index),
            PaletteInput::ClickOutside | PaletteInput::Close => {
                self.close();
                PaletteOutcome::Dismissed
            }
        }
    }

    fn choose(&mut self, index: usize) -> PaletteOutcome {
        let Some(category) = self.visible().get(index).map(|category| (*category).clone()) else {
            // Nothing matches the filter; stay open so the user can keep typing
            return PaletteOutcome::None;
        };
        self.close();
        debug!(key = %category.key, "Category chosen");
        PaletteOutcome::Chosen(category)
    }

    fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.highlighted = None;
    }
}
