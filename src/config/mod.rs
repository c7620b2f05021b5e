//! Configuration management for the M.I.S.O. bot
//!
//! Tunables live in a JSON file under the user's config dir. The widget
//! core never sees the file format; it receives a resolved
//! [`WidgetSettings`] instead.

pub mod settings;

pub use settings::{Config, WidgetSettings};
