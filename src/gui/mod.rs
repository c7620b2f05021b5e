pub mod components;
pub mod constants;
pub mod overlay;

pub use overlay::run_gui;
