pub mod mascot;
pub mod palette;
