pub use beeper::Beeper;
pub use display::Display;

mod beeper;
mod display;
