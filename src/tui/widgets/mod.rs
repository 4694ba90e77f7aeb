// TUI widget modules for each screen zone.

pub mod banner;
pub mod footer;
pub mod help_bar;
pub mod overlay;
pub mod settings;
pub mod stage;
pub mod stats;
pub mod winners;
