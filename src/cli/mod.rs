//! CLI layer - Command-line interface

pub mod commands;
pub mod menu;
pub mod output;

pub use commands::{Cli, Commands, DraftAction};
pub use menu::Menu;
