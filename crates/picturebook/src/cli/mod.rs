//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the picturebook binary.

mod commands;
mod generate;
mod menu;
mod repository;
mod stories;

pub use commands::{Cli, Commands};
pub use generate::generate_story;
pub use menu::run_menu;
pub use stories::{delete_story, list_stories, show_story};
