//! Terminal editor for Lost Engine `config.yml` files.

pub mod app;
pub mod cli;
pub mod commands;
pub mod errors;
pub mod logging;
pub mod persist;
pub mod settings;
pub mod sounds;
pub mod textures;
pub mod tui;
