//! VibeSec Terminal
//!
//! A simulated secure-coding training terminal. Type a command to open a
//! training module, take the quiz, or find the easter eggs.
//!
//! # Architecture
//!
//! - `data` - Content modules, history, scrollback, quiz and trivia
//! - `terminal` - The controller: command interpreter, viewer, timers, effects
//! - `tui` - Terminal user interface with ratatui
//! - `config` - YAML configuration

pub mod config;
pub mod data;
pub mod terminal;
pub mod tui;

pub use config::Config;
pub use terminal::Terminal;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the terminal
pub type Result<T> = anyhow::Result<T>;

/// Custom error types
#[derive(thiserror::Error, Debug)]
pub enum TerminalError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Content module not found: {0}")]
    MissingModule(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
