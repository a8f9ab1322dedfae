//! Data structures for the terminal
//!
//! Content modules, command history, scrollback, quiz and trivia.

pub mod content;
pub mod history;
pub mod quiz;
pub mod scrollback;
pub mod trivia;

pub use content::*;
pub use history::*;
pub use quiz::*;
pub use scrollback::*;
