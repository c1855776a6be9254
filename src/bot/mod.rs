//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules for better organization:
//! - `message_handler`: Telegram endpoint for incoming messages
//! - `router`: Commands, menu buttons and the routing table
//! - `dialogue_manager`: Conversation state transitions and replies
//! - `ui_builder`: Creates keyboards and formats messages

pub mod dialogue_manager;
pub mod message_handler;
pub mod router;
pub mod ui_builder;

// Re-export main handler function for use in main.rs
pub use message_handler::message_handler;

// Re-export the pieces tests and alternative front-ends drive directly
pub use dialogue_manager::{process_message, Incoming, Reply, Transition};
pub use router::{route, Command, MenuButton, RestartAnswer, Route};
pub use ui_builder::Keyboard;
