/// Bot command definitions and per-command handlers
pub mod commands;
/// Shift-setup conversation state
pub mod dialogue;
/// Update routing: message, callback, and fallback handlers
pub mod handlers;
/// User-facing Hebrew strings and message builders
pub mod texts;
