//! # Shift Reminder Bot
//!
//! A Telegram bot that reminds shift workers to punch in and out of the
//! Inspector time tracker.
//!
//! ## Features
//! - Weekly shift roster in Hebrew (`ראשון:בוקר שני:לילה ...`)
//! - Check-in and check-out reminders a few minutes before each boundary
//! - Repeating nudges until the inline confirmation button is tapped
//! - Step-by-step setup dialogue with a review/confirm card
//! - Roster import from a photo via an OpenAI-compatible vision model
//! - Owner-managed access approval for new users

/// Bot command handlers and message processing
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Shift domain: parsing, shift kinds, weekday arithmetic
pub mod schedule;
/// Background services: reminder engine, roster reader, health endpoint
pub mod services;
/// In-memory registries and shared handler context
pub mod state;
/// Utility functions for formatting, validation, and feedback
pub mod utils;
