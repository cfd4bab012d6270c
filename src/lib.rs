//! # Bot Forge
//!
//! A Telegram bot platform where every user can register one personal bot.
//!
//! ## Features
//! - Bot token registration validated against the Bot API `getMe` call
//! - One bot per user, with status/delete/broadcast management menus
//! - Owner admin panel with creation history and counters
//! - Single JSON document persisted with atomic writes

/// Bot command handlers, menus and update routing
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Registration workflow, panel dispatch, token checks and health endpoints
pub mod services;
/// Persisted platform document and its models
pub mod store;
/// Utility functions for logging, feedback and time formatting
pub mod utils;
