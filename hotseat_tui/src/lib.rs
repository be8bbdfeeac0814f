//! A hot-seat poker client for the terminal.
//!
//! Players share one keyboard: a short wizard collects the table, then each
//! player types their move when the prompt names them. The rules live in
//! `hotseat_poker`; this crate parses commands, keeps the session state and
//! lays the table out.

pub mod animation;
pub mod commands;
pub mod config;
pub mod logging;
pub mod session;
pub mod tui_app;
pub mod views;
