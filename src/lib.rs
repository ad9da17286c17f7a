//! egram — a terminal shell for a Telegram-style chat client.
//!
//! The interesting part is the coordination layer in [`shell`]: a
//! navigation supervisor consumes the backend's connection and
//! authorization streams plus a popup channel, reconciles them into one
//! presentation root, and owns the exclusive lifecycle of the per-page
//! components. [`messenger`] maps message entities to display models;
//! [`agent`] is the backend boundary; [`ui`] is the thin ratatui layer.

pub mod agent;
pub mod cli;
pub mod config;
pub mod messenger;
pub mod shell;
pub mod ui;
